//! Command implementations for the CLI
//!
//! - quote: Price a single campaign
//! - compare: Price two scenarios side by side
//! - recommend: Budget reverse-calculator
//! - territories: Territory tree listing and coverage
//! - config: Configuration display and validation

pub mod compare;
pub mod config;
pub mod quote;
pub mod recommend;
pub mod territories;

/// Two decimals, no currency or grouping
pub(crate) fn amount(value: f64) -> String {
    format!("{:.2}", value)
}

/// Fraction (0.35) shown as a percentage ("35%")
pub(crate) fn fraction_percent(fraction: f64) -> String {
    format!("{}%", trim_float(fraction * 100.0))
}

/// At most two decimals, trailing zeros dropped ("7.28", "5", "42.5")
pub(crate) fn trim_float(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trim_float() {
        assert_eq!(trim_float(7.28), "7.28");
        assert_eq!(trim_float(5.0), "5");
        assert_eq!(trim_float(42.5), "42.5");
        assert_eq!(trim_float(100.0), "100");
    }

    #[test]
    fn test_fraction_percent() {
        assert_eq!(fraction_percent(0.35), "35%");
        assert_eq!(fraction_percent(0.0), "0%");
    }

    #[test]
    fn test_amount() {
        assert_eq!(amount(2846.153846), "2846.15");
    }
}
