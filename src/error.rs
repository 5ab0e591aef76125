use thiserror::Error;

/// Application error types
///
/// The quote engine itself is total; these errors only come from the edges:
/// configuration loading, scenario files and user input parsing.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Rejected user input (tier names, follower counts, ranges)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Scenario file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Scenario file could not be parsed
    #[error("Scenario parse error: {0}")]
    ScenarioParse(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::ScenarioParse(format!("TOML error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::ScenarioParse(format!("JSON error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = AppError::InvalidInput("unknown tier 'gold'".to_string());
        assert_eq!(error.to_string(), "Invalid input: unknown tier 'gold'");
    }

    #[test]
    fn test_config_error_conversion() {
        let err = config::ConfigError::Message("missing field".to_string());
        let app: AppError = err.into();
        assert!(matches!(app, AppError::ConfigError(_)));
        assert_eq!(app.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_json_error_conversion() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::ScenarioParse(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let app: AppError = err.into();
        assert!(matches!(app, AppError::ScenarioParse(_)));
        assert!(app.to_string().contains("TOML error"));
    }
}
