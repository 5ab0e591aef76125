//! Rate card data
//!
//! Fees, multipliers and discount tables are plain data so a revised card is
//! a config edit. The calculator only reads them through the lookups below.

use crate::error::{AppError, Result};
use crate::pricing::models::ArtistTier;
use serde::{Deserialize, Serialize};

/// One follower bracket. `upper_bound` is inclusive; `None` means unbounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowerBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<f64>,
    pub fee: f64,
}

impl FollowerBracket {
    fn bounded(upper_bound: f64, fee: f64) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            fee,
        }
    }

    fn contains(&self, followers: f64) -> bool {
        self.upper_bound.map_or(true, |bound| followers <= bound)
    }
}

/// Base fee and paid-campaign multiplier for one artist tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierRate {
    pub base_fee: f64,
    pub paid_multiplier: f64,
}

/// Per-tier rates. A record rather than a map so every tier always has a rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierTable {
    pub developing: TierRate,
    pub breaking: TierRate,
    pub established: TierRate,
    pub superstar: TierRate,
    pub legacy: TierRate,
}

impl TierTable {
    pub fn get(&self, tier: ArtistTier) -> &TierRate {
        match tier {
            ArtistTier::Developing => &self.developing,
            ArtistTier::Breaking => &self.breaking,
            ArtistTier::Established => &self.established,
            ArtistTier::Superstar => &self.superstar,
            ArtistTier::Legacy => &self.legacy,
        }
    }
}

impl Default for TierTable {
    fn default() -> Self {
        let rate = |base_fee, paid_multiplier| TierRate {
            base_fee,
            paid_multiplier,
        };
        Self {
            developing: rate(25_000.0, 1.0),
            breaking: rate(31_250.0, 1.25),
            established: rate(43_750.0, 1.75),
            superstar: rate(87_500.0, 2.0),
            legacy: rate(175_000.0, 3.0),
        }
    }
}

/// Volume discount tier; applies when track volume >= `min_tracks`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeDiscount {
    pub min_tracks: u32,
    pub fraction: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCard {
    #[serde(default = "default_virality_discount")]
    pub virality_discount: f64,
    #[serde(default = "default_billboard_multiplier")]
    pub billboard_multiplier: f64,
    #[serde(default = "default_follower_brackets")]
    pub follower_brackets: Vec<FollowerBracket>,
    #[serde(default)]
    pub tiers: TierTable,
    #[serde(default = "default_volume_discounts")]
    pub volume_discounts: Vec<VolumeDiscount>,
}

fn default_follower_brackets() -> Vec<FollowerBracket> {
    vec![
        FollowerBracket::bounded(5.0, 12_000.0),
        FollowerBracket::bounded(25.0, 15_000.0),
        FollowerBracket::bounded(50.0, 25_000.0),
        FollowerBracket::bounded(100.0, 37_500.0),
        FollowerBracket::bounded(250.0, 45_000.0),
        FollowerBracket::bounded(500.0, 60_000.0),
        FollowerBracket {
            upper_bound: None,
            fee: 75_000.0,
        },
    ]
}

fn default_volume_discounts() -> Vec<VolumeDiscount> {
    vec![
        VolumeDiscount {
            min_tracks: 3,
            fraction: 0.15,
        },
        VolumeDiscount {
            min_tracks: 5,
            fraction: 0.25,
        },
        VolumeDiscount {
            min_tracks: 10,
            fraction: 0.35,
        },
    ]
}

fn default_virality_discount() -> f64 {
    0.15
}

fn default_billboard_multiplier() -> f64 {
    1.2
}

impl Default for RateCard {
    fn default() -> Self {
        Self {
            virality_discount: default_virality_discount(),
            billboard_multiplier: default_billboard_multiplier(),
            follower_brackets: default_follower_brackets(),
            tiers: TierTable::default(),
            volume_discounts: default_volume_discounts(),
        }
    }
}

impl RateCard {
    /// Base fee for a combined follower count (millions)
    ///
    /// First bracket whose bound covers the count. A card without an
    /// unbounded tail falls back to its last bracket.
    pub fn follower_bracket_fee(&self, combined_followers: f64) -> f64 {
        self.follower_brackets
            .iter()
            .find(|bracket| bracket.contains(combined_followers))
            .or_else(|| self.follower_brackets.last())
            .map_or(0.0, |bracket| bracket.fee)
    }

    pub fn tier_base_fee(&self, tier: ArtistTier) -> f64 {
        self.tiers.get(tier).base_fee
    }

    pub fn tier_multiplier(&self, tier: ArtistTier) -> f64 {
        self.tiers.get(tier).paid_multiplier
    }

    /// Highest matching volume tier wins; tiers never stack
    pub fn volume_discount(&self, track_volume: u32) -> f64 {
        self.volume_discounts
            .iter()
            .filter(|d| track_volume >= d.min_tracks)
            .max_by_key(|d| d.min_tracks)
            .map_or(0.0, |d| d.fraction)
    }

    pub fn max_volume_discount(&self) -> f64 {
        self.volume_discounts
            .iter()
            .map(|d| d.fraction)
            .fold(0.0, f64::max)
    }

    /// Check the card is internally consistent
    pub fn validate(&self) -> Result<()> {
        if self.follower_brackets.is_empty() {
            return Err(invalid("Rate card must define at least one follower bracket".to_string()));
        }

        let last = self.follower_brackets.len() - 1;
        let mut previous: Option<f64> = None;
        for (idx, bracket) in self.follower_brackets.iter().enumerate() {
            if !bracket.fee.is_finite() || bracket.fee < 0.0 {
                return Err(invalid(format!(
                    "Follower bracket {} has an invalid fee: {}",
                    idx + 1,
                    bracket.fee
                )));
            }
            match bracket.upper_bound {
                None if idx != last => {
                    return Err(invalid(format!(
                        "Follower bracket {} is unbounded but is not the last bracket",
                        idx + 1
                    )));
                }
                None => {}
                Some(bound) => {
                    if !bound.is_finite() || bound < 0.0 {
                        return Err(invalid(format!(
                            "Follower bracket {} has an invalid bound: {}",
                            idx + 1,
                            bound
                        )));
                    }
                    if let Some(prev) = previous {
                        if bound <= prev {
                            return Err(invalid(format!(
                                "Follower bracket bounds must be ascending ({} follows {})",
                                bound, prev
                            )));
                        }
                    }
                    previous = Some(bound);
                }
            }
        }

        for tier in ArtistTier::ALL {
            let rate = self.tiers.get(tier);
            if !rate.base_fee.is_finite() || rate.base_fee < 0.0 {
                return Err(invalid(format!(
                    "Tier {} has an invalid base fee: {}",
                    tier, rate.base_fee
                )));
            }
            if !rate.paid_multiplier.is_finite() || rate.paid_multiplier < 0.0 {
                return Err(invalid(format!(
                    "Tier {} has an invalid paid multiplier: {}",
                    tier, rate.paid_multiplier
                )));
            }
        }

        for discount in &self.volume_discounts {
            if !(0.0..=1.0).contains(&discount.fraction) {
                return Err(invalid(format!(
                    "Volume discount for {}+ tracks must be between 0 and 1, got {}",
                    discount.min_tracks, discount.fraction
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.virality_discount) {
            return Err(invalid(format!(
                "Virality discount must be between 0 and 1, got {}",
                self.virality_discount
            )));
        }
        if self.max_volume_discount() + self.virality_discount > 1.0 {
            return Err(invalid(
                "Combined volume and virality discounts exceed 100%".to_string(),
            ));
        }

        if !self.billboard_multiplier.is_finite() || self.billboard_multiplier < 0.0 {
            return Err(invalid(format!(
                "Billboard multiplier must be non-negative, got {}",
                self.billboard_multiplier
            )));
        }

        Ok(())
    }
}

fn invalid(message: String) -> AppError {
    AppError::ConfigError(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_follower_brackets_are_inclusive() {
        let card = RateCard::default();
        assert_eq!(card.follower_bracket_fee(0.0), 12_000.0);
        assert_eq!(card.follower_bracket_fee(5.0), 12_000.0);
        assert_eq!(card.follower_bracket_fee(5.1), 15_000.0);
        assert_eq!(card.follower_bracket_fee(25.0), 15_000.0);
        assert_eq!(card.follower_bracket_fee(100.0), 37_500.0);
        assert_eq!(card.follower_bracket_fee(500.0), 60_000.0);
        assert_eq!(card.follower_bracket_fee(500.5), 75_000.0);
        assert_eq!(card.follower_bracket_fee(10_000.0), 75_000.0);
    }

    #[test]
    fn test_bracket_fallback_without_unbounded_tail() {
        let card = RateCard {
            follower_brackets: vec![FollowerBracket::bounded(10.0, 1_000.0), FollowerBracket::bounded(20.0, 2_000.0)],
            ..RateCard::default()
        };
        assert_eq!(card.follower_bracket_fee(50.0), 2_000.0);

        let empty = RateCard {
            follower_brackets: vec![],
            ..RateCard::default()
        };
        assert_eq!(empty.follower_bracket_fee(1.0), 0.0);
    }

    #[test]
    fn test_tier_lookups() {
        let card = RateCard::default();
        assert_eq!(card.tier_base_fee(ArtistTier::Breaking), 31_250.0);
        assert_eq!(card.tier_base_fee(ArtistTier::Legacy), 175_000.0);
        assert_eq!(card.tier_multiplier(ArtistTier::Developing), 1.0);
        assert_eq!(card.tier_multiplier(ArtistTier::Established), 1.75);
        assert_eq!(card.tier_multiplier(ArtistTier::Legacy), 3.0);
    }

    #[test]
    fn test_volume_discount_highest_tier_wins() {
        let card = RateCard::default();
        assert_eq!(card.volume_discount(1), 0.0);
        assert_eq!(card.volume_discount(2), 0.0);
        assert_eq!(card.volume_discount(3), 0.15);
        assert_eq!(card.volume_discount(4), 0.15);
        assert_eq!(card.volume_discount(5), 0.25);
        assert_eq!(card.volume_discount(9), 0.25);
        assert_eq!(card.volume_discount(10), 0.35);
        assert_eq!(card.volume_discount(200), 0.35);
    }

    #[test]
    fn test_default_card_is_valid() {
        assert!(RateCard::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unbounded_bracket_in_middle() {
        let mut card = RateCard::default();
        card.follower_brackets[2].upper_bound = None;
        let err = card.validate().unwrap_err();
        assert!(matches!(err, AppError::ConfigError(_)));
        assert!(err.to_string().contains("not the last bracket"));
    }

    #[test]
    fn test_validate_rejects_descending_bounds() {
        let mut card = RateCard::default();
        card.follower_brackets[1].upper_bound = Some(1.0);
        assert!(card.validate().unwrap_err().to_string().contains("ascending"));
    }

    #[test]
    fn test_validate_rejects_discounts_over_full_price() {
        let mut card = RateCard::default();
        card.virality_discount = 0.7;
        assert!(card.validate().unwrap_err().to_string().contains("exceed 100%"));
    }
}
