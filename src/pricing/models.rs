use crate::error::AppError;
use crate::territory::WORLDWIDE_ID;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Artist classification, ordered from smallest to largest draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtistTier {
    Developing,
    Breaking,
    Established,
    Superstar,
    Legacy,
}

impl ArtistTier {
    /// All tiers in ascending order
    pub const ALL: [ArtistTier; 5] = [
        ArtistTier::Developing,
        ArtistTier::Breaking,
        ArtistTier::Established,
        ArtistTier::Superstar,
        ArtistTier::Legacy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ArtistTier::Developing => "Developing",
            ArtistTier::Breaking => "Breaking",
            ArtistTier::Established => "Established",
            ArtistTier::Superstar => "Superstar",
            ArtistTier::Legacy => "Legacy",
        }
    }

    /// Tiers from highest to lowest
    pub fn descending() -> impl Iterator<Item = ArtistTier> {
        Self::ALL.into_iter().rev()
    }
}

impl std::str::FromStr for ArtistTier {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "developing" => Ok(ArtistTier::Developing),
            "breaking" => Ok(ArtistTier::Breaking),
            "established" => Ok(ArtistTier::Established),
            "superstar" => Ok(ArtistTier::Superstar),
            "legacy" => Ok(ArtistTier::Legacy),
            _ => Err(AppError::InvalidInput(format!("Invalid artist tier: {}", s))),
        }
    }
}

impl std::fmt::Display for ArtistTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the campaign is organic or paid amplification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    Organic,
    Paid,
}

impl CampaignType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CampaignType::Organic => "Organic",
            CampaignType::Paid => "Paid",
        }
    }
}

impl std::str::FromStr for CampaignType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "organic" => Ok(CampaignType::Organic),
            "paid" => Ok(CampaignType::Paid),
            _ => Err(AppError::InvalidInput(format!("Invalid campaign type: {}", s))),
        }
    }
}

impl std::fmt::Display for CampaignType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Campaign parameters for a single quote
///
/// Follower counts are in millions and already resolved by whatever lookup the
/// caller uses. Range checks (duration >= 1, track volume >= 1) belong to the
/// caller; the engine prices whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignConfig {
    pub artist_tier: ArtistTier,
    pub campaign_type: CampaignType,
    pub duration_weeks: u32,
    pub billboard_hot_100: bool,
    pub brand_followers: f64,
    pub artist_followers: f64,
    pub track_volume: u32,
    pub is_viral: bool,
    pub territories: Vec<String>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            artist_tier: ArtistTier::Developing,
            campaign_type: CampaignType::Organic,
            duration_weeks: 4,
            billboard_hot_100: false,
            brand_followers: 0.0,
            artist_followers: 0.0,
            track_volume: 1,
            is_viral: false,
            territories: vec![WORLDWIDE_ID.to_string()],
        }
    }
}

impl CampaignConfig {
    /// Load a saved scenario. `.json` files are read as JSON, anything else as TOML.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        let config = if is_json {
            serde_json::from_str(&content)?
        } else {
            toml::from_str(&content)?
        };

        debug!(path = %path.display(), "Loaded scenario");
        Ok(config)
    }
}

/// Itemized derivation of a quote, every intermediate step retained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breakdown {
    pub combined_followers: f64,
    pub follower_base_fee: f64,
    pub artist_base_fee: f64,
    pub total_base_fee: f64,
    pub billboard_multiplier: f64,
    pub rate_with_billboard: f64,
    pub weekly_rate: f64,
    pub campaign_multiplier: f64,
    pub gross_price: f64,
    pub volume_discount_fraction: f64,
    pub virality_discount_fraction: f64,
    pub total_discount_fraction: f64,
    pub total_discount_amount: f64,
    pub price_after_discounts: f64,
    pub territory_percent: f64,
    pub territory_multiplier: f64,
    pub final_price: f64,
}
