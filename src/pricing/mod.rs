pub mod calculator;
pub mod models;
pub mod rate_card;

pub use calculator::{PricingEngine, WEEKS_PER_YEAR};
pub use models::{ArtistTier, Breakdown, CampaignConfig, CampaignType};
pub use rate_card::{FollowerBracket, RateCard, TierRate, TierTable, VolumeDiscount};
