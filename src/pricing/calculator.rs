use crate::pricing::models::{Breakdown, CampaignConfig, CampaignType};
use crate::pricing::rate_card::RateCard;
use crate::territory::TerritoryCatalog;
use std::sync::Arc;
use tracing::debug;

/// Annual rate to weekly rate
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Turns a campaign configuration into an itemized price breakdown
///
/// Stateless apart from the shared rate card, so it is cheap to clone and
/// safe to call on every input change.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    rate_card: Arc<RateCard>,
}

impl PricingEngine {
    pub fn new(rate_card: Arc<RateCard>) -> Self {
        Self { rate_card }
    }

    pub fn rate_card(&self) -> &RateCard {
        &self.rate_card
    }

    /// Compute the full derivation for `config` at the given territory coverage
    ///
    /// Step order is fixed: billboard uplift before weekly normalisation,
    /// discounts after the duration multiplication, territory last.
    pub fn compute_breakdown(&self, config: &CampaignConfig, territory_percent: f64) -> Breakdown {
        let card = &self.rate_card;

        let combined_followers = config.brand_followers + config.artist_followers;
        let follower_base_fee = card.follower_bracket_fee(combined_followers);
        let artist_base_fee = card.tier_base_fee(config.artist_tier);
        let total_base_fee = follower_base_fee + artist_base_fee;

        let billboard_multiplier = if config.billboard_hot_100 {
            card.billboard_multiplier
        } else {
            1.0
        };
        let rate_with_billboard = total_base_fee * billboard_multiplier;
        let weekly_rate = rate_with_billboard / WEEKS_PER_YEAR;

        let campaign_multiplier = match config.campaign_type {
            CampaignType::Organic => 1.0,
            CampaignType::Paid => card.tier_multiplier(config.artist_tier),
        };
        let gross_price = weekly_rate * campaign_multiplier * f64::from(config.duration_weeks);

        // Additive, not compounded
        let volume_discount_fraction = card.volume_discount(config.track_volume);
        let virality_discount_fraction = if config.is_viral {
            card.virality_discount
        } else {
            0.0
        };
        let total_discount_fraction = volume_discount_fraction + virality_discount_fraction;
        let total_discount_amount = gross_price * total_discount_fraction;
        let price_after_discounts = gross_price - total_discount_amount;

        let territory_multiplier = territory_percent / 100.0;
        let final_price = price_after_discounts * territory_multiplier;

        debug!(
            tier = %config.artist_tier,
            campaign_type = %config.campaign_type,
            weeks = config.duration_weeks,
            territory_percent,
            final_price,
            "Computed breakdown"
        );

        Breakdown {
            combined_followers,
            follower_base_fee,
            artist_base_fee,
            total_base_fee,
            billboard_multiplier,
            rate_with_billboard,
            weekly_rate,
            campaign_multiplier,
            gross_price,
            volume_discount_fraction,
            virality_discount_fraction,
            total_discount_fraction,
            total_discount_amount,
            price_after_discounts,
            territory_percent,
            territory_multiplier,
            final_price,
        }
    }

    /// Quote a configuration, resolving coverage from its selected territories
    pub fn quote(&self, config: &CampaignConfig, catalog: &TerritoryCatalog) -> Breakdown {
        let coverage = catalog.coverage_percent(&config.territories);
        self.compute_breakdown(config, coverage)
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(Arc::new(RateCard::default()))
    }
}
