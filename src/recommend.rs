//! Budget reverse-calculator
//!
//! Each strategy holds every campaign parameter fixed except one, sweeps that
//! one over a small bounded range at full worldwide coverage, and keeps the
//! best configuration whose price fits the budget.
//!
//! The ascending sweeps stop at the first configuration over budget. That is
//! only correct while price is non-decreasing in the swept parameter, which
//! holds for duration (price scales linearly with weeks) and for tier under the
//! default card. Track volume only ever lowers the price, so the volume sweep
//! either fits from the first step onward or not at all.

use crate::pricing::{ArtistTier, CampaignConfig, CampaignType, PricingEngine};
use crate::territory::WORLDWIDE_ID;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

const FIXED_WEEKS: u32 = 4;
const TRACK_SWEEP: RangeInclusive<u32> = 1..=20;
const DURATION_SWEEP: RangeInclusive<u32> = 4..=52;
const DURATION_STEP: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    MaxVolume,
    MaxImpact,
    MaxDuration,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::MaxVolume, Strategy::MaxImpact, Strategy::MaxDuration];

    pub fn id(&self) -> &'static str {
        match self {
            Strategy::MaxVolume => "max-volume",
            Strategy::MaxImpact => "max-impact",
            Strategy::MaxDuration => "max-duration",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Strategy::MaxVolume => "Max Volume",
            Strategy::MaxImpact => "Max Impact",
            Strategy::MaxDuration => "Max Duration",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// A campaign configuration found to fit the budget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub strategy: Strategy,
    pub title: String,
    pub description: String,
    pub config: CampaignConfig,
    pub price: f64,
    pub savings: f64,
}

pub struct Recommender {
    engine: PricingEngine,
}

impl Recommender {
    pub fn new(engine: PricingEngine) -> Self {
        Self { engine }
    }

    /// Run every strategy; strategies with no fitting configuration are omitted
    pub fn find(&self, budget: f64) -> Vec<Recommendation> {
        if !budget.is_finite() || budget < 0.0 {
            debug!(budget, "Budget out of range, no recommendations");
            return Vec::new();
        }

        let recommendations: Vec<_> = Strategy::ALL
            .into_iter()
            .filter_map(|strategy| self.run(strategy, budget))
            .collect();

        debug!(budget, found = recommendations.len(), "Recommendation search finished");
        recommendations
    }

    pub fn run(&self, strategy: Strategy, budget: f64) -> Option<Recommendation> {
        match strategy {
            Strategy::MaxVolume => self.max_volume(budget),
            Strategy::MaxImpact => self.max_impact(budget),
            Strategy::MaxDuration => self.max_duration(budget),
        }
    }

    /// Most tracks with a Developing artist, organic, for four weeks
    pub fn max_volume(&self, budget: f64) -> Option<Recommendation> {
        let best = self.sweep_ascending(budget, TRACK_SWEEP, |tracks| CampaignConfig {
            artist_tier: ArtistTier::Developing,
            campaign_type: CampaignType::Organic,
            duration_weeks: FIXED_WEEKS,
            track_volume: tracks,
            ..search_base()
        })?;

        let description = format!(
            "{} tracks with Developing artists for {} weeks.",
            best.config.track_volume, FIXED_WEEKS
        );
        Some(best.into_recommendation(Strategy::MaxVolume, description))
    }

    /// Highest tier that fits with paid amplification for four weeks
    pub fn max_impact(&self, budget: f64) -> Option<Recommendation> {
        let best = ArtistTier::descending()
            .map(|tier| {
                self.evaluate(CampaignConfig {
                    artist_tier: tier,
                    campaign_type: CampaignType::Paid,
                    duration_weeks: FIXED_WEEKS,
                    track_volume: 1,
                    ..search_base()
                })
            })
            .find(|candidate| candidate.price <= budget)?;

        let description = format!(
            "{} artist with Paid amplification for {} weeks.",
            best.config.artist_tier, FIXED_WEEKS
        );
        Some(best.into_recommendation(Strategy::MaxImpact, description))
    }

    /// Longest run for an Established artist, organic, in four-week steps
    pub fn max_duration(&self, budget: f64) -> Option<Recommendation> {
        let weeks = DURATION_SWEEP.step_by(DURATION_STEP);
        let best = self.sweep_ascending(budget, weeks, |weeks| CampaignConfig {
            artist_tier: ArtistTier::Established,
            campaign_type: CampaignType::Organic,
            duration_weeks: weeks,
            track_volume: 1,
            ..search_base()
        })?;

        let description = format!(
            "Established artist for {} weeks (Organic).",
            best.config.duration_weeks
        );
        Some(best.into_recommendation(Strategy::MaxDuration, description))
    }

    /// Last fitting candidate before the first overrun
    fn sweep_ascending<I, F>(&self, budget: f64, values: I, build: F) -> Option<Candidate>
    where
        I: IntoIterator<Item = u32>,
        F: Fn(u32) -> CampaignConfig,
    {
        values
            .into_iter()
            .map(|value| self.evaluate(build(value)))
            .take_while(|candidate| candidate.price <= budget)
            .last()
    }

    fn evaluate(&self, config: CampaignConfig) -> Candidate {
        let breakdown = self.engine.compute_breakdown(&config, 100.0);
        Candidate {
            config,
            price: breakdown.final_price,
            savings: breakdown.total_discount_amount,
        }
    }
}

struct Candidate {
    config: CampaignConfig,
    price: f64,
    savings: f64,
}

impl Candidate {
    fn into_recommendation(self, strategy: Strategy, description: String) -> Recommendation {
        Recommendation {
            strategy,
            title: strategy.title().to_string(),
            description,
            config: self.config,
            price: self.price,
            savings: self.savings,
        }
    }
}

/// Parameters shared by every strategy: viral, no chart bonus, no follower
/// uplift, worldwide
fn search_base() -> CampaignConfig {
    CampaignConfig {
        billboard_hot_100: false,
        brand_followers: 0.0,
        artist_followers: 0.0,
        is_viral: true,
        territories: vec![WORLDWIDE_ID.to_string()],
        ..CampaignConfig::default()
    }
}
