use crate::pricing::{Breakdown, CampaignConfig, PricingEngine};
use crate::territory::TerritoryCatalog;
use serde::Serialize;

/// Two quotes side by side
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Comparison {
    pub a: Breakdown,
    pub b: Breakdown,
    /// Scenario B final price minus scenario A final price
    pub difference: f64,
    pub combined_total: f64,
}

pub fn compare(
    engine: &PricingEngine,
    catalog: &TerritoryCatalog,
    a: &CampaignConfig,
    b: &CampaignConfig,
) -> Comparison {
    let a = engine.quote(a, catalog);
    let b = engine.quote(b, catalog);
    Comparison {
        difference: b.final_price - a.final_price,
        combined_total: a.final_price + b.final_price,
        a,
        b,
    }
}
