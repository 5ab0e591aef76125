pub mod compare;
pub mod config;
pub mod error;
pub mod pricing;
pub mod recommend;
pub mod territory;

pub use error::{AppError, Result};
pub use pricing::{ArtistTier, Breakdown, CampaignConfig, CampaignType, PricingEngine, RateCard};
pub use recommend::{Recommendation, Recommender, Strategy};
pub use territory::{TerritoryCatalog, TerritoryNode, TerritorySelection};

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over the configured level. Output goes to
/// stderr so JSON quotes on stdout stay machine-readable.
///
/// Note: This function can only be called once.
pub fn init_tracing(logging: &config::LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let json = logging.format == "json";
    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let text_layer = (!json).then(|| fmt::layer().with_target(true).with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}
