use crate::error::AppError;
use crate::pricing::RateCard;
use crate::territory::{default_territories, TerritoryNode, WORLDWIDE_ID};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default config file, looked up in the working directory
pub const DEFAULT_CONFIG_PATH: &str = "rate-card.toml";

/// Environment variable prefix, e.g. `RATE_CARD__LOGGING__LEVEL=debug`
pub const ENV_PREFIX: &str = "RATE_CARD";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub rate_card: RateCard,
    #[serde(default = "default_territories")]
    pub territories: Vec<TerritoryNode>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            rate_card: RateCard::default(),
            territories: default_territories(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    /// `text` or `json`
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

/// Load configuration from `path` (optional) and the environment
///
/// A missing file is not an error; every section falls back to the built-in
/// rate card and territory tree.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()
        .map_err(AppError::from)?;

    let cfg: Config = config.try_deserialize().map_err(AppError::from)?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format '{}': expected 'text' or 'json'", other),
    }

    cfg.rate_card.validate().context("Invalid rate card")?;

    if cfg.territories.is_empty() {
        anyhow::bail!("At least one territory must be configured");
    }

    let catalog = crate::territory::TerritoryCatalog::new(cfg.territories.clone());
    catalog.validate().context("Invalid territories")?;

    if let Some(worldwide) = catalog.get(WORLDWIDE_ID) {
        if !worldwide.children.is_empty() {
            anyhow::bail!("Territory '{}' is reserved and cannot have children", WORLDWIDE_ID);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_config_rejects_log_format() {
        let mut cfg = Config::default();
        cfg.logging.format = "xml".to_string();

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("Invalid log format"));
    }

    #[test]
    fn test_validate_config_requires_territories() {
        let mut cfg = Config::default();
        cfg.territories.clear();

        let result = validate_config(&cfg);
        assert!(result
            .unwrap_err()
            .to_string()
            .contains("At least one territory must be configured"));
    }

    #[test]
    fn test_validate_config_keeps_rate_card_cause() {
        let mut cfg = Config::default();
        cfg.rate_card.virality_discount = 1.5;

        let err = validate_config(&cfg).unwrap_err();
        assert_eq!(err.to_string(), "Invalid rate card");
        let cause = err.downcast_ref::<AppError>().unwrap();
        assert!(matches!(cause, AppError::ConfigError(msg) if msg.contains("Virality discount")));
    }

    #[test]
    fn test_validate_config_reserves_worldwide() {
        let mut cfg = Config::default();
        cfg.territories[0].children.push(TerritoryNode {
            id: "moon".to_string(),
            name: "Moon".to_string(),
            percentage: 1.0,
            tier: 5,
            children: vec![],
        });

        let result = validate_config(&cfg);
        assert!(result.unwrap_err().to_string().contains("reserved"));
    }
}
