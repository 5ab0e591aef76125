use anyhow::Result;
use colored::Colorize;
use rate_card::config::Config;
use rate_card::pricing::ArtistTier;
use rate_card::TerritoryCatalog;
use std::path::Path;
use tracing::info;

use super::{amount, fraction_percent, trim_float};

/// Execute the config show command
///
/// Displays the effective configuration (file, environment and defaults merged)
pub fn show(cfg: &Config) -> Result<()> {
    info!("Displaying configuration");

    println!("{}", "Current Configuration:".green().bold());
    println!();

    // Serialize to TOML format
    let toml_string = toml::to_string_pretty(cfg)?;
    println!("{}", toml_string);

    Ok(())
}

/// Execute the config validate command
///
/// Loading already validated the configuration; this prints a summary of it
pub fn validate(cfg: &Config, path: &Path) -> Result<()> {
    info!(path = %path.display(), "Configuration validated");

    println!("{}", "✓ Configuration is valid".green());
    if !path.exists() {
        println!(
            "  {}",
            format!("{} not found, using built-in rate card", path.display()).dimmed()
        );
    }
    println!();

    println!("{}", "Summary:".bold());
    println!(
        "  {}: {} / {}",
        "Logging".cyan(),
        cfg.logging.level,
        cfg.logging.format
    );

    let card = &cfg.rate_card;
    println!(
        "  {}: {}",
        "Follower brackets".cyan(),
        card.follower_brackets.len()
    );
    for bracket in &card.follower_brackets {
        let bound = match bracket.upper_bound {
            Some(bound) => format!("<= {}M", trim_float(bound)),
            None => "above".to_string(),
        };
        println!("    {:<10} → {}", bound, amount(bracket.fee));
    }

    println!("  {}:", "Artist tiers".cyan());
    for tier in ArtistTier::ALL {
        let rate = card.tiers.get(tier);
        println!(
            "    {:<12} {} (paid x{})",
            tier.as_str(),
            amount(rate.base_fee),
            trim_float(rate.paid_multiplier)
        );
    }

    println!("  {}:", "Volume discounts".cyan());
    for discount in &card.volume_discounts {
        println!(
            "    {}+ tracks → {}",
            discount.min_tracks,
            fraction_percent(discount.fraction)
        );
    }
    println!(
        "  {}: {}",
        "Virality discount".cyan(),
        fraction_percent(card.virality_discount)
    );
    println!(
        "  {}: x{}",
        "Billboard multiplier".cyan(),
        trim_float(card.billboard_multiplier)
    );

    let catalog = TerritoryCatalog::new(cfg.territories.clone());
    println!(
        "  {}: {} ({} top-level)",
        "Territories".cyan(),
        catalog.len(),
        catalog.roots().len()
    );

    Ok(())
}
