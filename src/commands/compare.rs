use anyhow::Result;
use colored::Colorize;
use rate_card::compare::compare;
use rate_card::config::Config;
use rate_card::{CampaignConfig, PricingEngine, TerritoryCatalog};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use super::{amount, quote::print_quote};

/// Execute the compare command
pub fn execute(cfg: &Config, a_path: &Path, b_path: &Path, json: bool) -> Result<()> {
    let a = CampaignConfig::from_file(a_path)?;
    let b = CampaignConfig::from_file(b_path)?;

    let engine = PricingEngine::new(Arc::new(cfg.rate_card.clone()));
    let catalog = TerritoryCatalog::new(cfg.territories.clone());
    let comparison = compare(&engine, &catalog, &a, &b);

    info!(
        difference = comparison.difference,
        combined_total = comparison.combined_total,
        "Scenarios compared"
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&comparison)?);
        return Ok(());
    }

    print_quote("Scenario A", &a, &comparison.a, &catalog);
    println!();
    print_quote("Scenario B", &b, &comparison.b, &catalog);
    println!();

    let difference = if comparison.difference > 0.0 {
        format!("+{}", amount(comparison.difference)).red()
    } else {
        amount(comparison.difference).green()
    };
    println!("{}", "Comparison".bold());
    println!("  {}: {}", "B - A".cyan(), difference);
    println!(
        "  {}: {}",
        "Combined total".cyan(),
        amount(comparison.combined_total).yellow().bold()
    );

    Ok(())
}
