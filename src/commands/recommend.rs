use anyhow::Result;
use colored::Colorize;
use rate_card::config::Config;
use rate_card::{PricingEngine, Recommender};
use std::sync::Arc;
use tracing::info;

use super::amount;

/// Execute the recommend command
pub fn execute(cfg: &Config, budget: f64, json: bool) -> Result<()> {
    let engine = PricingEngine::new(Arc::new(cfg.rate_card.clone()));
    let recommendations = Recommender::new(engine).find(budget);
    info!(budget, found = recommendations.len(), "Recommendations computed");

    if json {
        println!("{}", serde_json::to_string_pretty(&recommendations)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Recommendations for budget".green().bold(),
        amount(budget).bold()
    );
    println!();

    if recommendations.is_empty() {
        println!(
            "  {}",
            "No campaign configuration fits this budget.".yellow()
        );
        return Ok(());
    }

    for rec in &recommendations {
        println!("  {} {}", rec.title.cyan().bold(), format!("({})", rec.strategy.id()).dimmed());
        println!("    {}", rec.description);
        println!("    Price:   {}", amount(rec.price).yellow());
        println!("    Savings: {}", amount(rec.savings).green());
        println!(
            "    Remaining budget: {}",
            amount(budget - rec.price)
        );
        println!();
    }

    Ok(())
}
