use anyhow::Result;
use colored::Colorize;
use rate_card::config::Config;
use rate_card::{TerritoryCatalog, TerritoryNode};
use tracing::{info, warn};

use super::trim_float;

/// Execute the territories list command
pub fn list(cfg: &Config, max_depth: Option<usize>) -> Result<()> {
    let catalog = TerritoryCatalog::new(cfg.territories.clone());
    info!(territories = catalog.len(), "Listing territories");

    println!("{}", "Territories:".green().bold());
    for root in catalog.roots() {
        print_node(root, 0, max_depth);
    }
    Ok(())
}

/// Execute the territories coverage command
pub fn coverage(cfg: &Config, ids: &[String]) -> Result<()> {
    let catalog = TerritoryCatalog::new(cfg.territories.clone());

    let unknown: Vec<&str> = ids
        .iter()
        .map(String::as_str)
        .filter(|id| catalog.get(id).is_none())
        .collect();
    if !unknown.is_empty() {
        warn!(ids = ?unknown, "Unknown territory ids ignored");
    }

    let percent = catalog.coverage_percent(ids);
    println!("  {}: {}", "Selection".cyan(), catalog.display_label(ids));
    for entry in ids.iter().filter_map(|id| catalog.get(id)) {
        let within = entry
            .parent
            .as_deref()
            .and_then(|parent| catalog.get(parent))
            .map(|parent| format!(" in {}", parent.name))
            .unwrap_or_default();
        println!(
            "    {} {}{} {}",
            entry.name,
            format!("[{}]", entry.id).dimmed(),
            within.dimmed(),
            format!("{}%", trim_float(entry.percentage)).cyan()
        );
    }
    println!("  {}: {}%", "Coverage".cyan(), trim_float(percent));
    Ok(())
}

fn print_node(node: &TerritoryNode, depth: usize, max_depth: Option<usize>) {
    if max_depth.is_some_and(|max| depth > max) {
        return;
    }

    let indent = "  ".repeat(depth + 1);
    println!(
        "{}{} {} {}",
        indent,
        node.name,
        format!("[{}]", node.id).dimmed(),
        format!("{}%", trim_float(node.percentage)).cyan()
    );
    for child in &node.children {
        print_node(child, depth + 1, max_depth);
    }
}
