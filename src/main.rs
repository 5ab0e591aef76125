use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use rate_card::{config, init_tracing};

fn main() -> Result<()> {
    // Parse CLI arguments
    let args = cli::Cli::parse();

    // Configuration carries the log settings, so it is loaded before tracing starts
    let cfg = config::load_config(&args.config)?;
    init_tracing(&cfg.logging);

    // Dispatch to appropriate command handler
    match args.get_command() {
        cli::Commands::Quote { scenario, json } => {
            commands::quote::execute(&cfg, scenario, json)?;
        }
        cli::Commands::Compare { a, b, json } => {
            commands::compare::execute(&cfg, &a, &b, json)?;
        }
        cli::Commands::Recommend { budget, json } => {
            commands::recommend::execute(&cfg, budget, json)?;
        }
        cli::Commands::Territories { action } => match action {
            cli::TerritoryCommands::List { depth } => commands::territories::list(&cfg, depth)?,
            cli::TerritoryCommands::Coverage { ids } => {
                commands::territories::coverage(&cfg, &ids)?
            }
        },
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&cfg)?,
            cli::ConfigCommands::Validate => commands::config::validate(&cfg, &args.config)?,
        },
        cli::Commands::Version => {
            println!("Rate Card v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
