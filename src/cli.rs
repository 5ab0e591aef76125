use clap::{Args, Parser, Subcommand};
use rate_card::{AppError, ArtistTier, CampaignType};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rate-card", version, about = "Licensing rate-card quote engine")]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = rate_card::config::DEFAULT_CONFIG_PATH, global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Quote a single campaign (default)
    Quote {
        #[command(flatten)]
        scenario: ScenarioArgs,

        /// Print the breakdown as JSON
        #[arg(long)]
        json: bool,
    },

    /// Quote two scenario files side by side
    Compare {
        /// Scenario A (TOML or JSON)
        a: PathBuf,

        /// Scenario B (TOML or JSON)
        b: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Find the largest campaigns that fit a budget
    Recommend {
        /// Budget to stay within
        #[arg(short, long, value_parser = parse_budget)]
        budget: f64,

        #[arg(long)]
        json: bool,
    },

    /// Inspect the territory tree
    Territories {
        #[command(subcommand)]
        action: TerritoryCommands,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Show version information
    Version,
}

/// Campaign parameters. Flags override values loaded from `--scenario`.
#[derive(Args, Debug, Clone, Default)]
pub struct ScenarioArgs {
    /// Load the campaign from a TOML or JSON scenario file
    #[arg(long)]
    pub scenario: Option<PathBuf>,

    /// Artist tier: developing, breaking, established, superstar, legacy
    #[arg(short, long)]
    pub tier: Option<ArtistTier>,

    /// Campaign type: organic or paid
    #[arg(long = "campaign-type")]
    pub campaign_type: Option<CampaignType>,

    /// Campaign length in weeks
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..=52))]
    pub weeks: Option<u32>,

    /// Track is on the Billboard Hot 100
    #[arg(long)]
    pub billboard: bool,

    /// Brand partner followers, in millions or with a K/M suffix
    #[arg(long, value_parser = parse_followers)]
    pub brand_followers: Option<f64>,

    /// Artist followers, in millions or with a K/M suffix
    #[arg(long, value_parser = parse_followers)]
    pub artist_followers: Option<f64>,

    /// Number of tracks licensed
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tracks: Option<u32>,

    /// Track is verified as trending
    #[arg(long)]
    pub viral: bool,

    /// Territory id; repeat for several
    #[arg(long = "territory")]
    pub territories: Vec<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum TerritoryCommands {
    /// Print the territory tree with revenue shares
    List {
        /// Only show nodes down to this depth (0 = top-level regions)
        #[arg(long)]
        depth: Option<usize>,
    },

    /// Coverage percentage and label for a selection
    Coverage {
        /// Territory ids
        ids: Vec<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

impl Cli {
    /// Get the command to execute, defaulting to a quote of the default campaign
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Quote {
            scenario: ScenarioArgs::default(),
            json: false,
        })
    }
}

/// Parse a follower count into millions
///
/// Plain numbers are millions already; `M` and `K` suffixes are accepted, so
/// `1.2M` is 1.2 and `150K` is 0.15. Thousands separators are ignored.
pub fn parse_followers(s: &str) -> Result<f64, AppError> {
    let cleaned: String = s
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect::<String>()
        .to_uppercase();

    let (number, scale) = if let Some(n) = cleaned.strip_suffix('M') {
        (n, 1.0)
    } else if let Some(n) = cleaned.strip_suffix('K') {
        (n, 0.001)
    } else {
        (cleaned.as_str(), 1.0)
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid follower count: {}", s)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Follower count must be a non-negative number: {}",
            s
        )));
    }

    Ok(value * scale)
}

fn parse_budget(s: &str) -> Result<f64, AppError> {
    let value: f64 = s
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| AppError::InvalidInput(format!("Invalid budget: {}", s)))?;

    if !value.is_finite() || value < 0.0 {
        return Err(AppError::InvalidInput(format!(
            "Budget must be a non-negative number: {}",
            s
        )));
    }

    Ok(value)
}
