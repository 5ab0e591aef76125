use anyhow::Result;
use colored::Colorize;
use rate_card::config::Config;
use rate_card::{Breakdown, CampaignConfig, PricingEngine, TerritoryCatalog, TerritorySelection};
use std::sync::Arc;
use tracing::info;

use super::{amount, fraction_percent, trim_float};
use crate::cli::ScenarioArgs;

/// Execute the quote command
pub fn execute(cfg: &Config, args: ScenarioArgs, json: bool) -> Result<()> {
    let campaign = resolve_campaign(args)?;
    let engine = PricingEngine::new(Arc::new(cfg.rate_card.clone()));
    let catalog = TerritoryCatalog::new(cfg.territories.clone());

    let breakdown = engine.quote(&campaign, &catalog);
    info!(final_price = breakdown.final_price, "Quote computed");

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "campaign": campaign,
                "territory_label": catalog.display_label(&campaign.territories),
                "breakdown": breakdown,
            }))?
        );
        return Ok(());
    }

    print_quote("Quote", &campaign, &breakdown, &catalog);
    Ok(())
}

/// Start from the scenario file (or the default campaign) and apply flags on top
pub(crate) fn resolve_campaign(args: ScenarioArgs) -> Result<CampaignConfig> {
    let mut campaign = match &args.scenario {
        Some(path) => CampaignConfig::from_file(path)?,
        None => CampaignConfig::default(),
    };

    if let Some(tier) = args.tier {
        campaign.artist_tier = tier;
    }
    if let Some(campaign_type) = args.campaign_type {
        campaign.campaign_type = campaign_type;
    }
    if let Some(weeks) = args.weeks {
        campaign.duration_weeks = weeks;
    }
    if args.billboard {
        campaign.billboard_hot_100 = true;
    }
    if let Some(followers) = args.brand_followers {
        campaign.brand_followers = followers;
    }
    if let Some(followers) = args.artist_followers {
        campaign.artist_followers = followers;
    }
    if let Some(tracks) = args.tracks {
        campaign.track_volume = tracks;
    }
    if args.viral {
        campaign.is_viral = true;
    }
    if !args.territories.is_empty() {
        campaign.territories = TerritorySelection::new(args.territories).into_ids();
    }

    Ok(campaign)
}

pub(crate) fn print_quote(
    title: &str,
    campaign: &CampaignConfig,
    b: &Breakdown,
    catalog: &TerritoryCatalog,
) {
    println!("{}", title.green().bold());
    println!(
        "  {}: {} / {} / {} weeks / {} track(s)",
        "Campaign".cyan(),
        campaign.artist_tier,
        campaign.campaign_type,
        campaign.duration_weeks,
        campaign.track_volume
    );
    println!(
        "  {}: {} ({}%)",
        "Territory".cyan(),
        catalog.display_label(&campaign.territories),
        trim_float(b.territory_percent)
    );
    println!();

    println!(
        "  Combined followers:  {}M",
        trim_float(b.combined_followers)
    );
    println!("  Follower base fee:   {}", amount(b.follower_base_fee));
    println!("  Artist base fee:     {}", amount(b.artist_base_fee));
    println!("  Total base fee:      {}", amount(b.total_base_fee));
    if b.billboard_multiplier != 1.0 {
        println!(
            "  Billboard (x{}):     {}",
            trim_float(b.billboard_multiplier),
            amount(b.rate_with_billboard)
        );
    }
    println!("  Weekly rate:         {}", amount(b.weekly_rate));
    if b.campaign_multiplier != 1.0 {
        println!("  Paid multiplier:     x{}", trim_float(b.campaign_multiplier));
    }
    println!("  Gross price:         {}", amount(b.gross_price));

    if b.volume_discount_fraction > 0.0 {
        println!(
            "  Volume discount:     -{}",
            fraction_percent(b.volume_discount_fraction)
        );
    }
    if b.virality_discount_fraction > 0.0 {
        println!(
            "  Virality discount:   -{}",
            fraction_percent(b.virality_discount_fraction)
        );
    }
    if b.total_discount_amount > 0.0 {
        println!(
            "  Total savings:       {}",
            amount(b.total_discount_amount).green()
        );
    }
    if b.territory_percent < 100.0 {
        println!(
            "  Territory coverage:  {}%",
            trim_float(b.territory_percent)
        );
    }

    println!();
    println!(
        "  {}: {}",
        "Final price".bold(),
        amount(b.final_price).yellow().bold()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rate_card::{ArtistTier, CampaignType};
    use std::io::Write;

    #[test]
    fn test_resolve_campaign_defaults() {
        let campaign = resolve_campaign(ScenarioArgs::default()).unwrap();
        assert_eq!(campaign, CampaignConfig::default());
    }

    #[test]
    fn test_flags_override_scenario_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "artist_tier = \"superstar\"\ncampaign_type = \"paid\"\nduration_weeks = 12\nterritories = [\"uk\"]"
        )
        .unwrap();

        let args = ScenarioArgs {
            scenario: Some(file.path().to_path_buf()),
            weeks: Some(6),
            viral: true,
            ..ScenarioArgs::default()
        };
        let campaign = resolve_campaign(args).unwrap();

        assert_eq!(campaign.artist_tier, ArtistTier::Superstar);
        assert_eq!(campaign.campaign_type, CampaignType::Paid);
        assert_eq!(campaign.duration_weeks, 6);
        assert!(campaign.is_viral);
        assert_eq!(campaign.territories, vec!["uk".to_string()]);
    }

    #[test]
    fn test_repeated_territory_flags_are_deduplicated() {
        let args = ScenarioArgs {
            territories: vec!["uk".to_string(), "japan".to_string(), "uk".to_string()],
            ..ScenarioArgs::default()
        };
        let campaign = resolve_campaign(args).unwrap();
        assert_eq!(campaign.territories, vec!["uk".to_string(), "japan".to_string()]);
    }
}
