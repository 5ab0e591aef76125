/// Environment overrides for configuration
///
/// Kept in its own test binary: environment variables are process-wide and
/// would leak into the file-based config tests running in parallel.
use rate_card::config::load_config;
use std::env;
use tempfile::TempDir;

#[test]
fn test_environment_overrides_file_and_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("rate-card.toml");
    std::fs::write(&path, "[logging]\nlevel = \"info\"\n").unwrap();

    env::set_var("RATE_CARD__LOGGING__LEVEL", "debug");
    env::set_var("RATE_CARD__RATE_CARD__VIRALITY_DISCOUNT", "0.1");
    let result = load_config(&path);
    env::remove_var("RATE_CARD__LOGGING__LEVEL");
    env::remove_var("RATE_CARD__RATE_CARD__VIRALITY_DISCOUNT");

    let cfg = result.unwrap();
    assert_eq!(cfg.logging.level, "debug");
    assert_eq!(cfg.rate_card.virality_discount, 0.1);
    // Untouched fields keep their defaults
    assert_eq!(cfg.rate_card.billboard_multiplier, 1.2);
    assert_eq!(cfg.rate_card.follower_brackets.len(), 7);
}
