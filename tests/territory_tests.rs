/// Integration tests for territory coverage and labels
use rate_card::{TerritoryCatalog, TerritoryNode};

fn catalog() -> TerritoryCatalog {
    TerritoryCatalog::builtin()
}

#[test]
fn test_worldwide_short_circuits() {
    let catalog = catalog();
    assert_eq!(catalog.coverage_percent(&["worldwide"]), 100.0);
    assert_eq!(catalog.coverage_percent(&["canada", "worldwide", "uk"]), 100.0);
    assert_eq!(catalog.display_label(&["uk", "worldwide"]), "Worldwide");
}

#[test]
fn test_empty_selection_is_worldwide() {
    let catalog = catalog();
    let empty: [&str; 0] = [];
    assert_eq!(catalog.coverage_percent(&empty), 100.0);
    assert_eq!(catalog.display_label(&empty), "Worldwide");
}

#[test]
fn test_single_country() {
    let catalog = catalog();
    assert_eq!(catalog.coverage_percent(&["canada"]), 5.0);
    assert_eq!(catalog.display_label(&["canada"]), "Canada");
}

#[test]
fn test_parent_with_selected_child_is_excluded() {
    let catalog = catalog();
    assert_eq!(catalog.coverage_percent(&["usa", "us-ca"]), 7.28);
    assert_eq!(catalog.coverage_percent(&["us-ca", "usa"]), 7.28);
}

#[test]
fn test_unrelated_regions_are_summed() {
    let catalog = catalog();
    let coverage = catalog.coverage_percent(&["uk", "japan", "brazil"]);
    assert!((coverage - 20.0).abs() < 1e-9);
}

#[test]
fn test_unknown_ids_contribute_nothing() {
    let catalog = catalog();
    assert_eq!(catalog.coverage_percent(&["atlantis"]), 0.0);
    assert_eq!(catalog.coverage_percent(&["atlantis", "canada"]), 5.0);
    assert_eq!(catalog.display_label(&["atlantis"]), "Unknown Territory");
}

#[test]
fn test_labels() {
    let catalog = catalog();
    assert_eq!(
        catalog.display_label(&["uk", "germany"]),
        "United Kingdom + Germany"
    );
    assert_eq!(catalog.display_label(&["uk", "germany", "france"]), "3 Territories");
    // Count is the raw selection size, before parent filtering
    assert_eq!(catalog.display_label(&["usa", "us-ca", "us-ny"]), "3 Territories");
}

#[test]
fn test_coverage_stays_within_bounds() {
    let catalog = catalog();
    let everything: Vec<String> = catalog
        .roots()
        .iter()
        .filter(|r| r.id != "worldwide")
        .flat_map(|r| {
            std::iter::once(r.id.clone()).chain(r.children.iter().map(|c| c.id.clone()))
        })
        .collect();

    let coverage = catalog.coverage_percent(&everything);
    assert!((0.0..=100.0).contains(&coverage));

    let oversized = TerritoryCatalog::new(vec![
        TerritoryNode {
            id: "a".to_string(),
            name: "A".to_string(),
            percentage: 80.0,
            tier: 1,
            children: vec![],
        },
        TerritoryNode {
            id: "b".to_string(),
            name: "B".to_string(),
            percentage: 80.0,
            tier: 1,
            children: vec![],
        },
    ]);
    assert_eq!(oversized.coverage_percent(&["a", "b"]), 100.0);
}

#[test]
fn test_selection_filtered_to_nothing_is_zero_not_worldwide() {
    // The parent drops out for its selected child, which weighs nothing
    let catalog = TerritoryCatalog::new(vec![TerritoryNode {
        id: "region".to_string(),
        name: "Region".to_string(),
        percentage: 10.0,
        tier: 1,
        children: vec![TerritoryNode {
            id: "zero".to_string(),
            name: "Zero".to_string(),
            percentage: 0.0,
            tier: 1,
            children: vec![],
        }],
    }]);
    assert_eq!(catalog.coverage_percent(&["region", "zero"]), 0.0);
}

#[test]
fn test_lookup_reaches_every_level() {
    let catalog = catalog();
    assert_eq!(catalog.get("north-america").unwrap().parent, None);
    assert_eq!(catalog.get("usa").unwrap().parent.as_deref(), Some("north-america"));
    assert_eq!(catalog.get("us-vt").unwrap().percentage, 0.01);
    assert_eq!(catalog.get("usa").unwrap().children.len(), 50);
}
