//! Territory hierarchy and coverage aggregation
//!
//! Each region carries its editorial share of global revenue. A selection of
//! region ids is reduced to a single coverage percentage; a parent selected
//! together with any of its direct children is dropped so the overlap is not
//! counted twice. Child shares are never assumed to add up to the parent.

use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::trace;

/// Selecting this id means full global coverage, whatever else is selected
pub const WORLDWIDE_ID: &str = "worldwide";

const WORLDWIDE_LABEL: &str = "Worldwide";
const UNKNOWN_LABEL: &str = "Unknown Territory";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerritoryNode {
    pub id: String,
    pub name: String,
    /// Share of global revenue, 0-100
    pub percentage: f64,
    /// Pricing tier 1-5, informational only
    pub tier: u8,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<TerritoryNode>,
}

/// Flattened view of one node, as held in the catalog index
#[derive(Debug, Clone, PartialEq)]
pub struct TerritoryEntry {
    pub id: String,
    pub name: String,
    pub percentage: f64,
    pub tier: u8,
    pub parent: Option<String>,
    pub children: Vec<String>,
}

/// Territory tree plus an id index built once at load time
#[derive(Debug, Clone)]
pub struct TerritoryCatalog {
    roots: Vec<TerritoryNode>,
    index: HashMap<String, TerritoryEntry>,
    duplicates: Vec<String>,
}

impl TerritoryCatalog {
    pub fn new(roots: Vec<TerritoryNode>) -> Self {
        let mut index = HashMap::new();
        let mut duplicates = Vec::new();
        for root in &roots {
            flatten(root, None, &mut index, &mut duplicates);
        }
        Self {
            roots,
            index,
            duplicates,
        }
    }

    /// The built-in editorial territory tree
    pub fn builtin() -> Self {
        Self::new(default_territories())
    }

    pub fn roots(&self) -> &[TerritoryNode] {
        &self.roots
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Look up a node at any depth. Unknown ids resolve to `None`.
    pub fn get(&self, id: &str) -> Option<&TerritoryEntry> {
        self.index.get(id)
    }

    /// Coverage of a selection as a percentage in [0, 100]
    ///
    /// Empty selections and selections containing `worldwide` are full
    /// coverage. Otherwise a selected parent is excluded when any of its
    /// direct children is selected too; the remaining shares are summed and
    /// capped at 100. Unknown ids contribute nothing. A selection that
    /// filters down to nothing is 0, not worldwide.
    pub fn coverage_percent<S: AsRef<str>>(&self, selected: &[S]) -> f64 {
        if is_worldwide(selected) {
            return 100.0;
        }

        let chosen: HashSet<&str> = selected.iter().map(AsRef::as_ref).collect();
        let mut seen = HashSet::with_capacity(chosen.len());
        let mut total = 0.0;

        // Iterate in selection order so the float sum is reproducible
        for id in selected {
            let id: &str = id.as_ref();
            if !seen.insert(id) {
                continue;
            }
            let Some(entry) = self.index.get(id) else {
                trace!(territory = id, "Unknown territory id ignored");
                continue;
            };
            if entry.children.iter().any(|child| chosen.contains(child.as_str())) {
                trace!(territory = id, "Parent superseded by selected child");
                continue;
            }
            total += entry.percentage;
        }

        total.clamp(0.0, 100.0)
    }

    /// Human-readable label for a selection
    pub fn display_label<S: AsRef<str>>(&self, selected: &[S]) -> String {
        if is_worldwide(selected) {
            return WORLDWIDE_LABEL.to_string();
        }

        match selected {
            [only] => self
                .get(only.as_ref())
                .map_or_else(|| UNKNOWN_LABEL.to_string(), |e| e.name.clone()),
            [first, second] => [first, second]
                .iter()
                .filter_map(|id| self.get(id.as_ref()))
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join(" + "),
            _ => format!("{} Territories", selected.len()),
        }
    }

    /// Check ids are unique and shares are within 0-100
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.duplicates.first() {
            return Err(AppError::ConfigError(format!("Duplicate territory id: {}", id)));
        }
        // Sorted so the reported entry does not depend on hash order
        let mut entries: Vec<&TerritoryEntry> = self.index.values().collect();
        entries.sort_by(|a, b| a.id.cmp(&b.id));
        for entry in entries {
            if entry.id.trim().is_empty() {
                return Err(AppError::ConfigError("Territory id cannot be empty".to_string()));
            }
            if !(0.0..=100.0).contains(&entry.percentage) {
                return Err(AppError::ConfigError(format!(
                    "Territory '{}' percentage must be between 0 and 100, got {}",
                    entry.id, entry.percentage
                )));
            }
            if !(1..=5).contains(&entry.tier) {
                return Err(AppError::ConfigError(format!(
                    "Territory '{}' tier must be between 1 and 5, got {}",
                    entry.id, entry.tier
                )));
            }
        }
        Ok(())
    }
}

impl Default for TerritoryCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn is_worldwide<S: AsRef<str>>(selected: &[S]) -> bool {
    selected.is_empty() || selected.iter().any(|id| id.as_ref() == WORLDWIDE_ID)
}

fn flatten(
    node: &TerritoryNode,
    parent: Option<&str>,
    index: &mut HashMap<String, TerritoryEntry>,
    duplicates: &mut Vec<String>,
) {
    let entry = TerritoryEntry {
        id: node.id.clone(),
        name: node.name.clone(),
        percentage: node.percentage,
        tier: node.tier,
        parent: parent.map(str::to_string),
        children: node.children.iter().map(|c| c.id.clone()).collect(),
    };
    if index.insert(node.id.clone(), entry).is_some() {
        duplicates.push(node.id.clone());
    }
    for child in &node.children {
        flatten(child, Some(&node.id), index, duplicates);
    }
}

/// An editable selection of territory ids
///
/// Picking `worldwide` clears everything else; picking a region drops
/// `worldwide`; an emptied selection falls back to `worldwide`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerritorySelection {
    ids: Vec<String>,
}

impl TerritorySelection {
    pub fn new<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut selection = Self { ids: Vec::new() };
        for id in ids {
            let id = id.into();
            if !selection.ids.contains(&id) {
                selection.ids.push(id);
            }
        }
        if selection.ids.is_empty() {
            return Self::default();
        }
        selection
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|s| s == id)
    }

    pub fn toggle(&mut self, id: &str) {
        if id == WORLDWIDE_ID {
            *self = Self::default();
            return;
        }

        self.ids.retain(|s| s != WORLDWIDE_ID);
        if let Some(pos) = self.ids.iter().position(|s| s == id) {
            self.ids.remove(pos);
        } else {
            self.ids.push(id.to_string());
        }

        if self.ids.is_empty() {
            *self = Self::default();
        }
    }

    pub fn into_ids(self) -> Vec<String> {
        self.ids
    }
}

impl Default for TerritorySelection {
    fn default() -> Self {
        Self {
            ids: vec![WORLDWIDE_ID.to_string()],
        }
    }
}

// ============================================================
// Built-in territory data
// ============================================================

#[derive(Debug, Clone, Copy)]
struct TerritorySeed {
    id: &'static str,
    name: &'static str,
    percentage: f64,
    tier: u8,
    children: &'static [TerritorySeed],
}

const fn leaf(id: &'static str, name: &'static str, percentage: f64, tier: u8) -> TerritorySeed {
    TerritorySeed {
        id,
        name,
        percentage,
        tier,
        children: &[],
    }
}

const fn region(
    id: &'static str,
    name: &'static str,
    percentage: f64,
    tier: u8,
    children: &'static [TerritorySeed],
) -> TerritorySeed {
    TerritorySeed {
        id,
        name,
        percentage,
        tier,
        children,
    }
}

const US_STATES: &[TerritorySeed] = &[
    leaf("us-ca", "California", 7.28, 1),
    leaf("us-ny", "New York", 3.53, 1),
    leaf("us-fl", "Florida", 1.32, 1),
    leaf("us-tx", "Texas", 1.16, 1),
    leaf("us-tn", "Tennessee", 1.06, 1),
    leaf("us-pa", "Pennsylvania", 0.91, 1),
    leaf("us-il", "Illinois", 0.75, 1),
    leaf("us-ga", "Georgia", 0.68, 1),
    leaf("us-oh", "Ohio", 0.54, 1),
    leaf("us-nc", "North Carolina", 0.51, 1),
    leaf("us-nj", "New Jersey", 0.48, 1),
    leaf("us-va", "Virginia", 0.45, 1),
    leaf("us-wa", "Washington", 0.42, 1),
    leaf("us-ma", "Massachusetts", 0.39, 1),
    leaf("us-mi", "Michigan", 0.36, 1),
    leaf("us-co", "Colorado", 0.33, 1),
    leaf("us-az", "Arizona", 0.30, 1),
    leaf("us-md", "Maryland", 0.27, 1),
    leaf("us-in", "Indiana", 0.24, 1),
    leaf("us-mo", "Missouri", 0.21, 1),
    leaf("us-wi", "Wisconsin", 0.18, 1),
    leaf("us-mn", "Minnesota", 0.17, 1),
    leaf("us-or", "Oregon", 0.15, 1),
    leaf("us-sc", "South Carolina", 0.14, 1),
    leaf("us-al", "Alabama", 0.12, 1),
    leaf("us-la", "Louisiana", 0.11, 1),
    leaf("us-ky", "Kentucky", 0.11, 1),
    leaf("us-ct", "Connecticut", 0.10, 1),
    leaf("us-ok", "Oklahoma", 0.09, 1),
    leaf("us-ia", "Iowa", 0.08, 1),
    leaf("us-ut", "Utah", 0.08, 1),
    leaf("us-nv", "Nevada", 0.08, 1),
    leaf("us-ks", "Kansas", 0.07, 1),
    leaf("us-ar", "Arkansas", 0.06, 1),
    leaf("us-ms", "Mississippi", 0.06, 1),
    leaf("us-ne", "Nebraska", 0.05, 1),
    leaf("us-nm", "New Mexico", 0.05, 1),
    leaf("us-hi", "Hawaii", 0.05, 1),
    leaf("us-wv", "West Virginia", 0.04, 1),
    leaf("us-id", "Idaho", 0.04, 1),
    leaf("us-nh", "New Hampshire", 0.04, 1),
    leaf("us-me", "Maine", 0.03, 1),
    leaf("us-de", "Delaware", 0.03, 1),
    leaf("us-ri", "Rhode Island", 0.03, 1),
    leaf("us-mt", "Montana", 0.02, 1),
    leaf("us-sd", "South Dakota", 0.02, 1),
    leaf("us-nd", "North Dakota", 0.02, 1),
    leaf("us-ak", "Alaska", 0.02, 1),
    leaf("us-vt", "Vermont", 0.01, 1),
    leaf("us-wy", "Wyoming", 0.01, 1),
];

const NORTH_AMERICA: &[TerritorySeed] = &[
    region("usa", "United States", 30.0, 1, US_STATES),
    leaf("canada", "Canada", 5.0, 1),
];

const WESTERN_EUROPE: &[TerritorySeed] = &[
    leaf("uk", "United Kingdom", 8.0, 2),
    leaf("germany", "Germany", 6.0, 2),
    leaf("france", "France", 5.0, 2),
    leaf("spain", "Spain", 3.0, 2),
    leaf("italy", "Italy", 3.0, 2),
];

const ASIA_PACIFIC_DEVELOPED: &[TerritorySeed] = &[
    leaf("japan", "Japan", 8.0, 3),
    leaf("australia", "Australia", 5.0, 3),
    leaf("south-korea", "South Korea", 4.0, 3),
    leaf("singapore", "Singapore", 2.0, 3),
    leaf("new-zealand", "New Zealand", 1.0, 3),
];

const LATIN_AMERICA: &[TerritorySeed] = &[
    leaf("brazil", "Brazil", 4.0, 4),
    leaf("mexico", "Mexico", 3.0, 4),
    leaf("argentina", "Argentina", 1.5, 4),
    leaf("colombia", "Colombia", 0.75, 4),
    leaf("chile", "Chile", 0.5, 4),
    leaf("latam-other", "Rest of Latin America", 0.25, 4),
];

const ASIA_PACIFIC_EMERGING: &[TerritorySeed] = &[
    leaf("china", "China", 3.0, 4),
    leaf("india", "India", 2.0, 4),
    leaf("indonesia", "Indonesia", 0.5, 4),
    leaf("philippines", "Philippines", 0.25, 4),
    leaf("thailand", "Thailand", 0.25, 4),
];

const MIDDLE_EAST_NORTH_AFRICA: &[TerritorySeed] = &[
    leaf("uae-saudi", "UAE & Saudi Arabia", 1.0, 5),
    leaf("turkey", "Turkey", 0.5, 5),
    leaf("mena-other", "Rest of MENA", 0.5, 5),
];

const EASTERN_EUROPE: &[TerritorySeed] = &[
    leaf("poland", "Poland", 0.5, 5),
    leaf("russia", "Russia", 0.25, 5),
    leaf("eastern-europe-other", "Rest of Eastern Europe", 0.25, 5),
];

const AFRICA: &[TerritorySeed] = &[
    leaf("south-africa", "South Africa", 0.5, 5),
    leaf("nigeria", "Nigeria", 0.25, 5),
    leaf("africa-other", "Rest of Africa", 0.25, 5),
];

const TERRITORY_SEEDS: &[TerritorySeed] = &[
    leaf(WORLDWIDE_ID, "Worldwide (All Territories)", 100.0, 1),
    region("north-america", "North America", 35.0, 1, NORTH_AMERICA),
    region("western-europe", "Western Europe", 25.0, 2, WESTERN_EUROPE),
    region("asia-pacific-developed", "Asia-Pacific (Developed)", 20.0, 3, ASIA_PACIFIC_DEVELOPED),
    region("latin-america", "Latin America", 10.0, 4, LATIN_AMERICA),
    region("asia-pacific-emerging", "Asia-Pacific (Emerging)", 6.0, 4, ASIA_PACIFIC_EMERGING),
    region("middle-east-north-africa", "Middle East & North Africa", 2.0, 5, MIDDLE_EAST_NORTH_AFRICA),
    region("eastern-europe", "Eastern Europe", 1.0, 5, EASTERN_EUROPE),
    region("africa", "Africa", 1.0, 5, AFRICA),
];

impl From<&TerritorySeed> for TerritoryNode {
    fn from(seed: &TerritorySeed) -> Self {
        Self {
            id: seed.id.to_string(),
            name: seed.name.to_string(),
            percentage: seed.percentage,
            tier: seed.tier,
            children: seed.children.iter().map(TerritoryNode::from).collect(),
        }
    }
}

/// Owned copy of the built-in territory tree
pub fn default_territories() -> Vec<TerritoryNode> {
    TERRITORY_SEEDS.iter().map(TerritoryNode::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, percentage: f64, children: Vec<TerritoryNode>) -> TerritoryNode {
        TerritoryNode {
            id: id.to_string(),
            name: id.to_uppercase(),
            percentage,
            tier: 1,
            children,
        }
    }

    #[test]
    fn test_flatten_indexes_every_depth() {
        let catalog = TerritoryCatalog::builtin();
        let state = catalog.get("us-wy").unwrap();
        assert_eq!(state.parent.as_deref(), Some("usa"));
        assert_eq!(catalog.get("usa").unwrap().parent.as_deref(), Some("north-america"));
        assert!(catalog.get("atlantis").is_none());
    }

    #[test]
    fn test_parent_check_is_one_level_deep() {
        let catalog = TerritoryCatalog::builtin();
        // us-ca is a grandchild of north-america, so north-america still counts
        let coverage = catalog.coverage_percent(&["north-america", "us-ca"]);
        assert!((coverage - 42.28).abs() < 1e-9);
    }

    #[test]
    fn test_duplicate_ids_counted_once() {
        let catalog = TerritoryCatalog::builtin();
        assert_eq!(catalog.coverage_percent(&["canada", "canada"]), 5.0);
    }

    #[test]
    fn test_coverage_capped_at_100() {
        let catalog = TerritoryCatalog::new(vec![node("a", 70.0, vec![]), node("b", 60.0, vec![])]);
        assert_eq!(catalog.coverage_percent(&["a", "b"]), 100.0);
    }

    #[test]
    fn test_validate_detects_duplicates() {
        let catalog = TerritoryCatalog::new(vec![
            node("a", 10.0, vec![node("x", 1.0, vec![])]),
            node("b", 10.0, vec![node("x", 2.0, vec![])]),
        ]);
        assert_eq!(
            catalog.validate().unwrap_err().to_string(),
            "Configuration error: Duplicate territory id: x"
        );
    }

    #[test]
    fn test_validate_rejects_bad_percentage() {
        let catalog = TerritoryCatalog::new(vec![node("a", 120.0, vec![])]);
        assert!(catalog.validate().unwrap_err().to_string().contains("between 0 and 100"));
    }

    #[test]
    fn test_builtin_tree_is_valid() {
        assert!(TerritoryCatalog::builtin().validate().is_ok());
    }

    #[test]
    fn test_selection_toggle_rules() {
        let mut selection = TerritorySelection::default();
        selection.toggle("uk");
        assert_eq!(selection.ids(), ["uk".to_string()]);

        selection.toggle("japan");
        assert_eq!(selection.ids().len(), 2);

        selection.toggle("uk");
        selection.toggle("japan");
        assert_eq!(selection, TerritorySelection::default());

        selection.toggle("france");
        selection.toggle(WORLDWIDE_ID);
        assert_eq!(selection.ids(), [WORLDWIDE_ID.to_string()]);
    }

    #[test]
    fn test_selection_new_dedupes_and_defaults() {
        let selection = TerritorySelection::new(["uk", "uk", "spain"]);
        assert_eq!(selection.ids().len(), 2);
        assert_eq!(TerritorySelection::new(Vec::<String>::new()), TerritorySelection::default());
    }
}
