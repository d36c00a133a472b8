//! Category taxonomy and fuzzy label resolution

use serde::{Deserialize, Serialize};
use tracing::debug;

use cadence_core::config::CategoryConfig;
use cadence_core::event::CanonicalEvent;

/// Similarity score (0-100) a label must strictly exceed to match an alias.
///
/// Carried over from the source system; a tunable, not a proven constant.
pub const MATCH_THRESHOLD: f64 = 80.0;

/// One canonical category and its known label variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Canonical name events are grouped under
    pub name: String,
    /// Alias list, in insertion order; always contains `name` itself
    pub aliases: Vec<String>,
}

impl Category {
    fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let aliases = vec![name.clone()];
        Self { name, aliases }
    }
}

/// Ordered category taxonomy.
///
/// Mutable state scoped to one categorization run: callers build it from
/// configuration, resolve a batch of labels against it, and persist or
/// discard it explicitly. Within a run it only ever grows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

/// A canonical event paired with its resolved category.
///
/// Computed per run and never persisted; the underlying event is unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorizedEvent {
    pub category: String,
    pub event: CanonicalEvent,
}

impl Taxonomy {
    /// Create an empty taxonomy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a taxonomy from configured seed categories.
    ///
    /// Each category is seeded with its own name as the first alias, then
    /// the configured aliases in file order.
    pub fn from_config(categories: &[CategoryConfig]) -> Self {
        let categories = categories
            .iter()
            .map(|c| {
                let mut category = Category::new(&c.name);
                for alias in &c.aliases {
                    if *alias != c.name {
                        category.aliases.push(alias.clone());
                    }
                }
                category
            })
            .collect();
        Self { categories }
    }

    /// Categories in insertion order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Canonical category names in insertion order.
    pub fn category_names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Resolve a label to a canonical category name, growing the taxonomy
    /// when nothing matches.
    ///
    /// Categories are tried in insertion order, aliases in insertion order,
    /// and the first alias scoring strictly above [`MATCH_THRESHOLD`] wins.
    /// First-match is an observable tie-break: a later category is never
    /// chosen over an earlier one that clears the threshold, even if it
    /// would score higher.
    pub fn resolve(&mut self, label: &str) -> String {
        for category in &self.categories {
            for alias in &category.aliases {
                if similarity(label, alias) > MATCH_THRESHOLD {
                    return category.name.clone();
                }
            }
        }

        debug!("New category from unmatched label: {:?}", label);
        self.categories.push(Category::new(label));
        label.to_string()
    }

    /// Resolve a batch of events in sequence.
    pub fn categorize(&mut self, events: &[CanonicalEvent]) -> Vec<CategorizedEvent> {
        events
            .iter()
            .map(|event| CategorizedEvent {
                category: self.resolve(&event.label),
                event: event.clone(),
            })
            .collect()
    }
}

/// Normalized edit-distance ratio on a 0-100 scale.
fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b) * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn seed(entries: &[(&str, &[&str])]) -> Taxonomy {
        let configs: Vec<CategoryConfig> = entries
            .iter()
            .map(|(name, aliases)| CategoryConfig {
                name: name.to_string(),
                aliases: aliases.iter().map(|a| a.to_string()).collect(),
            })
            .collect();
        Taxonomy::from_config(&configs)
    }

    #[test]
    fn test_exact_alias_match() {
        let mut taxonomy = seed(&[("Work", &["standup", "planning"])]);
        assert_eq!(taxonomy.resolve("standup"), "Work");
        assert_eq!(taxonomy.len(), 1);
    }

    #[test]
    fn test_near_match_above_threshold() {
        let mut taxonomy = seed(&[("Exercise", &["morning run"])]);
        // One edit away from an 11-char alias scores well above 80
        assert_eq!(taxonomy.resolve("morning runs"), "Exercise");
    }

    #[test]
    fn test_threshold_is_strict() {
        let mut taxonomy = seed(&[("A", &["abcde"])]);
        // "abcdX" vs "abcde" is exactly 80.0, which must NOT match
        assert_eq!(taxonomy.resolve("abcdX"), "abcdX");
        assert_eq!(taxonomy.len(), 2);
    }

    #[test]
    fn test_first_match_beats_best_match() {
        let mut taxonomy = seed(&[("A", &["alpha"]), ("B", &["alph"])]);
        // Both clear the threshold for "alpha"; insertion order decides
        assert_eq!(taxonomy.resolve("alpha"), "A");
    }

    #[test]
    fn test_novel_label_creates_one_self_seeded_category() {
        let mut taxonomy = seed(&[("Work", &[])]);
        let category = taxonomy.resolve("Dentist appointment");

        assert_eq!(category, "Dentist appointment");
        assert_eq!(taxonomy.len(), 2);
        let created = &taxonomy.categories()[1];
        assert_eq!(created.name, "Dentist appointment");
        assert_eq!(created.aliases, vec!["Dentist appointment"]);
    }

    #[test]
    fn test_empty_label_is_its_own_category() {
        let mut taxonomy = Taxonomy::new();
        assert_eq!(taxonomy.resolve(""), "");
        assert_eq!(taxonomy.len(), 1);
        // Second empty label reuses the category instead of growing
        assert_eq!(taxonomy.resolve(""), "");
        assert_eq!(taxonomy.len(), 1);
    }

    #[test]
    fn test_resolution_is_deterministic_and_idempotent() {
        let labels = ["standup", "Standup notes", "gym", "standup", "gym session"];

        let run = || {
            let mut taxonomy = seed(&[("Work", &["standup"])]);
            let assigned: Vec<String> = labels.iter().map(|l| taxonomy.resolve(l)).collect();
            (assigned, taxonomy)
        };

        let (first_assigned, first_taxonomy) = run();
        let (second_assigned, second_taxonomy) = run();

        assert_eq!(first_assigned, second_assigned);
        assert_eq!(first_taxonomy, second_taxonomy);
    }

    #[test]
    fn test_config_seeding_keeps_name_as_alias() {
        let taxonomy = seed(&[("Work", &["standup", "Work"])]);
        let category = &taxonomy.categories()[0];
        assert_eq!(category.aliases, vec!["Work", "standup"]);
    }

    #[test]
    fn test_categorize_batch() {
        let mut taxonomy = seed(&[("Work", &["standup"])]);
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let events = vec![
            CanonicalEvent::new("standup", start, start + chrono::Duration::minutes(15)).unwrap(),
            CanonicalEvent::new("piano", start, start + chrono::Duration::hours(1)).unwrap(),
        ];

        let categorized = taxonomy.categorize(&events);

        assert_eq!(categorized.len(), 2);
        assert_eq!(categorized[0].category, "Work");
        assert_eq!(categorized[1].category, "piano");
        assert_eq!(categorized[1].event.label, "piano");
        assert_eq!(taxonomy.len(), 2);
    }
}
