//! cadence-taxonomy: Self-extending fuzzy category taxonomy
//!
//! Maps free-text event labels onto canonical categories using approximate
//! string similarity, and grows the taxonomy in place when a label matches
//! nothing known.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cadence_taxonomy::Taxonomy;
//!
//! let mut taxonomy = Taxonomy::from_config(&config.categories);
//! let category = taxonomy.resolve("Weekly standup");
//! ```

pub mod taxonomy;

pub use taxonomy::{CategorizedEvent, Category, Taxonomy, MATCH_THRESHOLD};
