//! Category x hour-of-day frequency table

use std::collections::HashMap;

use cadence_taxonomy::CategorizedEvent;

use crate::buckets::hour_buckets;

/// Frequency of events per (category, hour-of-day) cell.
///
/// Rows are categories in taxonomy order, columns are hours 0-23. Every
/// cell starts at zero, so a category with no events in a given hour reads
/// as 0 rather than being absent.
#[derive(Debug, Clone, PartialEq)]
pub struct HourFrequencyTable {
    categories: Vec<String>,
    counts: Vec<[u64; 24]>,
}

impl HourFrequencyTable {
    /// Build the table from the taxonomy's category list and a categorized
    /// event sequence.
    ///
    /// `categories` fixes the row set and order; an event whose category is
    /// somehow missing from it still gets a row appended at the end so no
    /// count is dropped.
    pub fn build<S: AsRef<str>>(categories: &[S], events: &[CategorizedEvent]) -> Self {
        let mut table = Self {
            categories: categories.iter().map(|c| c.as_ref().to_string()).collect(),
            counts: vec![[0u64; 24]; categories.len()],
        };

        let mut index: HashMap<String, usize> = table
            .categories
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i))
            .collect();

        for categorized in events {
            let row = match index.get(&categorized.category) {
                Some(&i) => i,
                None => {
                    table.categories.push(categorized.category.clone());
                    table.counts.push([0u64; 24]);
                    index.insert(categorized.category.clone(), table.counts.len() - 1);
                    table.counts.len() - 1
                }
            };

            for hour in hour_buckets(categorized.event.start, categorized.event.end) {
                table.counts[row][hour as usize] += 1;
            }
        }

        table
    }

    /// Row categories in order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Count for one (category, hour) cell; 0 for unknown categories.
    pub fn count(&self, category: &str, hour: u32) -> u64 {
        self.row(category).map_or(0, |row| row[hour as usize])
    }

    /// Full 24-hour row for a category.
    pub fn row(&self, category: &str) -> Option<&[u64; 24]> {
        self.categories
            .iter()
            .position(|c| c == category)
            .map(|i| &self.counts[i])
    }

    /// Iterate rows as (category, counts) pairs.
    pub fn rows(&self) -> impl Iterator<Item = (&str, &[u64; 24])> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.counts.iter())
    }
}
