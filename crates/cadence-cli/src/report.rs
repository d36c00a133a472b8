//! Plain-text rendering of aggregate tables

use cadence_analysis::{DailySeries, HourFrequencyTable};

/// Days of the smoothed series shown in the trend report
const TAIL_DAYS: usize = 14;

/// Render the category x hour-of-day table.
pub fn render_frequency_table(table: &HourFrequencyTable) -> String {
    let mut out = String::new();

    out.push_str(&format!("{:<24}", "category"));
    for hour in 0..24 {
        out.push_str(&format!("{:>5}", hour));
    }
    out.push('\n');

    for (category, counts) in table.rows() {
        out.push_str(&format!("{:<24}", display_label(category)));
        for count in counts {
            out.push_str(&format!("{:>5}", count));
        }
        out.push('\n');
    }

    if table.categories().is_empty() {
        out.push_str("(no categories)\n");
    }

    out
}

/// Render the tail of a smoothed daily series as hours per day.
pub fn render_series_tail(category: &str, smoothed: &DailySeries, window: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Daily hours for {} ({}-day rolling mean):\n",
        display_label(category),
        window
    ));

    if smoothed.is_empty() {
        out.push_str("(no data)\n");
        return out;
    }

    let skip = smoothed.len().saturating_sub(TAIL_DAYS);
    for (date, seconds) in smoothed.dates.iter().zip(&smoothed.values).skip(skip) {
        out.push_str(&format!("  {}  {:>6.2}\n", date, seconds / 3600.0));
    }

    out
}

/// Category with the highest total event count.
pub fn busiest_category(table: &HourFrequencyTable) -> Option<&str> {
    table
        .rows()
        .max_by_key(|(_, counts)| counts.iter().sum::<u64>())
        .map(|(category, _)| category)
}

/// Empty labels are a real category; give them a printable name.
fn display_label(category: &str) -> &str {
    if category.is_empty() {
        "(unlabeled)"
    } else {
        category
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::CanonicalEvent;
    use cadence_taxonomy::CategorizedEvent;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn categorized(category: &str, hour: u32) -> CategorizedEvent {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, hour, 0, 0).unwrap();
        CategorizedEvent {
            category: category.to_string(),
            event: CanonicalEvent::new(category, start, start + chrono::Duration::minutes(30))
                .unwrap(),
        }
    }

    #[test]
    fn test_frequency_table_lists_every_category() {
        let events = vec![categorized("Work", 9), categorized("", 22)];
        let table = HourFrequencyTable::build(&["Work", ""], &events);
        let rendered = render_frequency_table(&table);

        assert!(rendered.contains("Work"));
        assert!(rendered.contains("(unlabeled)"));
    }

    #[test]
    fn test_busiest_category() {
        let events = vec![
            categorized("Work", 9),
            categorized("Work", 10),
            categorized("Gym", 18),
        ];
        let table = HourFrequencyTable::build(&["Work", "Gym"], &events);

        assert_eq!(busiest_category(&table), Some("Work"));
    }

    #[test]
    fn test_series_tail_handles_empty() {
        let series = DailySeries {
            dates: vec![],
            values: vec![],
        };
        let rendered = render_series_tail("Work", &series, 14);
        assert!(rendered.contains("(no data)"));
    }

    #[test]
    fn test_series_tail_shows_last_days_only() {
        let dates: Vec<NaiveDate> = (1..=20)
            .map(|d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap())
            .collect();
        let values = vec![3600.0; 20];
        let series = DailySeries { dates, values };

        let rendered = render_series_tail("Work", &series, 14);
        assert!(!rendered.contains("2024-03-01"));
        assert!(rendered.contains("2024-03-20"));
    }
}
