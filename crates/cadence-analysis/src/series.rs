//! Daily duration series and rolling means

use chrono::NaiveDate;
use std::collections::BTreeMap;

use cadence_taxonomy::CategorizedEvent;

use crate::buckets::event_date;

/// Default trailing window for rolling means, in days.
pub const DEFAULT_ROLLING_WINDOW: usize = 14;

/// A gap-filled daily value series.
///
/// `dates` and `values` are parallel and cover every date of the requested
/// range; days with no activity hold an explicit 0.0. Smoothing over a
/// sparse series would silently shift window boundaries, so the gap-fill
/// happens here, before any windowed math.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub dates: Vec<NaiveDate>,
    pub values: Vec<f64>,
}

impl DailySeries {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Sum per-day durations for one category over an inclusive date range.
///
/// Events are grouped by their start date. Every date of the range appears
/// in the output, zero-filled where the category saw no activity. An empty
/// event sequence yields an all-zero series of the full range.
pub fn daily_durations(
    events: &[CategorizedEvent],
    category: &str,
    from: NaiveDate,
    to: NaiveDate,
) -> DailySeries {
    let mut sums: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for categorized in events {
        if categorized.category != category {
            continue;
        }
        let date = event_date(&categorized.event);
        if date < from || date > to {
            continue;
        }
        *sums.entry(date).or_insert(0.0) += categorized.event.duration_seconds;
    }

    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut date = from;
    while date <= to {
        dates.push(date);
        values.push(sums.get(&date).copied().unwrap_or(0.0));
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    DailySeries { dates, values }
}

/// Trailing rolling mean over a gap-filled daily series.
///
/// Each output point is the arithmetic mean of the current value and up to
/// `window - 1` prior values; the first points average over however many
/// days exist (min-periods of 1). Never looks ahead.
pub fn rolling_mean(series: &DailySeries, window: usize) -> DailySeries {
    let window = window.max(1);
    let mut values = Vec::with_capacity(series.values.len());

    for i in 0..series.values.len() {
        let lo = (i + 1).saturating_sub(window);
        let slice = &series.values[lo..=i];
        values.push(slice.iter().sum::<f64>() / slice.len() as f64);
    }

    DailySeries {
        dates: series.dates.clone(),
        values,
    }
}
