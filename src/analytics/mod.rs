/// Summary statistics over weight entries
///
/// Aggregates a snapshot of entries into min/max/average weight and the
/// time span between the earliest and latest dated entries. Entries without
/// a real date still count towards the weight aggregates.

use chrono::TimeDelta;
use serde::Serialize;

use crate::domain::WeightEntry;

/// Aggregated weight statistics, recomputed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightStatistics {
    pub min_weight: f64,
    /// First entry seen with the minimum weight
    pub min_entry: Option<WeightEntry>,
    pub max_weight: f64,
    /// First entry seen with the maximum weight
    pub max_entry: Option<WeightEntry>,
    /// Arithmetic mean, unrounded
    pub average_weight: f64,
    pub total_entries: usize,
    /// max - min, never negative
    pub weight_range: f64,
    /// Time between the earliest and latest validly dated entries
    #[serde(skip)]
    pub time_span: TimeDelta,
    /// Earliest validly dated entry; the first entry when none is dated
    pub first_entry: Option<WeightEntry>,
    /// Latest validly dated entry; the first entry when none is dated
    pub last_entry: Option<WeightEntry>,
}

impl Default for WeightStatistics {
    fn default() -> Self {
        Self {
            min_weight: 0.0,
            min_entry: None,
            max_weight: 0.0,
            max_entry: None,
            average_weight: 0.0,
            total_entries: 0,
            weight_range: 0.0,
            time_span: TimeDelta::zero(),
            first_entry: None,
            last_entry: None,
        }
    }
}

impl WeightStatistics {
    /// Calculate statistics from a list of entries
    ///
    /// An empty list yields the all-zero default rather than an error.
    pub fn from_entries(entries: &[WeightEntry]) -> Self {
        let Some(first) = entries.first() else {
            return Self::default();
        };

        let mut min_entry = first;
        let mut max_entry = first;
        let mut earliest: Option<&WeightEntry> = None;
        let mut latest: Option<&WeightEntry> = None;
        let mut dated = 0usize;
        let mut total_weight = 0.0;

        for entry in entries {
            // Strict comparisons keep the first entry seen on ties
            if entry.weight < min_entry.weight {
                min_entry = entry;
            }
            if entry.weight > max_entry.weight {
                max_entry = entry;
            }

            if let Some(date) = entry.valid_date() {
                dated += 1;
                if earliest.and_then(WeightEntry::valid_date).map_or(true, |d| date < d) {
                    earliest = Some(entry);
                }
                if latest.and_then(WeightEntry::valid_date).map_or(true, |d| date > d) {
                    latest = Some(entry);
                }
            }

            total_weight += entry.weight;
        }

        let first_entry = earliest.unwrap_or(first);
        let last_entry = latest.unwrap_or(first);

        let time_span = match (first_entry.valid_date(), last_entry.valid_date()) {
            (Some(start), Some(end)) if dated > 1 => end - start,
            _ => TimeDelta::zero(),
        };

        Self {
            min_weight: min_entry.weight,
            min_entry: Some(min_entry.clone()),
            max_weight: max_entry.weight,
            max_entry: Some(max_entry.clone()),
            average_weight: total_weight / entries.len() as f64,
            total_entries: entries.len(),
            weight_range: max_entry.weight - min_entry.weight,
            time_span,
            first_entry: Some(first_entry.clone()),
            last_entry: Some(last_entry.clone()),
        }
    }

    /// Whole days covered by the dated entries
    pub fn span_days(&self) -> i64 {
        self.time_span.num_days()
    }

    pub fn is_empty(&self) -> bool {
        self.total_entries == 0
    }
}
