/// In-process evaluation of `ListOptions`.
///
/// The SQLite store pushes these stages down into SQL; this is the
/// reference behaviour the in-memory store runs directly.

use std::cmp::Ordering;

use crate::domain::{ListOptions, SortDirection, SortKey, WeightEntry};

/// Apply filters, a stable sort and the limit, in that order
pub fn apply_list_options(mut entries: Vec<WeightEntry>, options: &ListOptions) -> Vec<WeightEntry> {
    entries.retain(|entry| within_date_range(entry, options) && matches_filters(entry, options));

    // `sort_by` is stable, so ties keep their insertion order in both directions
    entries.sort_by(|a, b| {
        let ordering = compare_by(a, b, options.sort_by);
        match options.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });

    if options.limit > 0 {
        entries.truncate(options.limit);
    }

    entries
}

/// Inclusive date bounds; undated entries never match an active bound
fn within_date_range(entry: &WeightEntry, options: &ListOptions) -> bool {
    if !options.has_date_filter() {
        return true;
    }

    let Some(date) = entry.date else {
        return false;
    };

    options.from_date.map_or(true, |from| date >= from)
        && options.to_date.map_or(true, |to| date <= to)
}

fn matches_filters(entry: &WeightEntry, options: &ListOptions) -> bool {
    if let Some(unit) = options.unit {
        if entry.unit != Some(unit) {
            return false;
        }
    }
    if let Some(owner) = options.owner {
        if entry.owner != Some(owner) {
            return false;
        }
    }
    true
}

/// Undated entries order before any real date
fn compare_by(a: &WeightEntry, b: &WeightEntry, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Weight => a.weight.total_cmp(&b.weight),
    }
}
