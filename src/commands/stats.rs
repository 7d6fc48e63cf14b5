/// Handler for summary statistics

use serde::Deserialize;

use crate::analytics::WeightStatistics;
use crate::domain::{ListOptions, SortDirection, SortKey, UserId};
use crate::storage::WeightStore;
use crate::AppError;

/// Parameters for computing statistics
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsParams {
    pub owner: Option<UserId>,
}

/// Compute statistics over every visible entry, oldest first
///
/// An empty store yields zeroed statistics rather than an error.
pub fn compute_stats<S: WeightStore>(
    store: &S,
    params: StatsParams,
) -> Result<WeightStatistics, AppError> {
    let mut options = ListOptions::default().sorted_by(SortKey::Date, SortDirection::Ascending);
    if let Some(owner) = params.owner {
        options = options.owned_by(owner);
    }

    let entries = store.list(&options)?;
    tracing::debug!("Computing statistics over {} entries", entries.len());

    Ok(WeightStatistics::from_entries(&entries))
}
