/// Handler for recording a new weight entry

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::commands::parse_optional_date;
use crate::config::AppConfig;
use crate::domain::{NewEntry, Unit, UserId, WeightEntry};
use crate::storage::WeightStore;
use crate::AppError;

/// Parameters for adding an entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddParams {
    pub weight: f64,
    /// Date in the configured input format; defaults to today
    pub date: Option<String>,
    /// "kg" or "lbs"; defaults to the configured unit
    pub unit: Option<String>,
    pub note: Option<String>,
    pub owner: Option<UserId>,
}

/// Response from adding an entry
#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub entry: WeightEntry,
    pub message: String,
}

/// Validate and persist a new entry
///
/// Validation happens here rather than relying on the store, since not
/// every store validates on `add`.
pub fn add_entry<S: WeightStore>(
    store: &S,
    config: &AppConfig,
    params: AddParams,
) -> Result<AddResponse, AppError> {
    let date = parse_optional_date(config, params.date.as_deref())?
        .unwrap_or_else(|| Local::now().date_naive());

    let unit = Unit::parse_optional(params.unit.as_deref().unwrap_or("").trim())?
        .unwrap_or(config.default_unit);

    let mut new_entry = NewEntry::new(params.weight, Some(date), Some(unit), params.note)?;
    if let Some(owner) = params.owner {
        new_entry = new_entry.owned_by(owner);
    }

    let entry = store.add(new_entry)?;
    tracing::debug!("Added weight entry {} ({} {})", entry.id, entry.weight, unit);

    let message = format!(
        "Added weight entry with ID {}: {:.2} {} on {}",
        entry.id,
        entry.weight,
        unit,
        config.format_date(entry.date)
    );

    Ok(AddResponse { entry, message })
}
