/// WeightEntry entity for recorded measurements
///
/// This module defines the WeightEntry struct that represents a single
/// weight measurement, the NewEntry value used to create one, and the
/// EntryPatch used for partial updates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, EntryId, Unit, UserId};

/// A single recorded weight measurement
///
/// `date` is `None` when no date was recorded. That state is distinct from
/// every real calendar date and is skipped by chronological ordering and
/// time span calculations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightEntry {
    /// Store-assigned identifier, immutable once persisted
    pub id: EntryId,
    /// Magnitude of the measurement, always greater than zero
    pub weight: f64,
    /// Day the measurement was taken
    pub date: Option<NaiveDate>,
    /// Unit of `weight`; `None` means the configured default applies
    pub unit: Option<Unit>,
    /// Free text annotation
    pub note: Option<String>,
    /// User the entry belongs to
    pub owner: Option<UserId>,
}

impl WeightEntry {
    /// Check the invariants every persisted entry must satisfy
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_weight(self.weight)?;
        validate_date(self.date)
    }

    /// The entry date, if it is a real calendar date
    ///
    /// Dates in year 1 or earlier are placeholders rather than measurements
    /// and are treated the same as a missing date.
    pub fn valid_date(&self) -> Option<NaiveDate> {
        self.date.filter(|d| d.year() > 1)
    }

    pub fn has_valid_date(&self) -> bool {
        self.valid_date().is_some()
    }

    pub fn has_note(&self) -> bool {
        self.note.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Data for an entry that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewEntry {
    pub weight: f64,
    pub date: Option<NaiveDate>,
    pub unit: Option<Unit>,
    pub note: Option<String>,
    pub owner: Option<UserId>,
}

impl NewEntry {
    /// Create a new entry with validation
    pub fn new(
        weight: f64,
        date: Option<NaiveDate>,
        unit: Option<Unit>,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_weight(weight)?;
        validate_date(date)?;

        Ok(Self {
            weight,
            date,
            unit,
            note: normalize_note(note),
            owner: None,
        })
    }

    pub fn owned_by(mut self, owner: UserId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        validate_weight(self.weight)?;
        validate_date(self.date)
    }

    /// Attach a store-assigned id
    pub fn into_entry(self, id: EntryId) -> WeightEntry {
        WeightEntry {
            id,
            weight: self.weight,
            date: self.date,
            unit: self.unit,
            note: normalize_note(self.note),
            owner: self.owner,
        }
    }
}

/// A partial update to an existing entry
///
/// Each field is "set or leave": `Some` replaces the stored value, `None`
/// keeps it. A field cannot be cleared through a patch, and an empty note
/// is treated as "leave".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntryPatch {
    pub id: EntryId,
    pub weight: Option<f64>,
    pub date: Option<NaiveDate>,
    pub unit: Option<Unit>,
    pub note: Option<String>,
    pub owner: Option<UserId>,
}

impl EntryPatch {
    /// An empty patch for the given entry
    pub fn new(id: EntryId) -> Self {
        Self {
            id,
            weight: None,
            date: None,
            unit: None,
            note: None,
            owner: None,
        }
    }

    /// Build a patch from a full entry using zero values as "leave"
    ///
    /// A weight of 0, a missing date, a missing unit, an empty note and a
    /// missing owner all leave the stored field untouched.
    pub fn sparse(entry: &WeightEntry) -> Self {
        Self {
            id: entry.id,
            weight: (entry.weight != 0.0).then_some(entry.weight),
            date: entry.date,
            unit: entry.unit,
            note: normalize_note(entry.note.clone()),
            owner: entry.owner,
        }
    }

    pub fn weight(mut self, weight: f64) -> Self {
        self.weight = Some(weight);
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn unit(mut self, unit: Unit) -> Self {
        self.unit = Some(unit);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// True when applying the patch would change nothing
    pub fn is_empty(&self) -> bool {
        self.weight.is_none()
            && self.date.is_none()
            && self.unit.is_none()
            && normalize_note(self.note.clone()).is_none()
            && self.owner.is_none()
    }

    /// Merge this patch over `existing` and validate the result
    ///
    /// Nothing is partially applied: either the whole merged entry is valid
    /// or an error is returned.
    pub fn apply_to(&self, existing: &WeightEntry) -> Result<WeightEntry, DomainError> {
        let mut merged = existing.clone();

        if let Some(weight) = self.weight {
            merged.weight = weight;
        }
        if let Some(date) = self.date {
            merged.date = Some(date);
        }
        if let Some(unit) = self.unit {
            merged.unit = Some(unit);
        }
        if let Some(note) = normalize_note(self.note.clone()) {
            merged.note = Some(note);
        }
        if let Some(owner) = self.owner {
            merged.owner = Some(owner);
        }

        merged.validate()?;
        Ok(merged)
    }
}

/// Validate a weight magnitude
pub fn validate_weight(weight: f64) -> Result<(), DomainError> {
    if !weight.is_finite() || weight <= 0.0 {
        return Err(DomainError::InvalidWeight(weight));
    }
    Ok(())
}

/// Earliest and latest years an entry date may carry
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Validate that a date stays within four-digit years
///
/// Stored dates are ISO text, and only four-digit years keep text order
/// equal to calendar order.
pub fn validate_date(date: Option<NaiveDate>) -> Result<(), DomainError> {
    match date {
        Some(d) if !(MIN_YEAR..=MAX_YEAR).contains(&d.year()) => {
            Err(DomainError::DateOutOfRange(d))
        }
        _ => Ok(()),
    }
}

fn normalize_note(note: Option<String>) -> Option<String> {
    note.filter(|n| !n.is_empty())
}
