/// Domain module containing core data types and validation rules
///
/// This module defines the core entities (WeightEntry, User) and the
/// query/patch value types the storage layer works with. These types
/// represent the fundamental concepts in the weight tracker.

pub mod entry;
pub mod types;
pub mod user;

// Re-export public types for easy access
pub use entry::*;
pub use types::*;
pub use user::*;

use thiserror::Error;

/// Errors that can occur during domain operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("weight must be greater than 0, got: {0}")]
    InvalidWeight(f64),

    #[error("date must fall within years {min} to {max}, got: {0}", min = MIN_YEAR, max = MAX_YEAR)]
    DateOutOfRange(chrono::NaiveDate),

    #[error("unit must be 'kg' or 'lbs', got: {0}")]
    InvalidUnit(String),

    #[error("invalid ID: {0}")]
    InvalidId(i64),

    #[error("invalid sort column '{0}': must be 'date' or 'weight'")]
    InvalidSortKey(String),

    #[error("invalid username: {0}")]
    InvalidUsername(String),
}
