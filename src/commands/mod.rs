/// Command handlers behind the CLI
///
/// Each handler takes a store plus typed parameters and returns a typed
/// response. Handlers never print or prompt; the binary does both.

pub mod add;
pub mod delete;
pub mod list;
pub mod stats;
pub mod update;
pub mod user;

// Re-export handler functions for easy access
pub use add::*;
pub use delete::*;
pub use list::*;
pub use stats::*;
pub use update::*;
pub use user::*;

use chrono::NaiveDate;

use crate::config::{AppConfig, FormatError};

/// Parse an optional user-supplied date; absent or blank text means no date
pub(crate) fn parse_optional_date(
    config: &AppConfig,
    input: Option<&str>,
) -> Result<Option<NaiveDate>, FormatError> {
    match input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(text) => config.parse_date(text).map(Some),
        None => Ok(None),
    }
}
