/// Application configuration
///
/// Settings are read once at start-up (from the environment, through an
/// injectable lookup) and passed down explicitly. The session file that
/// remembers the current user also lives here.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Unit;

/// A date string did not match the configured pattern
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    #[error("invalid date '{input}': use {expected} format")]
    InvalidDate { input: String, expected: &'static str },
}

/// Errors reading or writing local configuration files
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid session file: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Could not determine a home directory for {0}")]
    NoHomeDirectory(&'static str),
}

/// The supported textual date patterns for input and display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateFormat {
    #[default]
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
    DayMonthYearSlash,
    MonthDayYearSlash,
    YearMonthDaySlash,
}

impl DateFormat {
    pub const ALL: [DateFormat; 6] = [
        DateFormat::DayMonthYear,
        DateFormat::MonthDayYear,
        DateFormat::YearMonthDay,
        DateFormat::DayMonthYearSlash,
        DateFormat::MonthDayYearSlash,
        DateFormat::YearMonthDaySlash,
    ];

    /// Human readable pattern name, as used in configuration
    pub fn name(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "dd-mm-yyyy",
            DateFormat::MonthDayYear => "mm-dd-yyyy",
            DateFormat::YearMonthDay => "yyyy-mm-dd",
            DateFormat::DayMonthYearSlash => "dd/mm/yyyy",
            DateFormat::MonthDayYearSlash => "mm/dd/yyyy",
            DateFormat::YearMonthDaySlash => "yyyy/mm/dd",
        }
    }

    fn pattern(&self) -> &'static str {
        match self {
            DateFormat::DayMonthYear => "%d-%m-%Y",
            DateFormat::MonthDayYear => "%m-%d-%Y",
            DateFormat::YearMonthDay => "%Y-%m-%d",
            DateFormat::DayMonthYearSlash => "%d/%m/%Y",
            DateFormat::MonthDayYearSlash => "%m/%d/%Y",
            DateFormat::YearMonthDaySlash => "%Y/%m/%d",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.name() == name)
    }

    pub fn parse(&self, input: &str) -> Result<NaiveDate, FormatError> {
        NaiveDate::parse_from_str(input.trim(), self.pattern()).map_err(|_| FormatError::InvalidDate {
            input: input.to_string(),
            expected: self.name(),
        })
    }

    pub fn format(&self, date: NaiveDate) -> String {
        date.format(self.pattern()).to_string()
    }

    /// Format an optional date, with a placeholder for "no date"
    pub fn format_optional(&self, date: Option<NaiveDate>) -> String {
        date.map(|d| self.format(d)).unwrap_or_else(|| "no date".to_string())
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Process-wide settings, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Pattern for dates typed on the command line
    pub input_format: DateFormat,
    /// Pattern for dates shown to the user
    pub display_format: DateFormat,
    /// Unit applied to new entries that don't name one
    pub default_unit: Unit,
    /// Explicit database location, if configured
    pub database_path: Option<PathBuf>,
    /// Explicit session file location, if configured
    pub session_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            input_format: DateFormat::default(),
            display_format: DateFormat::default(),
            default_unit: Unit::Kg,
            database_path: None,
            session_path: None,
        }
    }
}

impl AppConfig {
    /// Build the configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_env_fn(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    ///
    /// Unknown date patterns and units fall back to the defaults.
    pub fn from_env_fn<F>(get_env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| get_env(key).filter(|v| !v.is_empty());
        let mut config = Self::default();

        if let Some(name) = lookup("DATE_INPUT_FORMAT") {
            match DateFormat::from_name(&name) {
                Some(format) => config.input_format = format,
                None => tracing::warn!("Unknown DATE_INPUT_FORMAT '{}', using {}", name, config.input_format),
            }
        }

        if let Some(name) = lookup("DATE_DISPLAY_FORMAT") {
            match DateFormat::from_name(&name) {
                Some(format) => config.display_format = format,
                None => tracing::warn!("Unknown DATE_DISPLAY_FORMAT '{}', using {}", name, config.display_format),
            }
        }

        if let Some(unit) = lookup("DEFAULT_UNIT") {
            match unit.parse::<Unit>() {
                Ok(unit) => config.default_unit = unit,
                Err(_) => tracing::warn!("Unknown DEFAULT_UNIT '{}', using {}", unit, config.default_unit),
            }
        }

        config.database_path = lookup("DATABASE_PATH").map(PathBuf::from);
        config.session_path = lookup("WEIGHT_TRACKER_SESSION").map(PathBuf::from);

        config
    }

    /// Parse a date typed by the user
    pub fn parse_date(&self, input: &str) -> Result<NaiveDate, FormatError> {
        self.input_format.parse(input)
    }

    /// Format a date for the user
    pub fn format_date(&self, date: Option<NaiveDate>) -> String {
        self.display_format.format_optional(date)
    }

    /// Location of the session file
    pub fn resolve_session_path(&self) -> Result<PathBuf, ConfigError> {
        if let Some(path) = &self.session_path {
            return Ok(path.clone());
        }
        dirs::home_dir()
            .map(|home| home.join(".weighttracker.json"))
            .ok_or(ConfigError::NoHomeDirectory("the session file"))
    }
}

/// Get the default database path with robust fallback strategy
pub fn default_database_path() -> Result<PathBuf, ConfigError> {
    // Try various locations in order of preference
    let potential_paths = [
        dirs::home_dir().map(|p| p.join(".weight_tracker")),
        dirs::data_dir().map(|p| p.join("weight_tracker")),
        dirs::config_dir().map(|p| p.join("weight_tracker")),
        std::env::current_dir().ok().map(|p| p.join(".weight_tracker")),
    ];

    for potential_path in potential_paths.iter().flatten() {
        if fs::create_dir_all(potential_path).is_ok() && is_writable(potential_path) {
            return Ok(potential_path.join("weights.db"));
        }
    }

    // Ultimate fallback: use a temporary directory
    let temp_path = std::env::temp_dir().join("weight_tracker");
    fs::create_dir_all(&temp_path)?;

    tracing::warn!("Using temporary directory for database: {}", temp_path.display());
    Ok(temp_path.join("weights.db"))
}

fn is_writable(dir: &Path) -> bool {
    let test_file = dir.join(".test_write");
    if fs::write(&test_file, "test").is_ok() {
        let _ = fs::remove_file(&test_file);
        return true;
    }
    false
}

/// Remembers which user is logged in between invocations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub current_user_name: Option<String>,
}

impl Session {
    /// Read the session file; a missing file is an empty session
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        tracing::debug!("Saved session to {}", path.display());
        Ok(())
    }
}
