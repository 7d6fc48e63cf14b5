/// User entity used to associate entries with a person
///
/// There is no authentication: a user is just a named owner that the CLI
/// remembers as "current" between invocations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{DomainError, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with validation
    pub fn new(username: &str) -> Result<Self, DomainError> {
        let username = username.trim();
        Self::validate_username(username)?;

        Ok(Self {
            id: UserId::new(),
            username: username.to_string(),
            created_at: Utc::now(),
        })
    }

    fn validate_username(username: &str) -> Result<(), DomainError> {
        if username.is_empty() {
            return Err(DomainError::InvalidUsername(
                "username cannot be empty".to_string(),
            ));
        }
        if username.len() > 64 {
            return Err(DomainError::InvalidUsername(
                "username cannot be longer than 64 characters".to_string(),
            ));
        }
        if username.chars().any(char::is_whitespace) {
            return Err(DomainError::InvalidUsername(format!(
                "'{}' contains whitespace",
                username
            )));
        }
        Ok(())
    }
}
