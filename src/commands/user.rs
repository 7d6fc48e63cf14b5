/// Handlers for users and the logged-in session
///
/// The session file only records a username. It is resolved against the
/// store on every invocation, so a reset or a missing user simply means
/// nobody is logged in.

use std::path::Path;

use serde::Serialize;

use crate::config::Session;
use crate::domain::User;
use crate::storage::{StorageError, UserStore};
use crate::AppError;

/// A registered user and whether they are the logged-in one
#[derive(Debug, Clone, Serialize)]
pub struct UserListing {
    pub user: User,
    pub current: bool,
}

/// Create a user and log them in
pub fn register_user<S: UserStore>(
    store: &S,
    session_path: &Path,
    username: &str,
) -> Result<User, AppError> {
    let user = User::new(username)?;
    store.create_user(&user)?;
    save_current(session_path, &user)?;
    Ok(user)
}

/// Switch the session to an existing user
pub fn login_user<S: UserStore>(
    store: &S,
    session_path: &Path,
    username: &str,
) -> Result<User, AppError> {
    let user = store.get_user_by_name(username.trim())?;
    save_current(session_path, &user)?;
    Ok(user)
}

/// Every user, ordered by name, with the logged-in one marked
pub fn list_registered_users<S: UserStore>(
    store: &S,
    session_path: &Path,
) -> Result<Vec<UserListing>, AppError> {
    let session = Session::load(session_path)?;
    let current = session.current_user_name.as_deref();

    Ok(store
        .list_users()?
        .into_iter()
        .map(|user| UserListing {
            current: current == Some(user.username.as_str()),
            user,
        })
        .collect())
}

/// The user named in the session file, if it still exists
pub fn current_user<S: UserStore>(store: &S, session_path: &Path) -> Result<Option<User>, AppError> {
    let session = Session::load(session_path)?;
    let Some(name) = session.current_user_name else {
        return Ok(None);
    };

    match store.get_user_by_name(&name) {
        Ok(user) => Ok(Some(user)),
        Err(StorageError::UserNotFound { .. }) => {
            tracing::warn!("Session user '{}' no longer exists, continuing without a user", name);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove all entries and users, and log out
pub fn reset_database<S: UserStore>(store: &S, session_path: &Path) -> Result<(), AppError> {
    store.reset()?;
    Session::default().save(session_path)?;
    Ok(())
}

fn save_current(session_path: &Path, user: &User) -> Result<(), AppError> {
    let session = Session {
        current_user_name: Some(user.username.clone()),
    };
    session.save(session_path)?;
    tracing::debug!("Logged in as {}", user.username);
    Ok(())
}
