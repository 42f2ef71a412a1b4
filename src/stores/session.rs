//! Defines the session store trait.

use time::Duration;

use crate::{
    Error,
    models::{Session, UserID},
};

/// Stores the sessions of logged-in users.
pub trait SessionStore {
    /// Create a session for `user_id` that expires after `ttl`.
    fn create(&mut self, user_id: UserID, ttl: Duration) -> Result<Session, Error>;

    /// Get the session with `token`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no session with `token` exists. Expired
    /// sessions are still returned; the caller decides how to surface them.
    fn get_by_token(&self, token: &str) -> Result<Session, Error>;

    /// Delete the session with `token`. Deleting an unknown token is not an
    /// error.
    fn delete(&mut self, token: &str) -> Result<(), Error>;
}
