//! This file defines the `Session` type used for cookie-based authentication.

use time::OffsetDateTime;

use crate::models::UserID;

/// A logged-in user's session.
///
/// The token is an opaque string handed to the client as a cookie and looked
/// up on every request. Sessions past `expires_at` are treated as absent.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The user this session belongs to.
    pub user_id: UserID,
    /// The opaque token stored in the session cookie.
    pub token: String,
    /// When this session stops being valid.
    pub expires_at: OffsetDateTime,
}

impl Session {
    /// Whether the session has passed its expiry time.
    pub fn is_expired(&self) -> bool {
        OffsetDateTime::now_utc() > self.expires_at
    }
}
