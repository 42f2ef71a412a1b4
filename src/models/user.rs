//! This file defines the `User` type.
//!
//! Users are established by an external identity provider. The application
//! never stores credentials, only the profile the provider vouched for.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::models::UserID;

/// A registered user of the application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// The ID of the user.
    pub id: UserID,
    /// The subject identifier assigned by the identity provider.
    pub external_id: String,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// A URL to the user's profile picture.
    pub picture: String,
    /// When the record was created. Set by the store.
    pub created_at: OffsetDateTime,
}

/// The profile an identity provider returns for a verified user.
///
/// Upserted into the user store when a session is established.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// The subject identifier assigned by the identity provider.
    pub external_id: String,
    /// The user's email address.
    pub email: String,
    /// The user's display name.
    pub name: String,
    /// A URL to the user's profile picture.
    pub picture: String,
}
