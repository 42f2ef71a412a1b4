//! Defines the user store trait.

use crate::{
    Error,
    models::{User, UserID, UserProfile},
};

/// Stores the users established by the external identity provider.
pub trait UserStore {
    /// Insert the user for `profile`, or refresh the stored profile if a user
    /// with the same external ID already exists.
    fn upsert(&mut self, profile: UserProfile) -> Result<User, Error>;

    /// Get a user by their ID.
    fn get(&self, user_id: UserID) -> Result<User, Error>;
}
