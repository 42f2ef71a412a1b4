//! Defines the category store trait.

use std::collections::HashSet;

use crate::{
    Error,
    models::{Category, DatabaseID, NewCategory, UserID},
};

/// Creates and retrieves transaction categories.
pub trait CategoryStore {
    /// Create a new category and add it to the store.
    fn create(&mut self, category: NewCategory) -> Result<Category, Error>;

    /// Get a category by its ID.
    fn get(&self, category_id: DatabaseID) -> Result<Category, Error>;

    /// Get the categories matching `ids`.
    ///
    /// The result order is unspecified and unknown IDs are silently omitted,
    /// so the result may be shorter than `ids`.
    fn get_by_ids(&self, ids: &HashSet<DatabaseID>) -> Result<Vec<Category>, Error>;

    /// Get the built-in categories shared by all users.
    fn get_defaults(&self) -> Result<Vec<Category>, Error>;

    /// Get the custom categories created by `user_id`.
    fn get_by_user(&self, user_id: UserID) -> Result<Vec<Category>, Error>;

    /// Delete the custom category with `category_id` if it belongs to
    /// `user_id`.
    ///
    /// Built-in categories are never deleted: the ownership predicate must
    /// exclude them atomically, so a default ID yields [Error::NotFound] no
    /// matter which user asks.
    fn delete(&mut self, user_id: UserID, category_id: DatabaseID) -> Result<(), Error>;
}
