//! This file defines the `Category` type and the types needed to create one.
//! A category labels transactions with display metadata (name, icon, color).

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// The name of a category.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Hash)]
pub struct CategoryName(String);

impl CategoryName {
    /// Create a category name.
    ///
    /// # Errors
    ///
    /// This function will return an error if `name` is an empty string.
    pub fn new(name: &str) -> Result<Self, Error> {
        if name.is_empty() {
            Err(Error::EmptyCategoryName)
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// Create a category name without validation.
    ///
    /// The caller should ensure that the string is not empty.
    pub fn new_unchecked(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl AsRef<str> for CategoryName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for CategoryName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A spending category, e.g. 'Groceries' or 'Travel'.
///
/// Built-in (default) categories have no owner, are shared by all users, and
/// can never be deleted. Custom categories belong to exactly one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// The ID of the category.
    pub id: DatabaseID,
    /// The user that created the category, or `None` for built-in defaults.
    pub user_id: Option<UserID>,
    /// The name of the category.
    pub name: CategoryName,
    /// An icon glyph displayed next to the name.
    pub icon: String,
    /// A color token used when charting this category.
    pub color: String,
    /// Whether this is a built-in category.
    pub is_default: bool,
    /// When the record was created. Set by the store.
    pub created_at: OffsetDateTime,
}

/// The fields needed to create a [Category]. The store assigns the ID and
/// creation timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategory {
    /// The user that owns the category, or `None` for built-in defaults.
    pub user_id: Option<UserID>,
    /// The name of the category.
    pub name: CategoryName,
    /// An icon glyph displayed next to the name.
    pub icon: String,
    /// A color token used when charting this category.
    pub color: String,
    /// Whether this is a built-in category.
    pub is_default: bool,
}

#[cfg(test)]
mod category_name_tests {
    use crate::{Error, models::CategoryName};

    #[test]
    fn new_fails_on_empty_string() {
        let category_name = CategoryName::new("");

        assert_eq!(category_name, Err(Error::EmptyCategoryName));
    }

    #[test]
    fn new_succeeds_on_non_empty_string() {
        let category_name = CategoryName::new("🔥");

        assert!(category_name.is_ok())
    }
}
