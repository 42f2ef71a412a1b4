//! This module defines the domain data types.

pub use category::{Category, CategoryName, NewCategory};
pub use session::Session;
pub use transaction::{NewTransaction, Transaction, TransactionKind, TransactionUpdate};
pub use user::{User, UserProfile};

mod category;
mod session;
mod transaction;
mod user;

use serde::{Deserialize, Serialize};

/// Alias for the integer type used for mapping to database IDs.
pub type DatabaseID = i64;

/// The ID of a registered user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a raw database ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}
