//! This file defines the `Transaction` type, the core type of the finance
//! tracking part of the application, and the types needed to create and update
//! one.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::models::{DatabaseID, UserID};

/// Whether a transaction records money received or money spent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received, e.g. wages or interest.
    Inflow,
    /// Money spent.
    Outflow,
}

impl TransactionKind {
    /// The string stored in the database for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Inflow => "inflow",
            TransactionKind::Outflow => "outflow",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "inflow" => Ok(TransactionKind::Inflow),
            "outflow" => Ok(TransactionKind::Outflow),
            other => Err(FromSqlError::Other(
                format!("invalid transaction kind {other:?}").into(),
            )),
        }
    }
}

/// A single financial event belonging to exactly one user.
///
/// The `date` field is the date the event happened, which is distinct from
/// `created_at`, the time the record was inserted. All date-range and grouping
/// logic operates on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The ID of the user that owns this transaction. Never reassignable.
    pub user_id: UserID,
    /// A weak reference to a category. The referenced category may have been
    /// deleted since this transaction was created.
    pub category_id: DatabaseID,
    /// Whether this is money received or money spent.
    pub kind: TransactionKind,
    /// The amount of money received or spent. Always positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened.
    pub date: Date,
    /// When the record was created. Set by the store.
    pub created_at: OffsetDateTime,
    /// When the record was last updated. Set by the store.
    pub updated_at: OffsetDateTime,
}

/// The fields needed to create a [Transaction]. The store assigns the ID and
/// timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The user that will own the transaction.
    pub user_id: UserID,
    /// The category to label the transaction with.
    pub category_id: DatabaseID,
    /// Whether this is money received or money spent.
    pub kind: TransactionKind,
    /// The amount of money received or spent.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened.
    pub date: Date,
}

/// The updatable fields of a [Transaction].
///
/// The owner is deliberately absent: ownership is immutable and updates are
/// scoped to the owner by the store's predicate instead.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionUpdate {
    /// The category to label the transaction with.
    pub category_id: DatabaseID,
    /// Whether this is money received or money spent.
    pub kind: TransactionKind,
    /// The amount of money received or spent.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened.
    pub date: Date,
}
