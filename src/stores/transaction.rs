//! Defines the transaction store trait.

use crate::{
    Error,
    models::{DatabaseID, NewTransaction, Transaction, TransactionKind, TransactionUpdate, UserID},
    pagination::PageParams,
    summary::{CategoryTotal, DateWindow, MonthlyAggregate},
};

/// One window of a user's transactions plus the total row count, as returned
/// by [TransactionStore::get_page].
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionPage {
    /// The transactions in the requested window, newest event date first.
    pub transactions: Vec<Transaction>,
    /// The total number of transactions the user has, across all pages.
    pub total: u64,
}

/// Handles the creation, retrieval and aggregation of transactions.
///
/// Every operation that reads or mutates an existing transaction is scoped to
/// the owning user: implementers must make "does not exist" and "belongs to
/// someone else" indistinguishable by applying the ownership predicate
/// atomically with the operation itself.
pub trait TransactionStore {
    /// Create a new transaction in the store.
    fn create(&mut self, transaction: NewTransaction) -> Result<Transaction, Error>;

    /// Update the transaction with `id` if it belongs to `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no transaction with `id` belongs to
    /// `user_id`.
    fn update(
        &mut self,
        user_id: UserID,
        id: DatabaseID,
        changes: TransactionUpdate,
    ) -> Result<Transaction, Error>;

    /// Delete the transaction with `id` if it belongs to `user_id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no transaction with `id` belongs to
    /// `user_id`.
    fn delete(&mut self, user_id: UserID, id: DatabaseID) -> Result<(), Error>;

    /// Retrieve one page of the user's transactions, sorted by event date
    /// descending, plus the total row count.
    fn get_page(&self, user_id: UserID, params: PageParams) -> Result<TransactionPage, Error>;

    /// Sum inflow and outflow per calendar month for the user's transactions
    /// within `window`, one entry per month in ascending (year, month) order.
    fn monthly_aggregate(
        &self,
        user_id: UserID,
        window: DateWindow,
    ) -> Result<Vec<MonthlyAggregate>, Error>;

    /// Sum amounts per category for the user's transactions of `kind` within
    /// `window`, sorted by total descending. Categories with no matching
    /// transactions are omitted.
    fn category_totals(
        &self,
        user_id: UserID,
        kind: TransactionKind,
        window: DateWindow,
    ) -> Result<Vec<CategoryTotal>, Error>;

    /// Whether the user has any transactions referencing `category_id`.
    fn exists_for_category(
        &self,
        user_id: UserID,
        category_id: DatabaseID,
    ) -> Result<bool, Error>;
}
