//! Decorates transactions with the display metadata of their category.
//!
//! Transactions store only a category ID. Before they are returned to the
//! client, a request-scoped index of category metadata is built with a single
//! batched lookup and each transaction is decorated from it. The index is
//! never cached across requests so category edits are visible immediately.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    models::{Category, DatabaseID, Transaction, TransactionKind},
    stores::CategoryStore,
};

/// A transaction decorated with its category's display metadata.
///
/// The metadata fields are `None` when the referenced category no longer
/// exists or its lookup failed; the financial data is still returned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionView {
    /// The ID of the transaction.
    pub id: DatabaseID,
    /// The raw category reference, kept even when the category is gone.
    pub category_id: DatabaseID,
    /// The category's name, if it still exists.
    pub category_name: Option<String>,
    /// The category's color token, if it still exists.
    pub category_color: Option<String>,
    /// The category's icon glyph, if it still exists.
    pub category_icon: Option<String>,
    /// Whether this is money received or money spent.
    pub kind: TransactionKind,
    /// The amount of money received or spent.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened.
    pub date: Date,
    /// When the record was created.
    pub created_at: OffsetDateTime,
    /// When the record was last updated.
    pub updated_at: OffsetDateTime,
}

/// A request-scoped map from category ID to category metadata.
#[derive(Debug, Default)]
pub struct CategoryIndex {
    categories: HashMap<DatabaseID, Category>,
}

impl CategoryIndex {
    /// Build an index for a set of category IDs, issuing at most one bulk
    /// lookup on `store` and none at all for an empty set.
    ///
    /// A failed bulk lookup degrades to an empty index rather than an error:
    /// the data being decorated is still valid and more important than its
    /// decoration.
    pub fn load<C: CategoryStore>(store: &C, ids: &HashSet<DatabaseID>) -> Self {
        if ids.is_empty() {
            return Self::default();
        }

        let categories = match store.get_by_ids(ids) {
            Ok(categories) => categories
                .into_iter()
                .map(|category| (category.id, category))
                .collect(),
            Err(error) => {
                tracing::warn!(
                    "could not fetch category metadata, continuing undecorated: {}",
                    error
                );
                HashMap::new()
            }
        };

        Self { categories }
    }

    /// Look up a category by its ID.
    pub fn get(&self, category_id: DatabaseID) -> Option<&Category> {
        self.categories.get(&category_id)
    }

    /// Decorate `transaction` with the metadata held by this index.
    pub fn view_of(&self, transaction: Transaction) -> TransactionView {
        let category = self.get(transaction.category_id);

        TransactionView {
            id: transaction.id,
            category_id: transaction.category_id,
            category_name: category.map(|category| category.name.to_string()),
            category_color: category.map(|category| category.color.clone()),
            category_icon: category.map(|category| category.icon.clone()),
            kind: transaction.kind,
            amount: transaction.amount,
            description: transaction.description,
            date: transaction.date,
            created_at: transaction.created_at,
            updated_at: transaction.updated_at,
        }
    }
}

/// Decorate a batch of transactions, preserving their order.
pub fn enrich_transactions<C: CategoryStore>(
    store: &C,
    transactions: Vec<Transaction>,
) -> Vec<TransactionView> {
    let ids: HashSet<DatabaseID> = transactions
        .iter()
        .map(|transaction| transaction.category_id)
        .collect();
    let index = CategoryIndex::load(store, &ids);

    transactions
        .into_iter()
        .map(|transaction| index.view_of(transaction))
        .collect()
}

/// Decorate a single transaction, e.g. for a create or update response.
pub fn enrich_transaction<C: CategoryStore>(
    store: &C,
    transaction: Transaction,
) -> TransactionView {
    let index = CategoryIndex::load(store, &HashSet::from([transaction.category_id]));

    index.view_of(transaction)
}
