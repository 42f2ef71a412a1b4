//! This file defines the transaction routes: paginated listing, creation,
//! update and deletion.
//!
//! Every route is scoped to the logged-in user via the `UserID` extension
//! placed by the auth middleware, and every response that carries a
//! transaction carries it decorated with its category metadata.

use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    enrichment::{TransactionView, enrich_transaction, enrich_transactions},
    models::{DatabaseID, NewTransaction, TransactionKind, TransactionUpdate, UserID},
    pagination::{PageParams, PageQuery, total_pages},
    state::TransactionState,
    stores::{CategoryStore, TransactionStore},
};

/// One page of a user's transactions plus the paging envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginatedTransactions {
    /// The transactions on this page, newest event date first.
    pub items: Vec<TransactionView>,
    /// The total number of transactions across all pages.
    pub total: u64,
    /// The 1-based page number this envelope holds.
    pub page: u64,
    /// The page size used to compute this page.
    pub page_size: u64,
    /// The total number of pages at this page size.
    pub total_pages: u64,
}

/// The body of a create or update transaction request.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TransactionForm {
    /// The category to label the transaction with.
    pub category_id: DatabaseID,
    /// Whether this is money received or money spent.
    pub kind: TransactionKind,
    /// The amount of money received or spent. Must be positive.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// The date the transaction happened.
    pub date: Date,
}

impl TransactionForm {
    /// Reject amounts that are zero, negative or not a number.
    fn validate(&self) -> Result<(), Error> {
        if self.amount <= 0.0 || self.amount.is_nan() {
            return Err(Error::InvalidAmount);
        }

        Ok(())
    }
}

/// Handler for listing one page of the user's transactions.
///
/// Out-of-range paging values fall back to defaults rather than erroring, and
/// a page past the end returns an empty item list with the real totals.
pub async fn list_transactions_endpoint<C, T>(
    State(state): State<TransactionState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Query(query): Query<PageQuery>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    let params = PageParams::sanitized(query, &state.pagination_config);

    let page = match state.transaction_store.get_page(user_id, params) {
        Ok(page) => page,
        Err(error) => return error.into_response(),
    };

    let items = enrich_transactions(&state.category_store, page.transactions);

    Json(PaginatedTransactions {
        items,
        total: page.total,
        page: params.page,
        page_size: params.page_size,
        total_pages: total_pages(page.total, params.page_size),
    })
    .into_response()
}

/// Handler for creating a transaction owned by the logged-in user.
pub async fn create_transaction_endpoint<C, T>(
    State(mut state): State<TransactionState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<TransactionForm>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    if let Err(error) = form.validate() {
        return error.into_response();
    }

    let new_transaction = NewTransaction {
        user_id,
        category_id: form.category_id,
        kind: form.kind,
        amount: form.amount,
        description: form.description,
        date: form.date,
    };

    match state.transaction_store.create(new_transaction) {
        Ok(transaction) => {
            let view = enrich_transaction(&state.category_store, transaction);
            (StatusCode::CREATED, Json(view)).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Handler for updating a transaction.
///
/// The store applies the ownership predicate together with the update, so a
/// transaction that exists but belongs to someone else comes back as a plain
/// 404.
pub async fn update_transaction_endpoint<C, T>(
    State(mut state): State<TransactionState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
    Json(form): Json<TransactionForm>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    if let Err(error) = form.validate() {
        return error.into_response();
    }

    let changes = TransactionUpdate {
        category_id: form.category_id,
        kind: form.kind,
        amount: form.amount,
        description: form.description,
        date: form.date,
    };

    match state
        .transaction_store
        .update(user_id, transaction_id, changes)
    {
        Ok(transaction) => {
            let view = enrich_transaction(&state.category_store, transaction);
            Json(view).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Handler for deleting a transaction.
pub async fn delete_transaction_endpoint<C, T>(
    State(mut state): State<TransactionState<C, T>>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<DatabaseID>,
) -> Response
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
{
    match state.transaction_store.delete(user_id, transaction_id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error.into_response(),
    }
}
