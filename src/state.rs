//! Implements the structs that hold the state of the REST server.
//!
//! Handlers extract the narrow substate they need rather than the full
//! [AppState]; the [FromRef] impls below wire the substates up.

use std::marker::{Send, Sync};

use axum::extract::FromRef;
use time::Duration;

use crate::{
    auth::DEFAULT_SESSION_DURATION,
    pagination::PaginationConfig,
    stores::{CategoryStore, SessionStore, TransactionStore, UserStore},
};

/// The state of the REST server.
#[derive(Debug, Clone)]
pub struct AppState<C, T, U, S>
where
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    U: UserStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// How long a newly minted session is valid for.
    pub session_duration: Duration,
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
    /// The store for managing [sessions](crate::models::Session).
    pub session_store: S,
}

impl<C, T, U, S> AppState<C, T, U, S>
where
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    U: UserStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    /// Create a new [AppState] with the default session duration.
    pub fn new(
        pagination_config: PaginationConfig,
        category_store: C,
        transaction_store: T,
        user_store: U,
        session_store: S,
    ) -> Self {
        Self {
            pagination_config,
            session_duration: DEFAULT_SESSION_DURATION,
            category_store,
            transaction_store,
            user_store,
            session_store,
        }
    }
}

/// The state needed to list, create, update and delete transactions, and to
/// compute the cashflow summary.
#[derive(Debug, Clone)]
pub struct TransactionState<C, T>
where
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<C, T, U, S> FromRef<AppState<C, T, U, S>> for TransactionState<C, T>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, U, S>) -> Self {
        Self {
            pagination_config: state.pagination_config.clone(),
            category_store: state.category_store.clone(),
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed to manage categories.
///
/// The transaction store is here too: deleting a category must check whether
/// any of the user's transactions still reference it.
#[derive(Debug, Clone)]
pub struct CategoryState<C, T>
where
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
{
    /// The store for managing [categories](crate::models::Category).
    pub category_store: C,
    /// The store for managing user [transactions](crate::models::Transaction).
    pub transaction_store: T,
}

impl<C, T, U, S> FromRef<AppState<C, T, U, S>> for CategoryState<C, T>
where
    C: CategoryStore + Clone + Send + Sync,
    T: TransactionStore + Clone + Send + Sync,
    U: UserStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, U, S>) -> Self {
        Self {
            category_store: state.category_store.clone(),
            transaction_store: state.transaction_store.clone(),
        }
    }
}

/// The state needed by the auth middleware and the auth routes.
#[derive(Debug, Clone)]
pub struct AuthState<U, S>
where
    U: UserStore + Send + Sync,
    S: SessionStore + Send + Sync,
{
    /// How long a newly minted session is valid for.
    pub session_duration: Duration,
    /// The store for managing [users](crate::models::User).
    pub user_store: U,
    /// The store for managing [sessions](crate::models::Session).
    pub session_store: S,
}

impl<C, T, U, S> FromRef<AppState<C, T, U, S>> for AuthState<U, S>
where
    C: CategoryStore + Send + Sync,
    T: TransactionStore + Send + Sync,
    U: UserStore + Clone + Send + Sync,
    S: SessionStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<C, T, U, S>) -> Self {
        Self {
            session_duration: state.session_duration,
            user_store: state.user_store.clone(),
            session_store: state.session_store.clone(),
        }
    }
}
