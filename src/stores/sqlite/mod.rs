//! Contains the SQLite backed store implementations, a convenience type alias
//! and a function for building an [AppState] that uses the SQLite backend.

pub mod category;
pub mod session;
pub mod transaction;
pub mod user;

pub use category::SQLiteCategoryStore;
pub use session::SQLiteSessionStore;
pub use transaction::SQLiteTransactionStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{Error, db::initialize, pagination::PaginationConfig, state::AppState};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<
    SQLiteCategoryStore,
    SQLiteTransactionStore,
    SQLiteUserStore,
    SQLiteSessionStore,
>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
pub fn create_app_state(
    db_connection: Connection,
    pagination_config: PaginationConfig,
) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        pagination_config,
        SQLiteCategoryStore::new(connection.clone()),
        SQLiteTransactionStore::new(connection.clone()),
        SQLiteUserStore::new(connection.clone()),
        SQLiteSessionStore::new(connection),
    ))
}
