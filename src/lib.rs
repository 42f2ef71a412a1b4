//! Cashtrack is a personal finance tracker.
//!
//! This library provides a JSON REST API for recording transactions, sorting
//! them into categories and summarising cashflow over time. Users are
//! authenticated with opaque session cookies established after an external
//! identity provider has verified them.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

pub mod auth;
pub mod category;
mod db;
pub mod endpoints;
pub mod enrichment;
mod error;
pub mod models;
pub mod pagination;
pub mod routing;
pub mod seed;
pub mod state;
pub mod stores;
pub mod summary;
pub mod transaction;

#[cfg(test)]
pub(crate) mod test_utils;

pub use db::initialize as initialize_db;
pub use error::Error;
pub use routing::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal,
/// whichever comes first, and then signals the server to shut down
/// gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
