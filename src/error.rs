//! Defines the app level error type and its conversion to JSON error
//! responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A supplied user, category or transaction ID is not well-formed for the
    /// store's identifier scheme.
    #[error("the ID is not a valid identifier")]
    InvalidId,

    /// The requested resource was not found.
    ///
    /// This also covers resources that exist but belong to another user: the
    /// two cases are deliberately indistinguishable so the server does not
    /// leak the existence of other users' data.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A transaction amount was zero, negative or not a number.
    #[error("transaction amounts must be positive")]
    InvalidAmount,

    /// A summary year outside the supported range was requested.
    #[error("the year is outside the supported range")]
    InvalidYear,

    /// A category could not be deleted because at least one transaction still
    /// references it.
    #[error("the category has transactions referencing it and cannot be deleted")]
    CategoryInUse,

    /// An empty string was used to create a category name.
    #[error("category name cannot be empty")]
    EmptyCategoryName,

    /// The request carried no session cookie or the session does not exist.
    #[error("the request is not authenticated")]
    Unauthorized,

    /// The session token has passed its expiry time.
    #[error("the session has expired")]
    SessionExpired,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidId => (StatusCode::BAD_REQUEST, "invalid id"),
            Error::InvalidAmount => (StatusCode::BAD_REQUEST, "amount must be positive"),
            Error::InvalidYear => (StatusCode::BAD_REQUEST, "year out of range"),
            Error::NotFound => (StatusCode::NOT_FOUND, "not found"),
            Error::CategoryInUse => (
                StatusCode::CONFLICT,
                "category has existing transactions and cannot be deleted",
            ),
            Error::EmptyCategoryName => {
                (StatusCode::UNPROCESSABLE_ENTITY, "name must not be empty")
            }
            Error::Unauthorized | Error::SessionExpired => {
                (StatusCode::UNAUTHORIZED, "unauthorized")
            }
            // SQL errors are not intended to be shown to the client.
            Error::SqlError(error) => {
                tracing::error!("An unexpected error occurred: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
