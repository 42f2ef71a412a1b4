//! Application router configuration with protected and unprotected route
//! definitions.

use axum::{
    Router, middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post, put},
};

use crate::{
    Error,
    auth::{auth_guard, get_me, log_out},
    category::{create_category_endpoint, delete_category_endpoint, list_categories_endpoint},
    endpoints,
    state::AppState,
    stores::{CategoryStore, SessionStore, TransactionStore, UserStore},
    summary::get_summary_endpoint,
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, list_transactions_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Everything under `/api` and the profile route require a live session; the
/// auth middleware places the session's `UserID` into the request extensions
/// for the handlers.
pub fn build_router<C, T, U, S>(state: AppState<C, T, U, S>) -> Router
where
    C: CategoryStore + Clone + Send + Sync + 'static,
    T: TransactionStore + Clone + Send + Sync + 'static,
    U: UserStore + Clone + Send + Sync + 'static,
    S: SessionStore + Clone + Send + Sync + 'static,
{
    let protected_routes = Router::new()
        .route(
            endpoints::TRANSACTIONS,
            get(list_transactions_endpoint::<C, T>).post(create_transaction_endpoint::<C, T>),
        )
        .route(
            endpoints::TRANSACTION,
            put(update_transaction_endpoint::<C, T>).delete(delete_transaction_endpoint::<C, T>),
        )
        .route(
            endpoints::CATEGORIES,
            get(list_categories_endpoint::<C, T>).post(create_category_endpoint::<C, T>),
        )
        .route(endpoints::CATEGORY, delete(delete_category_endpoint::<C, T>))
        .route(endpoints::CASHFLOW_SUMMARY, get(get_summary_endpoint::<C, T>))
        .route(endpoints::ME, get(get_me::<U, S>))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_guard::<U, S>,
        ));

    // Logging out without a live session still succeeds, so the route sits
    // outside the guard.
    let unprotected_routes = Router::new().route(endpoints::LOG_OUT, post(log_out::<U, S>));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_not_found)
        .with_state(state)
}

/// The JSON 404 returned for unknown routes.
async fn get_not_found() -> Response {
    Error::NotFound.into_response()
}
