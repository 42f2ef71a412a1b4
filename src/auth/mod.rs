//! User authentication backed by opaque server-side sessions.
//!
//! The OAuth handshake itself happens at the identity provider; by the time
//! this module is involved the provider has handed back a verified profile.
//! [establish_session] is the single entry point for turning that profile
//! into a logged-in user: it upserts the user record and mints a random
//! session token that the client carries in a cookie. The middleware in
//! [middleware] validates that cookie on every protected request.

mod middleware;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use time::Duration;

use crate::{
    Error,
    models::{Session, UserID, UserProfile},
    state::AuthState,
    stores::{SessionStore, UserStore},
};

pub use middleware::auth_guard;

/// The name of the cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// How long a session is valid for after it is created.
pub const DEFAULT_SESSION_DURATION: Duration = Duration::days(30);

/// Establish a session for a profile verified by the identity provider.
///
/// The user record is created on first sight of the external ID and refreshed
/// on every later log-in, so name and picture changes at the provider
/// propagate here.
pub fn establish_session<U, S>(
    user_store: &mut U,
    session_store: &mut S,
    profile: UserProfile,
    ttl: Duration,
) -> Result<Session, Error>
where
    U: UserStore,
    S: SessionStore,
{
    let user = user_store.upsert(profile)?;

    session_store.create(user.id, ttl)
}

/// Handler that returns the profile of the logged-in user.
pub async fn get_me<U, S>(
    State(state): State<AuthState<U, S>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    U: UserStore + Clone + Send + Sync,
    S: SessionStore + Clone + Send + Sync,
{
    match state.user_store.get(user_id) {
        Ok(user) => Json(user).into_response(),
        Err(error) => error.into_response(),
    }
}

/// Handler that ends the current session and clears the session cookie.
///
/// Logging out with an unknown or missing token still succeeds: the desired
/// end state, no session, already holds.
pub async fn log_out<U, S>(State(mut state): State<AuthState<U, S>>, jar: CookieJar) -> Response
where
    U: UserStore + Clone + Send + Sync,
    S: SessionStore + Clone + Send + Sync,
{
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Err(error) = state.session_store.delete(cookie.value()) {
            return error.into_response();
        }
    }

    let jar = jar.remove(Cookie::from(SESSION_COOKIE));

    (jar, StatusCode::NO_CONTENT).into_response()
}
