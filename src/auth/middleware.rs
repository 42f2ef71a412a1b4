//! Authentication middleware that validates the session cookie.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::{
    Error,
    state::AuthState,
    stores::{SessionStore, UserStore},
};

use super::SESSION_COOKIE;

/// Middleware function that checks for a valid session cookie.
///
/// The session's user ID is placed into the request and the request executed
/// normally if the cookie names a live session, otherwise a 401 JSON response
/// is returned.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard<U, S>(
    State(state): State<AuthState<U, S>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response
where
    U: UserStore + Clone + Send + Sync,
    S: SessionStore + Clone + Send + Sync,
{
    let token = match jar.get(SESSION_COOKIE) {
        Some(cookie) => cookie.value(),
        None => return Error::Unauthorized.into_response(),
    };

    let session = match state.session_store.get_by_token(token) {
        Ok(session) => session,
        Err(Error::NotFound) => return Error::Unauthorized.into_response(),
        Err(error) => return error.into_response(),
    };

    if session.is_expired() {
        return Error::SessionExpired.into_response();
    }

    request.extensions_mut().insert(session.user_id);

    next.run(request).await
}
