use std::{str::FromStr, sync::Arc};

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;
use uuid::Uuid;

use crate::init::state::{ServerState, Session};

pub const SESSION_COOKIE: &str = "session_id";

#[derive(Clone, Debug)]
pub enum AuthStatus {
    LoggedIn(Session),
    LoggedOut,
}

impl AuthStatus {
    pub fn is_logged_in(&self) -> bool {
        matches!(self, AuthStatus::LoggedIn(_))
    }
}

/// Resolves the `session_id` cookie to a live session, if any.
pub async fn session_from_cookies(state: &ServerState, cookie_jar: &CookieJar) -> Option<Session> {
    let session_cookie = cookie_jar.get(SESSION_COOKIE)?;
    let session_id = Uuid::from_str(session_cookie.value()).ok()?;
    state.get_live_session(&session_id).await
}

pub async fn is_logged_in_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let auth_status = match session_from_cookies(&state, &cookie_jar).await {
        Some(session) => AuthStatus::LoggedIn(session),
        None => AuthStatus::LoggedOut,
    };

    request.extensions_mut().insert(auth_status);

    next.run(request).await
}
