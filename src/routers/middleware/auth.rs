use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::CookieJar;
use tracing::warn;

use crate::{
    errors::{
        code_error::{CodeError, HandlerResponse, code_err},
        page_error::page_err,
    },
    init::state::{ServerState, Session},
};

use super::is_logged_in::session_from_cookies;

/// A live session whose account still exists. Sessions left behind by a
/// removed account are dropped on sight.
pub async fn admin_session(
    state: &ServerState,
    cookie_jar: &CookieJar,
) -> anyhow::Result<Option<Session>> {
    let Some(session) = session_from_cookies(state, cookie_jar).await else {
        return Ok(None);
    };

    if state
        .users()
        .find_user_by_id(session.get_user_id())
        .await?
        .is_some()
    {
        return Ok(Some(session));
    }

    warn!(
        user_id = %session.get_user_id(),
        session_id = %session.session_id,
        "Session belongs to an account that no longer exists; dropping it."
    );
    // already gone if a concurrent request got there first
    let _ = state.remove_session(session.session_id).await;
    Ok(None)
}

/// Gate for the admin pages: anonymous visitors are sent to the login form.
pub async fn admin_page_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let session = match admin_session(&state, &cookie_jar).await {
        Ok(Some(session)) => session,
        Ok(None) => return Redirect::to("/login").into_response(),
        Err(e) => return page_err(CodeError::DB_QUERY_ERROR, e).into_response(),
    };

    request.extensions_mut().insert(session);

    next.run(request).await
}

/// Gate for the admin JSON endpoints: anonymous callers get a 401 body.
pub async fn auth_middleware(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    mut request: Request<Body>,
    next: Next,
) -> HandlerResponse<impl IntoResponse> {
    let session = admin_session(&state, &cookie_jar)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or(CodeError::UNAUTHORIZED_ACCESS)?;

    request.extensions_mut().insert(session);

    Ok(next.run(request).await)
}
