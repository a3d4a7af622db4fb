use std::sync::Arc;

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::{init::state::ServerState, routers::middleware::is_logged_in::SESSION_COOKIE};

pub async fn logout(State(state): State<Arc<ServerState>>, cookie_jar: CookieJar) -> impl IntoResponse {
    // same attributes as when it was set
    let mut cookie = Cookie::build((SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .secure(state.is_cookie_secure())
        .same_site(SameSite::Strict)
        .build();
    cookie.make_removal();

    if let Some(session_id) = cookie_jar
        .get(SESSION_COOKIE)
        .and_then(|c| Uuid::parse_str(c.value()).ok())
    {
        match state.remove_session(session_id).await {
            Ok((removed_session_id, session_count)) => {
                info!(
                    removed_session_id = %removed_session_id,
                    session_count = %session_count,
                    "Admin logout; session removed.",
                );
            }
            Err(e) => {
                warn!(error = %e, session_id = %session_id, "Logout for an unknown session");
            }
        }
    }

    (cookie_jar.add(cookie), Redirect::to("/"))
}
