use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::{
    CookieJar, Form,
    cookie::{Cookie, SameSite},
};
use tracing::info;

use crate::{
    dto::requests::auth::login_request::LoginRequest,
    errors::{
        code_error::CodeError,
        page_error::{PageErrorResp, PageResponse, page_err},
    },
    init::state::ServerState,
    routers::middleware::is_logged_in::{AuthStatus, SESSION_COOKIE},
    util::crypto::verify_pw::verify_pw,
    views::{auth::render_login_form, layout::render_page},
};

pub async fn login_page(Extension(auth): Extension<AuthStatus>) -> impl IntoResponse {
    if auth.is_logged_in() {
        return Redirect::to("/admin").into_response();
    }
    Html(render_page("Log in", false, &render_login_form("", None))).into_response()
}

fn login_failure(cerr: CodeError, username: &str) -> PageErrorResp {
    let message = cerr.message;
    page_err(cerr, username).with_page("Log in", render_login_form(username, Some(message)))
}

pub async fn login(
    State(state): State<Arc<ServerState>>,
    cookie_jar: CookieJar,
    Form(request): Form<LoginRequest>,
) -> PageResponse<impl IntoResponse> {
    let username = request.username.trim();

    let user = state
        .users()
        .find_user_by_name(username)
        .await
        .map_err(|e| page_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| login_failure(CodeError::USER_NOT_FOUND, username))?;

    match verify_pw(&request.password, &user.user_password_hash).await {
        Ok(true) => (),
        Ok(false) => return Err(login_failure(CodeError::WRONG_PW, username)),
        Err(e) => return Err(page_err(CodeError::COULD_NOT_VERIFY_PW, e)),
    }

    let session = state
        .new_session(&user)
        .await
        .map_err(|e| page_err(CodeError::SESSION_ID_ALREADY_EXISTS, e))?;

    let cookie = Cookie::build((SESSION_COOKIE, session.session_id.to_string()))
        .path("/")
        .http_only(true)
        .secure(state.is_cookie_secure())
        .same_site(SameSite::Strict)
        .build();

    info!(
        user_name = %user.user_name,
        session_id = %session.session_id,
        expires_at = %session.expires_at,
        "Admin login; session created."
    );

    Ok((cookie_jar.add(cookie), Redirect::to("/admin")))
}
