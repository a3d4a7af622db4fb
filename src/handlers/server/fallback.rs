use axum::{Extension, http::Uri, response::IntoResponse};

use crate::{
    errors::{
        code_error::{CodeError, code_err},
        page_error::PageErrorResp,
    },
    routers::middleware::is_logged_in::AuthStatus,
};

/// Any unmatched path gets the 404 page.
pub async fn fallback_handler(
    auth: Option<Extension<AuthStatus>>,
    uri: Uri,
) -> impl IntoResponse {
    let logged_in = auth.is_some_and(|Extension(auth)| auth.is_logged_in());

    PageErrorResp::from(code_err(CodeError::PAGE_NOT_FOUND, uri.path()))
        .logged_in(logged_in)
}
