use std::sync::Arc;

use axum::{
    Extension,
    extract::State,
    response::Html,
};

use crate::{
    domain::blog::paginator::{PageRequest, paginate_published},
    errors::{
        code_error::CodeError,
        page_error::{PageResponse, page_err},
    },
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    views::{layout::render_page, pages::render_home},
};

const LATEST_POSTS_ON_HOME: u64 = 3;

pub async fn home_page(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthStatus>,
) -> PageResponse<Html<String>> {
    let latest = paginate_published(state.posts(), PageRequest::new(1, LATEST_POSTS_ON_HOME))
        .await
        .map_err(|e| page_err(CodeError::DB_QUERY_ERROR, e).logged_in(auth.is_logged_in()))?;

    Ok(Html(render_page(
        "Home",
        auth.is_logged_in(),
        &render_home(&latest.posts),
    )))
}
