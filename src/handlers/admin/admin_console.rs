use std::sync::Arc;

use axum::{
    Extension,
    extract::{Query, State},
    response::Html,
};

use crate::{
    domain::blog::paginator::paginate,
    dto::requests::blog::get_posts_request::GetPostsRequest,
    errors::{
        code_error::CodeError,
        page_error::{PageResponse, page_err},
    },
    init::state::{ServerState, Session},
    store::PostFilter,
    views::{admin::render_admin_console, layout::render_page},
};

/// Lists every post, drafts included, with the same paging as the public list.
pub async fn admin_console_page(
    State(state): State<Arc<ServerState>>,
    Extension(session): Extension<Session>,
    Query(request): Query<GetPostsRequest>,
) -> PageResponse<Html<String>> {
    let page_request = request.to_page_request(state.get_pagination_limit());

    let result = paginate(state.posts(), PostFilter::any(), page_request)
        .await
        .map_err(|e| page_err(CodeError::DB_QUERY_ERROR, e).logged_in(true))?;

    Ok(Html(render_page(
        "Admin Console",
        true,
        &render_admin_console(&result, session.get_user_name()),
    )))
}
