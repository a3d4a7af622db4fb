use std::sync::Arc;

use axum::{
    Extension,
    extract::{Path, Query, State},
    response::Html,
};

use crate::{
    domain::blog::paginator::paginate_published,
    dto::requests::blog::get_posts_request::GetPostsRequest,
    errors::{
        code_error::{CodeError, HandlerResponse, code_err},
        page_error::{PageErrorResp, PageResponse, page_err},
    },
    handlers::blog::read_post::find_published_post,
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    views::{
        layout::render_page,
        posts::{render_post_details, render_posts_index},
    },
};

/// A storage failure comes back as the JSON `CodeErrorResp`, raw error included.
pub async fn posts_index_page(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthStatus>,
    Query(request): Query<GetPostsRequest>,
) -> HandlerResponse<Html<String>> {
    let page_request = request.to_page_request(state.get_pagination_limit());

    let result = paginate_published(state.posts(), page_request)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(Html(render_page(
        "All Posts",
        auth.is_logged_in(),
        &render_posts_index(&result),
    )))
}

pub async fn post_details_page(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthStatus>,
    Path(post_id): Path<String>,
) -> PageResponse<Html<String>> {
    let post = find_published_post(&state, &post_id)
        .await
        .map_err(|e| page_err(CodeError::DB_QUERY_ERROR, e).logged_in(auth.is_logged_in()))?
        .ok_or_else(|| {
            PageErrorResp::from(code_err(CodeError::POST_NOT_FOUND, &post_id))
                .logged_in(auth.is_logged_in())
        })?;

    Ok(Html(render_page(
        &post.post_title,
        auth.is_logged_in(),
        &render_post_details(&post),
    )))
}
