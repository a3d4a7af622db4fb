use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use uuid::Uuid;

use crate::{
    domain::blog::post::Post,
    dto::responses::response_data::http_resp,
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

/// Looks a post up for the public surface; drafts and malformed ids read as absent.
pub async fn find_published_post(
    state: &ServerState,
    raw_post_id: &str,
) -> anyhow::Result<Option<Post>> {
    let Ok(post_id) = Uuid::parse_str(raw_post_id) else {
        return Ok(None);
    };

    Ok(state
        .posts()
        .get_post(post_id)
        .await?
        .filter(Post::is_published))
}

#[utoipa::path(
    get,
    path = "/api/blog/posts/{post_id}",
    tag = "blog",
    params(("post_id" = String, Path, description = "Post id (UUID)")),
    responses(
        (status = 200, description = "Published post", body = Post),
        (status = 404, description = "No published post with this id", body = CodeErrorResp)
    )
)]
pub async fn read_post(
    State(state): State<Arc<ServerState>>,
    Path(post_id): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let post = find_published_post(&state, &post_id)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?
        .ok_or_else(|| code_err(CodeError::POST_NOT_FOUND, post_id))?;

    Ok(http_resp(post, (), start))
}
