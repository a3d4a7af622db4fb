use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
};
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::responses::{blog::delete_post_response::DeletePostResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    delete,
    path = "/admin/posts/{post_id}",
    tag = "admin",
    params(("post_id" = String, Path, description = "Post id (UUID)")),
    responses(
        (status = 200, description = "Post deleted", body = DeletePostResponse),
        (status = 401, description = "No valid session", body = CodeErrorResp),
        (status = 404, description = "Post not found", body = CodeErrorResp)
    )
)]
pub async fn delete_post(
    State(state): State<Arc<ServerState>>,
    Path(raw_post_id): Path<String>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let post_id = Uuid::parse_str(&raw_post_id)
        .map_err(|_| code_err(CodeError::POST_NOT_FOUND, &raw_post_id))?;

    let deleted = state
        .posts()
        .delete_post(post_id)
        .await
        .map_err(|e| code_err(CodeError::DB_DELETION_ERROR, e))?;

    if !deleted {
        return Err(code_err(CodeError::POST_NOT_FOUND, post_id));
    }

    info!(post_id = %post_id, "Post deleted.");

    Ok(http_resp(
        DeletePostResponse {
            deleted_post_id: post_id,
            redirect: "/admin",
        },
        (),
        start,
    ))
}
