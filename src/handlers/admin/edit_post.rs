use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use tracing::info;
use uuid::Uuid;

use crate::{
    dto::requests::blog::submit_post_request::SubmitPostRequest,
    errors::{
        code_error::CodeError,
        page_error::{PageErrorResp, PageResponse, page_err},
    },
    init::state::ServerState,
    views::{admin::render_post_form, layout::render_page},
};

fn not_found(raw_post_id: &str) -> PageErrorResp {
    page_err(CodeError::POST_NOT_FOUND, raw_post_id).logged_in(true)
}

fn parse_post_id(raw_post_id: &str) -> PageResponse<Uuid> {
    Uuid::parse_str(raw_post_id).map_err(|_| not_found(raw_post_id))
}

pub async fn edit_post_page(
    State(state): State<Arc<ServerState>>,
    Path(raw_post_id): Path<String>,
) -> PageResponse<Html<String>> {
    let post_id = parse_post_id(&raw_post_id)?;

    let post = state
        .posts()
        .get_post(post_id)
        .await
        .map_err(|e| page_err(CodeError::DB_QUERY_ERROR, e).logged_in(true))?
        .ok_or_else(|| not_found(&raw_post_id))?;

    let action = format!("/admin/edit/{post_id}");
    Ok(Html(render_page(
        "Edit",
        true,
        &render_post_form("Edit", &action, &SubmitPostRequest::from(&post), None),
    )))
}

pub async fn update_post(
    State(state): State<Arc<ServerState>>,
    Path(raw_post_id): Path<String>,
    Form(request): Form<SubmitPostRequest>,
) -> PageResponse<impl IntoResponse> {
    let post_id = parse_post_id(&raw_post_id)?;
    let action = format!("/admin/edit/{post_id}");

    let patch = request.to_new_post().map_err(|message| {
        let form = render_post_form("Edit", &action, &request, Some(&message));
        page_err(CodeError::POST_INVALID, &message)
            .with_page("Edit", form)
            .logged_in(true)
    })?;

    let post = state
        .posts()
        .update_post(post_id, patch)
        .await
        .map_err(|e| page_err(CodeError::DB_UPDATE_ERROR, e).logged_in(true))?
        .ok_or_else(|| not_found(&raw_post_id))?;

    info!(post_id = %post.post_id, status = %post.post_status, "Post updated.");

    Ok(Redirect::to(&action))
}
