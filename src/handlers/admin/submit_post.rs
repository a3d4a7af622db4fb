use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect},
};
use axum_extra::extract::Form;
use tracing::info;

use crate::{
    dto::requests::blog::submit_post_request::SubmitPostRequest,
    errors::{
        code_error::CodeError,
        page_error::{PageResponse, page_err},
    },
    init::state::ServerState,
    views::{admin::render_post_form, layout::render_page},
};

const CREATE_ACTION: &str = "/admin/posts";

pub async fn create_post_page() -> Html<String> {
    Html(render_page(
        "Create",
        true,
        &render_post_form("Create", CREATE_ACTION, &SubmitPostRequest::default(), None),
    ))
}

pub async fn submit_post(
    State(state): State<Arc<ServerState>>,
    Form(request): Form<SubmitPostRequest>,
) -> PageResponse<impl IntoResponse> {
    let new_post = request.to_new_post().map_err(|message| {
        let form = render_post_form("Create", CREATE_ACTION, &request, Some(&message));
        page_err(CodeError::POST_INVALID, &message)
            .with_page("Create", form)
            .logged_in(true)
    })?;

    let post = state
        .posts()
        .insert_post(new_post)
        .await
        .map_err(|e| page_err(CodeError::DB_INSERTION_ERROR, e).logged_in(true))?;

    info!(post_id = %post.post_id, status = %post.post_status, "Post created.");

    Ok(Redirect::to(&format!("/admin/edit/{}", post.post_id)))
}
