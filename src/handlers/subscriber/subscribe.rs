use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use axum_extra::extract::Form;
use tracing::info;

use crate::{
    domain::subscriber::{EmailSubscriber, SubscribeOutcome},
    dto::{
        requests::subscriber::subscribe_request::SubscribeRequest,
        responses::{response_data::http_resp, subscriber::subscribe_response::SubscribeResponse},
    },
    errors::{
        code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
        page_error::{PageErrorResp, PageResponse},
    },
    init::state::ServerState,
    routers::middleware::is_logged_in::AuthStatus,
    util::time::now::tokio_now,
    views::{layout::render_page, pages::render_subscribed},
};

async fn register(state: &ServerState, request: &SubscribeRequest) -> HandlerResponse<EmailSubscriber> {
    let subscriber = request.validate()?;
    let email = subscriber.subscriber_email.clone();

    match state
        .subscribers()
        .insert_subscriber(subscriber)
        .await
        .map_err(|e| code_err(CodeError::DB_INSERTION_ERROR, e))?
    {
        SubscribeOutcome::Subscribed(subscriber) => {
            info!(subscriber_id = %subscriber.subscriber_id, "New email subscriber.");
            Ok(subscriber)
        }
        SubscribeOutcome::AlreadySubscribed => {
            Err(code_err(CodeError::EMAIL_ALREADY_SUBSCRIBED, email))
        }
    }
}

/// Url-encoded form posted from the home page.
pub async fn subscribe_form(
    State(state): State<Arc<ServerState>>,
    Extension(auth): Extension<AuthStatus>,
    Form(request): Form<SubscribeRequest>,
) -> PageResponse<impl IntoResponse> {
    let subscriber = register(&state, &request)
        .await
        .map_err(|e| PageErrorResp::from(e).logged_in(auth.is_logged_in()))?;

    Ok(Html(render_page(
        "Subscribed",
        auth.is_logged_in(),
        &render_subscribed(&subscriber.subscriber_email),
    )))
}

#[utoipa::path(
    post,
    path = "/api/subscribers",
    tag = "subscriber",
    request_body = SubscribeRequest,
    responses(
        (status = 201, description = "Subscribed", body = SubscribeResponse),
        (status = 400, description = "Invalid name or email", body = CodeErrorResp),
        (status = 409, description = "Email already subscribed", body = CodeErrorResp)
    )
)]
pub async fn subscribe(
    State(state): State<Arc<ServerState>>,
    Json(request): Json<SubscribeRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let subscriber = register(&state, &request).await?;

    Ok((
        StatusCode::CREATED,
        http_resp(
            SubscribeResponse {
                subscriber_id: subscriber.subscriber_id,
                subscriber_email: subscriber.subscriber_email,
            },
            (),
            start,
        ),
    ))
}
