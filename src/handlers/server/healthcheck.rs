use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    build_info::{AXUM_VERSION, BUILD_TIME, RUST_VERSION},
    dto::responses::{
        response_data::http_resp,
        server::{healthcheck_response::ServerHealthcheckResponse, state_response::StateResponse},
    },
    init::state::ServerState,
    util::time::{duration_formatter::format_duration, now::tokio_now},
};

#[utoipa::path(
    get,
    path = "/api/healthcheck/server",
    tag = "server",
    responses(
        (status = 200, description = "Server is healthy", body = ServerHealthcheckResponse)
    )
)]
pub async fn healthcheck() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(ServerHealthcheckResponse {
            build_time: BUILD_TIME,
            axum_version: AXUM_VERSION,
            rust_version: RUST_VERSION,
        }),
    )
}

#[utoipa::path(
    get,
    path = "/api/healthcheck/state",
    tag = "server",
    responses(
        (status = 200, description = "Uptime and in-process counters", body = StateResponse)
    )
)]
pub async fn state_check(State(state): State<Arc<ServerState>>) -> impl IntoResponse {
    let start = tokio_now();

    http_resp(
        StateResponse {
            app_name_version: state.get_app_name_version(),
            server_uptime: format_duration(state.get_uptime()),
            responses_handled: state.get_responses_handled(),
            active_sessions: state.get_session_length(),
        },
        (),
        start,
    )
}
