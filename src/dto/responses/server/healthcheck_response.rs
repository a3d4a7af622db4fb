use serde_derive::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct ServerHealthcheckResponse {
    pub build_time: &'static str,
    pub axum_version: &'static str,
    pub rust_version: &'static str,
}
