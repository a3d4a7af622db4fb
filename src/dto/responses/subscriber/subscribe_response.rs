use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Serialize, ToSchema)]
pub struct SubscribeResponse {
    pub subscriber_id: Uuid,
    pub subscriber_email: String,
}
