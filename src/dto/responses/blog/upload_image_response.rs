use serde_derive::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct UploadImageResponse {
    /// Public path, usable as a post's featured image
    pub image_path: String,
    pub file_size: usize,
    pub content_type: String,
}
