use std::sync::Arc;

use axum::{
    extract::{Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, IntoResponse},
};
use image::ImageFormat;
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    dto::responses::{blog::upload_image_response::UploadImageResponse, response_data::http_resp},
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
    views::{admin::render_upload_form, layout::render_page},
};

pub const MAX_IMAGE_SIZE: usize = 1024 * 1024 * 10; // 10MB
pub const UPLOADS_PATH: &str = "/uploads";

const ALLOWED_FORMATS: [ImageFormat; 8] = [
    ImageFormat::Png,
    ImageFormat::Jpeg,
    ImageFormat::Gif,
    ImageFormat::WebP,
    ImageFormat::Bmp,
    ImageFormat::Tiff,
    ImageFormat::Ico,
    ImageFormat::Avif,
];

/// Sniffs the bytes themselves; the client's filename and content type are not trusted.
pub fn detect_image_format(bytes: &[u8]) -> Option<ImageFormat> {
    image::guess_format(bytes)
        .ok()
        .filter(|format| ALLOWED_FORMATS.contains(format))
}

fn multipart_err(e: MultipartError) -> CodeErrorResp {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        code_err(CodeError::FILE_TOO_LARGE, e)
    } else {
        code_err(CodeError::FILE_UPLOAD_ERROR, e)
    }
}

pub async fn upload_page() -> Html<String> {
    Html(render_page("File Upload", true, &render_upload_form()))
}

#[utoipa::path(
    post,
    path = "/admin/upload",
    tag = "admin",
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Image stored", body = UploadImageResponse),
        (status = 400, description = "Missing file or not an image", body = CodeErrorResp),
        (status = 401, description = "No valid session", body = CodeErrorResp),
        (status = 413, description = "Image larger than 10MB", body = CodeErrorResp)
    )
)]
pub async fn upload_featured_image(
    State(state): State<Arc<ServerState>>,
    mut multipart: Multipart,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let mut uploaded: Option<Vec<u8>> = None;

    while let Some(mut field) = multipart.next_field().await.map_err(multipart_err)? {
        // only the first file field counts
        if uploaded.is_some() || field.file_name().is_none() {
            continue;
        }

        let mut bytes: Vec<u8> = Vec::new();
        while let Some(chunk) = field.chunk().await.map_err(multipart_err)? {
            if bytes.len() + chunk.len() > MAX_IMAGE_SIZE {
                return Err(code_err(
                    CodeError::FILE_TOO_LARGE,
                    format!("limit is {MAX_IMAGE_SIZE} bytes"),
                ));
            }
            bytes.extend_from_slice(&chunk);
        }
        uploaded = Some(bytes);
    }

    let bytes = uploaded
        .filter(|b| !b.is_empty())
        .ok_or_else(|| code_err(CodeError::FILE_UPLOAD_ERROR, "No file in upload"))?;

    let format = detect_image_format(&bytes)
        .ok_or_else(|| code_err(CodeError::UNSUPPORTED_IMAGE_FORMAT, "Not a supported image"))?;

    let extension = format.extensions_str().first().copied().unwrap_or("img");
    let file_name = format!("{}.{extension}", Uuid::new_v4());
    let upload_dir = state.get_upload_dir();

    tokio::fs::create_dir_all(upload_dir).await.map_err(|e| {
        error!(error = %e, dir = %upload_dir.display(), "Could not create upload directory");
        code_err(CodeError::FILE_WRITE_ERROR, e)
    })?;
    tokio::fs::write(upload_dir.join(&file_name), &bytes)
        .await
        .map_err(|e| code_err(CodeError::FILE_WRITE_ERROR, e))?;

    info!(file_name = %file_name, size = bytes.len(), format = ?format, "Featured image stored.");

    Ok(http_resp(
        UploadImageResponse {
            image_path: format!("{UPLOADS_PATH}/{file_name}"),
            file_size: bytes.len(),
            content_type: format.to_mime_type().to_string(),
        },
        (),
        start,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: &[u8] = &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];

    #[test]
    fn test_detects_png_by_magic_bytes() {
        assert_eq!(detect_image_format(PNG_MAGIC), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::Png.extensions_str().first(), Some(&"png"));
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(detect_image_format(b"%PDF-1.7 not an image"), None);
        assert_eq!(detect_image_format(b""), None);
    }
}
