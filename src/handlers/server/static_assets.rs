use axum::{
    extract::Path,
    http::{StatusCode, header},
    response::IntoResponse,
};
use mime_guess::from_path;
use rust_embed::Embed;

#[derive(Embed)]
#[folder = "static/"]
struct StaticAssets;

/// Serves files embedded from `static/`, preferring a pre-compressed `.gz` twin.
pub async fn static_asset_handler(Path(path): Path<String>) -> impl IntoResponse {
    let mime = from_path(&path).first_or_octet_stream();

    let gzip_path = format!("{path}.gz");
    if let Some(content) = StaticAssets::get(&gzip_path) {
        return (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, mime.as_ref()),
                (header::CONTENT_ENCODING, "gzip"),
            ],
            content.data,
        )
            .into_response();
    }

    if let Some(content) = StaticAssets::get(&path) {
        return (
            StatusCode::OK,
            [(header::CONTENT_TYPE, mime.as_ref())],
            content.data,
        )
            .into_response();
    }

    (StatusCode::NOT_FOUND, "Not Found").into_response()
}
