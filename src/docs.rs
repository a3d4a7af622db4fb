//! OpenAPI documentation registration for Swagger UI.
//!
//! Utoipa only exposes operations listed in `#[openapi(paths(...))]`;
//! handler functions still need their own `#[utoipa::path(...)]` attributes.

use utoipa::OpenApi;

// ---- handlers (for `paths(...)`) ----
use crate::handlers::{
    admin::{delete_post, upload_featured_image},
    blog::{get_posts, read_post},
    server::healthcheck,
    subscriber::subscribe,
};

// ---- schemas (for `components(schemas(...))`) ----
use crate::domain::{
    blog::{
        paginator::{PageLink, PageResult},
        post::{Post, PublishingStatus},
    },
    subscriber::EmailSubscriber,
};
use crate::dto::{
    requests::subscriber::subscribe_request::SubscribeRequest,
    responses::{
        blog::{
            delete_post_response::DeletePostResponse, get_posts::GetPostsMeta,
            upload_image_response::UploadImageResponse,
        },
        server::{healthcheck_response::ServerHealthcheckResponse, state_response::StateResponse},
        subscriber::subscribe_response::SubscribeResponse,
    },
};
use crate::errors::code_error::CodeErrorResp;

/// Central OpenAPI document for Swagger UI.
#[derive(OpenApi)]
#[openapi(
    paths(
        // --- server ---
        healthcheck::healthcheck,
        healthcheck::state_check,

        // --- blog ---
        get_posts::get_posts,
        read_post::read_post,

        // --- admin ---
        delete_post::delete_post,
        upload_featured_image::upload_featured_image,

        // --- subscriber ---
        subscribe::subscribe,
    ),
    components(
        schemas(
            // shared error response
            CodeErrorResp,

            // --- blog ---
            Post,
            PublishingStatus,
            PageLink,
            PageResult,
            GetPostsMeta,
            DeletePostResponse,
            UploadImageResponse,

            // --- server ---
            ServerHealthcheckResponse,
            StateResponse,

            // --- subscriber ---
            SubscribeRequest,
            SubscribeResponse,
            EmailSubscriber,
        )
    ),
    tags(
        (name = "server", description = "Server status endpoints"),
        (name = "blog", description = "Published posts"),
        (name = "admin", description = "Admin endpoints; require a session cookie"),
        (name = "subscriber", description = "Email subscription")
    )
)]
pub struct ApiDoc;
