use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post},
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{
    docs::ApiDoc,
    handlers::{
        admin::{
            admin_console::admin_console_page,
            delete_post::delete_post,
            edit_post::{edit_post_page, update_post},
            submit_post::{create_post_page, submit_post},
            upload_featured_image::{
                MAX_IMAGE_SIZE, UPLOADS_PATH, upload_featured_image, upload_page,
            },
        },
        auth::{
            login::{login, login_page},
            logout::logout,
        },
        blog::{
            get_posts::get_posts,
            posts_pages::{post_details_page, posts_index_page},
            read_post::read_post,
        },
        server::{
            fallback::fallback_handler,
            healthcheck::{healthcheck, state_check},
            pages::about_us_page,
            root::home_page,
            static_assets::static_asset_handler,
        },
        subscriber::subscribe::{subscribe, subscribe_form},
    },
    init::state::ServerState,
};

use super::middleware::{
    auth::{admin_page_middleware, auth_middleware},
    is_logged_in::is_logged_in_middleware,
    logging::log_middleware,
};

// multipart framing on top of the largest accepted image
const MAX_UPLOAD_REQUEST_SIZE: usize = MAX_IMAGE_SIZE + 1024 * 1024;

pub fn build_router(state: Arc<ServerState>) -> axum::Router {
    let admin_page_middleware = from_fn_with_state(state.clone(), admin_page_middleware);
    let auth_middleware = from_fn_with_state(state.clone(), auth_middleware);
    let log_middleware = from_fn_with_state(state.clone(), log_middleware);
    let is_logged_in_middleware = from_fn_with_state(state.clone(), is_logged_in_middleware);
    let compression_middleware = CompressionLayer::new().gzip(true).zstd(true);
    let cors_layer = CorsLayer::very_permissive();

    // Server-rendered pages anyone may see
    let public_pages = Router::new()
        .route("/", get(home_page))
        .route("/about-us", get(about_us_page))
        .route("/posts", get(posts_index_page))
        .route("/posts/{post_id}", get(post_details_page))
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
        .route("/subscribe", post(subscribe_form))
        .route("/static/{*path}", get(static_asset_handler));

    // Admin pages; anonymous visitors are redirected to /login
    let admin_pages = Router::new()
        .route("/admin", get(admin_console_page))
        .route("/admin/create", get(create_post_page))
        .route("/admin/posts", post(submit_post))
        .route(
            "/admin/edit/{post_id}",
            get(edit_post_page).post(update_post),
        )
        .route("/admin/upload", get(upload_page))
        .route_layer(admin_page_middleware);

    // Admin JSON endpoints; anonymous callers get a 401 body
    let admin_api = Router::new()
        .route("/admin/posts/{post_id}", delete(delete_post))
        .route("/admin/upload", post(upload_featured_image))
        .route_layer(auth_middleware)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_REQUEST_SIZE));

    // Public JSON API
    let api_router = Router::new()
        .route("/api/healthcheck/server", get(healthcheck))
        .route("/api/healthcheck/state", get(state_check))
        .route("/api/blog/posts", get(get_posts))
        .route("/api/blog/posts/{post_id}", get(read_post))
        .route("/api/subscribers", post(subscribe));

    Router::new()
        .merge(public_pages)
        .merge(admin_pages)
        .merge(admin_api)
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest_service(
            UPLOADS_PATH,
            ServeDir::new(state.get_upload_dir().to_path_buf()),
        )
        .fallback(fallback_handler)
        .layer(is_logged_in_middleware)
        .layer(compression_middleware)
        .layer(log_middleware)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;
    use reqwest::{
        StatusCode, header,
        multipart::{Form, Part},
    };
    use serde_json::Value;
    use uuid::Uuid;

    use crate::domain::auth::user::AdminUser;
    use crate::domain::blog::post::PublishingStatus;
    use crate::store::memory::MemoryPostStore;
    use crate::test_support::{
        TEST_ADMIN_NAME, TEST_ADMIN_PASSWORD, UnreachablePostStore, client, login_cookie,
        seed_posts, spawn_app, test_admin, test_state, test_state_with_post_store,
        test_state_with_posts,
    };

    use super::MAX_IMAGE_SIZE;

    const PNG_BYTES: &[u8] = &[
        0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 13, b'I', b'H', b'D', b'R',
    ];

    fn image_form(file_name: &str, bytes: Vec<u8>) -> Form {
        Form::new().part("image", Part::bytes(bytes).file_name(file_name.to_string()))
    }

    fn post_cards(body: &str) -> usize {
        body.matches(r#"class="post-card""#).count()
    }

    #[tokio::test]
    async fn test_posts_index_pages_through_published_posts() {
        let store = MemoryPostStore::new();
        seed_posts(&store, 7, PublishingStatus::Published).await;
        seed_posts(&store, 2, PublishingStatus::Draft).await;
        let base = spawn_app(test_state_with_posts(store).await).await;
        let client = client();

        let first = client.get(format!("{base}/posts")).send().await.unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let body = first.text().await.unwrap();
        assert_eq!(post_cards(&body), 5);
        assert!(body.contains(r#"href="/posts?page=2&amp;limit=5">Older Posts"#));
        assert!(!body.contains("Newer Posts"));
        assert!(!body.contains("draft post"));

        let second = client
            .get(format!("{base}/posts?page=2"))
            .send()
            .await
            .unwrap();
        let body = second.text().await.unwrap();
        assert_eq!(post_cards(&body), 2);
        assert!(body.contains(r#"href="/posts?page=1&amp;limit=5">Newer Posts"#));
        assert!(!body.contains("Older Posts"));
    }

    #[tokio::test]
    async fn test_posts_index_with_garbage_query_falls_back_to_first_page() {
        let store = MemoryPostStore::new();
        seed_posts(&store, 3, PublishingStatus::Published).await;
        let base = spawn_app(test_state_with_posts(store).await).await;

        let resp = client()
            .get(format!("{base}/posts?page=abc&limit=-4"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.unwrap();
        assert_eq!(post_cards(&body), 3);
        assert!(!body.contains(r#"class="pagination""#));
    }

    #[tokio::test]
    async fn test_api_posts_json_shape() {
        let store = MemoryPostStore::new();
        let ids = seed_posts(&store, 4, PublishingStatus::Published).await;
        let base = spawn_app(test_state_with_posts(store).await).await;

        let json: Value = client()
            .get(format!("{base}/api/blog/posts?page=2&limit=3"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["total"], 4);
        let posts = json["data"]["posts"].as_array().unwrap();
        assert_eq!(posts.len(), 1);
        // oldest post lands on the last page
        assert_eq!(posts[0]["post_id"], ids[0].to_string());
        assert_eq!(json["data"]["next"]["has_next"], false);
        assert_eq!(json["data"]["previous"]["has_next"], true);
        assert_eq!(json["data"]["previous"]["page"], 1);
        assert_eq!(json["meta"]["metadata"]["page"], 2);
        assert_eq!(json["meta"]["metadata"]["limit"], 3);
    }

    #[tokio::test]
    async fn test_drafts_and_malformed_ids_are_not_found() {
        let store = MemoryPostStore::new();
        let drafts = seed_posts(&store, 1, PublishingStatus::Draft).await;
        let published = seed_posts(&store, 1, PublishingStatus::Published).await;
        let base = spawn_app(test_state_with_posts(store).await).await;
        let client = client();

        for path in [
            format!("/posts/{}", drafts[0]),
            "/posts/not-a-uuid".to_string(),
            format!("/api/blog/posts/{}", drafts[0]),
            "/api/blog/posts/not-a-uuid".to_string(),
        ] {
            let resp = client.get(format!("{base}{path}")).send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{path}");
        }

        let resp = client
            .get(format!("{base}/posts/{}", published[0]))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.text().await.unwrap().contains("Rich broth, springy noodles."));
    }

    #[tokio::test]
    async fn test_admin_routes_require_a_session() {
        let base = spawn_app(test_state().await).await;
        let client = client();

        let resp = client.get(format!("{base}/admin")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/login");

        let resp = client
            .delete(format!("{base}/admin/posts/{}", Uuid::new_v4()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["success"], false);

        let resp = client
            .get(format!("{base}/admin"))
            .header(header::COOKIE, format!("session_id={}", Uuid::new_v4()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_failures_explain_themselves() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state).await;
        let client = client();

        let resp = client
            .post(format!("{base}/login"))
            .form(&[("username", "nobody"), ("password", TEST_ADMIN_PASSWORD)])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.text().await.unwrap().contains("Username does not exist."));

        let resp = client
            .post(format!("{base}/login"))
            .form(&[("username", TEST_ADMIN_NAME), ("password", "miso")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body = resp.text().await.unwrap();
        assert!(body.contains("Incorrect password."));
        assert!(body.contains(&format!(r#"value="{TEST_ADMIN_NAME}""#)));
    }

    #[tokio::test]
    async fn test_login_then_logout() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state.clone()).await;
        let client = client();

        let cookie = login_cookie(&client, &base).await;
        assert_eq!(state.get_session_length(), 1);

        let resp = client
            .get(format!("{base}/admin"))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.text().await.unwrap().contains("Admin Console"));

        // already logged in
        let resp = client
            .get(format!("{base}/login"))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/admin");

        let resp = client
            .post(format!("{base}/logout"))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/");
        assert_eq!(state.get_session_length(), 0);

        let resp = client
            .get(format!("{base}/admin"))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/login");
    }

    #[tokio::test]
    async fn test_create_edit_and_publish_post() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state.clone()).await;
        let client = client();
        let cookie = login_cookie(&client, &base).await;

        let resp = client
            .post(format!("{base}/admin/posts"))
            .header(header::COOKIE, &cookie)
            .form(&[
                ("title", "Shoyu at Midnight"),
                ("snippet", "A late bowl."),
                ("body", "**Dark** soy tare."),
                ("post_status", "draft"),
                ("author", "Chef"),
                ("featured_image", ""),
                ("tags", "shoyu, late night"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        let location = resp.headers()[header::LOCATION].to_str().unwrap().to_string();
        let raw_id = location.strip_prefix("/admin/edit/").unwrap();
        let post_id = Uuid::parse_str(raw_id).unwrap();

        // drafts stay off the public listing
        let body = client
            .get(format!("{base}/posts"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(!body.contains("Shoyu at Midnight"));

        let resp = client
            .post(format!("{base}{location}"))
            .header(header::COOKIE, &cookie)
            .form(&[
                ("title", "Shoyu at Midnight"),
                ("snippet", "A late bowl."),
                ("body", "**Dark** soy tare."),
                ("post_status", "published"),
                ("author", "Chef"),
                ("tags", "shoyu,late night"),
            ])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);

        let post = state.posts().get_post(post_id).await.unwrap().unwrap();
        assert_eq!(post.post_status, PublishingStatus::Published);
        assert_eq!(post.post_tags, vec!["shoyu", "latenight"]);

        let body = client
            .get(format!("{base}/posts/{post_id}"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert!(body.contains("<strong>Dark</strong>"));
    }

    #[tokio::test]
    async fn test_create_post_with_missing_title_rerenders_form() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state).await;
        let client = client();
        let cookie = login_cookie(&client, &base).await;

        let resp = client
            .post(format!("{base}/admin/posts"))
            .header(header::COOKIE, &cookie)
            .form(&[("title", "   "), ("snippet", "s"), ("body", "b")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(resp.text().await.unwrap().contains("Title is required."));
    }

    #[tokio::test]
    async fn test_delete_post_json() {
        let store = MemoryPostStore::new();
        let ids = seed_posts(&store, 2, PublishingStatus::Published).await;
        let state = test_state_with_posts(store).await;
        test_admin(&state).await;
        let base = spawn_app(state.clone()).await;
        let client = client();
        let cookie = login_cookie(&client, &base).await;

        let resp = client
            .delete(format!("{base}/admin/posts/{}", ids[0]))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["data"]["deleted_post_id"], ids[0].to_string());
        assert_eq!(json["data"]["redirect"], "/admin");
        assert!(state.posts().get_post(ids[0]).await.unwrap().is_none());

        let resp = client
            .delete(format!("{base}/admin/posts/{}", ids[0]))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_subscribe_api_rejects_duplicates() {
        let base = spawn_app(test_state().await).await;
        let client = client();
        let payload = serde_json::json!({ "name": "Noodle Fan", "email": "fan@example.com" });

        let resp = client
            .post(format!("{base}/api/subscribers"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["data"]["subscriber_email"], "fan@example.com");

        let resp = client
            .post(format!("{base}/api/subscribers"))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let resp = client
            .post(format!("{base}/api/subscribers"))
            .json(&serde_json::json!({ "name": "x", "email": "not-an-email" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_subscribe_form_renders_thank_you_page() {
        let base = spawn_app(test_state().await).await;

        let resp = client()
            .post(format!("{base}/subscribe"))
            .form(&[("name", "Noodle Fan"), ("email", "form@example.com")])
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let body = resp.text().await.unwrap();
        assert!(body.contains("Thanks for subscribing!"));
        assert!(body.contains("form@example.com"));
    }

    #[tokio::test]
    async fn test_unknown_path_renders_not_found_page() {
        let base = spawn_app(test_state().await).await;

        let resp = client()
            .get(format!("{base}/no/such/bowl"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert!(resp.headers().get("x-error-code").is_none());
        assert!(resp.text().await.unwrap().contains("that bowl is empty"));
    }

    #[tokio::test]
    async fn test_home_about_and_healthcheck() {
        let store = MemoryPostStore::new();
        seed_posts(&store, 4, PublishingStatus::Published).await;
        let base = spawn_app(test_state_with_posts(store).await).await;
        let client = client();

        let body = client
            .get(format!("{base}/"))
            .send()
            .await
            .unwrap()
            .text()
            .await
            .unwrap();
        assert_eq!(post_cards(&body), 3);
        assert!(body.contains(r#"action="/subscribe""#));

        let resp = client.get(format!("{base}/about-us")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let resp = client
            .get(format!("{base}/api/healthcheck/server"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-server-built-time"));

        let json: Value = client
            .get(format!("{base}/api/healthcheck/state"))
            .send()
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(json["data"]["app_name_version"], "ramenbowl test");
    }

    #[tokio::test]
    async fn test_static_stylesheet_is_served() {
        let base = spawn_app(test_state().await).await;

        let resp = client()
            .get(format!("{base}/static/styles.css"))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "text/css");
    }

    #[tokio::test]
    async fn test_posts_index_storage_failure_returns_raw_error_as_json() {
        let state = test_state_with_post_store(Arc::new(UnreachablePostStore {
            reason: "connection refused by broth-db",
        }))
        .await;
        let base = spawn_app(state).await;
        let client = client();

        for path in ["/posts", "/api/blog/posts"] {
            let resp = client.get(format!("{base}{path}")).send().await.unwrap();
            assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR, "{path}");
            assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
            assert!(resp.headers().get("x-error-detail").is_none());

            let json: Value = resp.json().await.unwrap();
            assert_eq!(json["success"], false);
            assert_eq!(json["http_status_code"], 500);
            assert_eq!(json["message"], "Database query failed!");
            assert_eq!(json["error_message"], "connection refused by broth-db");
        }
    }

    #[tokio::test]
    async fn test_session_of_removed_account_is_dropped() {
        let state = test_state().await;
        let ghost = AdminUser {
            user_id: Uuid::new_v4(),
            user_name: "ghost".to_string(),
            user_password_hash: String::new(),
            user_created_at: Utc::now(),
        };
        let session = state.new_session(&ghost).await.unwrap();
        let base = spawn_app(state.clone()).await;
        let cookie = format!("session_id={}", session.session_id);

        let resp = client()
            .get(format!("{base}/admin"))
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()[header::LOCATION], "/login");
        assert_eq!(state.get_session_length(), 0);
    }

    #[tokio::test]
    async fn test_upload_stores_image_and_serves_it() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state.clone()).await;
        let client = client();
        let cookie = login_cookie(&client, &base).await;

        let form = image_form("bowl.png", PNG_BYTES.to_vec())
            .part("extra", Part::bytes(b"%PDF-1.7".to_vec()).file_name("notes.pdf"));
        let resp = client
            .post(format!("{base}/admin/upload"))
            .header(header::COOKIE, &cookie)
            .multipart(form)
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["data"]["content_type"], "image/png");
        assert_eq!(json["data"]["file_size"], PNG_BYTES.len());

        let image_path = json["data"]["image_path"].as_str().unwrap().to_string();
        let file_name = image_path.strip_prefix("/uploads/").unwrap();
        let (stem, extension) = file_name.split_once('.').unwrap();
        assert!(Uuid::parse_str(stem).is_ok());
        assert_eq!(extension, "png");
        assert!(state.get_upload_dir().join(file_name).exists());

        let resp = client.get(format!("{base}{image_path}")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.bytes().await.unwrap().as_ref(), PNG_BYTES);
    }

    #[tokio::test]
    async fn test_upload_rejects_non_images_and_oversized_files() {
        let state = test_state().await;
        test_admin(&state).await;
        let base = spawn_app(state).await;
        let client = client();
        let cookie = login_cookie(&client, &base).await;

        let resp = client
            .post(format!("{base}/admin/upload"))
            .header(header::COOKIE, &cookie)
            .multipart(image_form("menu.pdf", b"%PDF-1.7 not a bowl".to_vec()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["message"], "Unsupported image format!");

        let mut oversized = PNG_BYTES.to_vec();
        oversized.resize(MAX_IMAGE_SIZE + 1, 0);
        let resp = client
            .post(format!("{base}/admin/upload"))
            .header(header::COOKIE, &cookie)
            .multipart(image_form("huge.png", oversized))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_upload_requires_a_session() {
        let base = spawn_app(test_state().await).await;

        let resp = client()
            .post(format!("{base}/admin/upload"))
            .multipart(image_form("bowl.png", PNG_BYTES.to_vec()))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let json: Value = resp.json().await.unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Unauthorized access!");
    }
}
