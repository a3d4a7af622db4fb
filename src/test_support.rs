//! Fixtures shared by unit and router tests.

use std::net::SocketAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::user::AdminUser;
use crate::domain::blog::post::{NewPost, Post, PostPatch, PublishingStatus};
use crate::init::state::ServerState;
use crate::routers::main_router::build_router;
use crate::store::memory::MemoryPostStore;
use crate::store::{PostFilter, PostQuery, PostStore, UserStore};
use crate::util::crypto::hash_pw::hash_pw;

pub const TEST_ADMIN_NAME: &str = "admin";
pub const TEST_ADMIN_PASSWORD: &str = "tonkotsu-4-life";

static SEED_CLOCK: AtomicI64 = AtomicI64::new(0);

pub fn new_post(title: &str, status: PublishingStatus) -> NewPost {
    NewPost {
        post_title: title.to_string(),
        post_snippet: format!("{title} in a sentence."),
        post_body: format!("# {title}\n\nRich broth, springy noodles."),
        post_status: status,
        post_author: Some("Test Author".to_string()),
        post_featured_image: None,
        post_tags: vec!["ramen".to_string()],
    }
}

/// Every seeded post gets a distinct, strictly increasing `created_at`,
/// so the returned ids run oldest to newest.
fn next_seed_time() -> DateTime<Utc> {
    let tick = SEED_CLOCK.fetch_add(1, Ordering::SeqCst);
    DateTime::from_timestamp(1_700_000_000 + tick * 60, 0).unwrap()
}

pub async fn seed_posts(store: &MemoryPostStore, n: usize, status: PublishingStatus) -> Vec<Uuid> {
    let mut ids = Vec::with_capacity(n);
    for i in 0..n {
        let post = new_post(&format!("{status} post {i}"), status)
            .into_post(Uuid::new_v4(), next_seed_time());
        ids.push(post.post_id);
        store.insert_raw(post).await;
    }
    ids
}

/// Every call fails the way an unreachable database would.
pub struct UnreachablePostStore {
    pub reason: &'static str,
}

#[async_trait]
impl PostStore for UnreachablePostStore {
    async fn count_posts(&self, _filter: PostFilter) -> anyhow::Result<u64> {
        anyhow::bail!(self.reason)
    }

    async fn find_posts(&self, _query: PostQuery) -> anyhow::Result<Vec<Post>> {
        anyhow::bail!(self.reason)
    }

    async fn get_post(&self, _post_id: Uuid) -> anyhow::Result<Option<Post>> {
        anyhow::bail!(self.reason)
    }

    async fn insert_post(&self, _new_post: NewPost) -> anyhow::Result<Post> {
        anyhow::bail!(self.reason)
    }

    async fn update_post(&self, _post_id: Uuid, _patch: PostPatch) -> anyhow::Result<Option<Post>> {
        anyhow::bail!(self.reason)
    }

    async fn delete_post(&self, _post_id: Uuid) -> anyhow::Result<bool> {
        anyhow::bail!(self.reason)
    }
}

pub async fn test_state() -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("ramenbowl test".to_string())
            .server_start_time(tokio::time::Instant::now())
            .upload_dir(std::env::temp_dir().join(format!("ramenbowl-test-{}", Uuid::new_v4())))
            .build()
            .unwrap(),
    )
}

pub async fn test_state_with_posts(store: MemoryPostStore) -> Arc<ServerState> {
    test_state_with_post_store(Arc::new(store)).await
}

pub async fn test_state_with_post_store(post_store: Arc<dyn PostStore>) -> Arc<ServerState> {
    Arc::new(
        ServerState::builder()
            .app_name_version("ramenbowl test".to_string())
            .server_start_time(tokio::time::Instant::now())
            .post_store(post_store)
            .upload_dir(std::env::temp_dir().join(format!("ramenbowl-test-{}", Uuid::new_v4())))
            .build()
            .unwrap(),
    )
}

pub async fn test_admin(state: &ServerState) -> AdminUser {
    let hash = hash_pw(TEST_ADMIN_PASSWORD.to_string()).await.unwrap();
    state.users().upsert_user(TEST_ADMIN_NAME, &hash).await.unwrap()
}

/// Serves the full router on an ephemeral port and returns its base url.
pub async fn spawn_app(state: Arc<ServerState>) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let router = build_router(state);

    tokio::spawn(async move {
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    format!("http://{addr}")
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

/// Logs in through the form and returns a ready-to-send `Cookie` header value.
pub async fn login_cookie(client: &reqwest::Client, base: &str) -> String {
    let resp = client
        .post(format!("{base}/login"))
        .form(&[
            ("username", TEST_ADMIN_NAME),
            ("password", TEST_ADMIN_PASSWORD),
        ])
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), reqwest::StatusCode::SEE_OTHER);

    let set_cookie = resp
        .headers()
        .get(reqwest::header::SET_COOKIE)
        .unwrap()
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().to_string()
}
