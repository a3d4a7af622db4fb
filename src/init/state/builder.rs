use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use crate::domain::blog::paginator::PAGINATION_LIMIT;
use crate::store::memory::{MemoryPostStore, MemorySubscriberStore, MemoryUserStore};
use crate::store::{PostStore, SubscriberStore, UserStore};

use super::server_state::ServerState;
use super::session::DEFAULT_SESSION_DURATION;

#[derive(Default)]
pub struct ServerStateBuilder {
    app_name_version: Option<String>,
    server_start_time: Option<tokio::time::Instant>,
    post_store: Option<Arc<dyn PostStore>>,
    user_store: Option<Arc<dyn UserStore>>,
    subscriber_store: Option<Arc<dyn SubscriberStore>>,
    session_duration: Option<chrono::Duration>,
    pagination_limit: Option<u64>,
    upload_dir: Option<PathBuf>,
    cookie_secure: bool,
}

impl ServerStateBuilder {
    pub fn app_name_version(mut self, app_name_version: String) -> Self {
        self.app_name_version = Some(app_name_version);
        self
    }

    pub fn server_start_time(mut self, server_start_time: tokio::time::Instant) -> Self {
        self.server_start_time = Some(server_start_time);
        self
    }

    pub fn post_store(mut self, post_store: Arc<dyn PostStore>) -> Self {
        self.post_store = Some(post_store);
        self
    }

    pub fn user_store(mut self, user_store: Arc<dyn UserStore>) -> Self {
        self.user_store = Some(user_store);
        self
    }

    pub fn subscriber_store(mut self, subscriber_store: Arc<dyn SubscriberStore>) -> Self {
        self.subscriber_store = Some(subscriber_store);
        self
    }

    pub fn session_duration(mut self, session_duration: chrono::Duration) -> Self {
        self.session_duration = Some(session_duration);
        self
    }

    pub fn pagination_limit(mut self, pagination_limit: u64) -> Self {
        self.pagination_limit = Some(pagination_limit);
        self
    }

    pub fn upload_dir(mut self, upload_dir: PathBuf) -> Self {
        self.upload_dir = Some(upload_dir);
        self
    }

    pub fn cookie_secure(mut self, cookie_secure: bool) -> Self {
        self.cookie_secure = cookie_secure;
        self
    }

    /// Stores that were not set default to the in-memory implementations.
    pub fn build(self) -> anyhow::Result<ServerState> {
        Ok(ServerState {
            app_name_version: self
                .app_name_version
                .ok_or_else(|| anyhow::anyhow!("app_name_version is required"))?,
            server_start_time: self
                .server_start_time
                .ok_or_else(|| anyhow::anyhow!("server_start_time is required"))?,
            post_store: self
                .post_store
                .unwrap_or_else(|| Arc::new(MemoryPostStore::new())),
            user_store: self
                .user_store
                .unwrap_or_else(|| Arc::new(MemoryUserStore::new())),
            subscriber_store: self
                .subscriber_store
                .unwrap_or_else(|| Arc::new(MemorySubscriberStore::new())),
            responses_handled: AtomicU64::new(0u64),
            session_map: scc::HashMap::new(),
            session_duration: self.session_duration.unwrap_or(DEFAULT_SESSION_DURATION),
            pagination_limit: self.pagination_limit.unwrap_or(PAGINATION_LIMIT),
            upload_dir: self.upload_dir.unwrap_or_else(|| PathBuf::from("uploads")),
            cookie_secure: self.cookie_secure,
        })
    }
}
