use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::auth::user::AdminUser;
use crate::store::{PostStore, SubscriberStore, UserStore};

use super::builder::ServerStateBuilder;
use super::session::Session;

pub struct ServerState {
    pub(crate) app_name_version: String,
    pub(crate) server_start_time: tokio::time::Instant,
    pub(crate) post_store: Arc<dyn PostStore>,
    pub(crate) user_store: Arc<dyn UserStore>,
    pub(crate) subscriber_store: Arc<dyn SubscriberStore>,
    pub(crate) responses_handled: AtomicU64,
    pub(crate) session_map: scc::HashMap<Uuid, Session>, // read/write
    pub(crate) session_duration: chrono::Duration,
    pub(crate) pagination_limit: u64,
    pub(crate) upload_dir: PathBuf,
    pub(crate) cookie_secure: bool,
}

impl ServerState {
    pub async fn new_session(&self, user: &AdminUser) -> anyhow::Result<Session> {
        let session_id = Uuid::new_v4();
        let now = Utc::now();
        let session = Session {
            session_id,
            user_id: user.user_id,
            user_name: user.user_name.clone(),
            created_at: now,
            expires_at: now + self.session_duration,
        };

        match self
            .session_map
            .insert_async(session_id, session.clone())
            .await
        {
            Ok(_) => (),
            Err(_) => {
                return Err(anyhow::anyhow!(
                    "Failed to insert session into scc::HashMap; key already exists!"
                ));
            }
        };

        Ok(session)
    }

    pub async fn get_session(&self, session_id: &Uuid) -> anyhow::Result<Session> {
        match self
            .session_map
            .read_async(session_id, |_, v| v.clone())
            .await
        {
            Some(session) => Ok(session),
            None => Err(anyhow::anyhow!("Session not found")),
        }
    }

    /// Like `get_session`, but an expired session is dropped and reported as absent.
    pub async fn get_live_session(&self, session_id: &Uuid) -> Option<Session> {
        let session = self.get_session(session_id).await.ok()?;
        if session.is_unexpired() {
            Some(session)
        } else {
            let _ = self.session_map.remove_async(session_id).await;
            None
        }
    }

    pub fn get_session_length(&self) -> usize {
        self.session_map.len()
    }

    pub async fn remove_session(&self, session_id: Uuid) -> anyhow::Result<(Uuid, usize)> {
        match self.session_map.remove_async(&session_id).await {
            Some((session_id, _)) => Ok((session_id, self.session_map.len())),
            None => Err(anyhow::anyhow!("Session not found")),
        }
    }

    pub async fn purge_expired_sessions(&self) -> (usize, usize) {
        self.purge_sessions_expired_at(Utc::now()).await
    }

    pub async fn purge_sessions_expired_at(&self, now: DateTime<Utc>) -> (usize, usize) {
        let (mut pruned, mut remaining): (usize, usize) = (0, 0);

        self.session_map
            .iter_mut_async(|entry| {
                // `ConsumableEntry` derefs to the value
                if entry.expires_at <= now {
                    pruned += 1;
                    let _ = entry.consume();
                } else {
                    remaining += 1;
                }
                true
            })
            .await;

        (pruned, remaining)
    }

    pub fn builder() -> ServerStateBuilder {
        ServerStateBuilder::default()
    }

    pub fn get_app_name_version(&self) -> String {
        self.app_name_version.clone()
    }

    pub fn get_uptime(&self) -> tokio::time::Duration {
        self.server_start_time.elapsed()
    }

    pub fn posts(&self) -> &dyn PostStore {
        self.post_store.as_ref()
    }

    pub fn users(&self) -> &dyn UserStore {
        self.user_store.as_ref()
    }

    pub fn subscribers(&self) -> &dyn SubscriberStore {
        self.subscriber_store.as_ref()
    }

    pub fn get_pagination_limit(&self) -> u64 {
        self.pagination_limit
    }

    pub fn get_upload_dir(&self) -> &Path {
        &self.upload_dir
    }

    pub fn is_cookie_secure(&self) -> bool {
        self.cookie_secure
    }

    pub fn get_session_duration(&self) -> chrono::Duration {
        self.session_duration
    }

    pub fn get_responses_handled(&self) -> u64 {
        std::sync::atomic::AtomicU64::load(
            &self.responses_handled,
            std::sync::atomic::Ordering::SeqCst,
        )
    }

    pub fn add_responses_handled(&self) {
        self.responses_handled
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
    }
}
