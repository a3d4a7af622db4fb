use chrono::{DateTime, Utc};
use uuid::Uuid;

pub const DEFAULT_SESSION_DURATION: chrono::Duration = chrono::Duration::hours(1);

#[derive(Debug, Clone, serde_derive::Serialize, serde_derive::Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_unexpired(&self) -> bool {
        self.is_unexpired_at(Utc::now())
    }

    pub fn is_unexpired_at(&self, now: DateTime<Utc>) -> bool {
        self.created_at <= now && self.expires_at > now
    }

    pub fn get_user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn get_user_name(&self) -> &str {
        &self.user_name
    }
}
