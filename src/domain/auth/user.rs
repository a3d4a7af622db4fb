use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde_derive::Serialize;
use uuid::Uuid;

use crate::schema::admin_users;

#[derive(Debug, Clone, Serialize, Queryable, Selectable)]
#[diesel(table_name = admin_users)]
pub struct AdminUser {
    pub user_id: Uuid,
    pub user_name: String,
    #[serde(skip)]
    pub user_password_hash: String,
    pub user_created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = admin_users)]
pub struct AdminUserInsertable<'a> {
    pub user_id: &'a Uuid,
    pub user_name: &'a str,
    pub user_password_hash: &'a str,
    pub user_created_at: DateTime<Utc>,
}

impl<'a> AdminUserInsertable<'a> {
    pub fn new(user_id: &'a Uuid, user_name: &'a str, user_password_hash: &'a str) -> Self {
        Self {
            user_id,
            user_name,
            user_password_hash,
            user_created_at: Utc::now(),
        }
    }
}
