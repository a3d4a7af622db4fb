//! Storage seams. Handlers and the paginator only see these traits; the
//! server picks the PostgreSQL or in-memory implementations at startup.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{
    auth::user::AdminUser,
    blog::post::{NewPost, Post, PostPatch, PublishingStatus},
    subscriber::{NewEmailSubscriber, SubscribeOutcome},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PostFilter {
    pub status: Option<PublishingStatus>,
}

impl PostFilter {
    pub fn any() -> Self {
        Self { status: None }
    }

    pub fn published() -> Self {
        Self {
            status: Some(PublishingStatus::Published),
        }
    }

    pub fn matches(&self, post: &Post) -> bool {
        self.status.is_none_or(|status| post.post_status == status)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostSortField {
    CreatedAt,
    UpdatedAt,
    Title,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostSort {
    pub field: PostSortField,
    pub direction: SortDirection,
}

impl PostSort {
    pub fn newest_first() -> Self {
        Self {
            field: PostSortField::CreatedAt,
            direction: SortDirection::Descending,
        }
    }
}

/// `find(filter).sort(field, direction).skip(n).limit(n)`.
/// Ties on the sort field are always broken by `post_id` ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub filter: PostFilter,
    pub sort: PostSort,
    pub skip: u64,
    pub limit: u64,
}

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn count_posts(&self, filter: PostFilter) -> anyhow::Result<u64>;
    async fn find_posts(&self, query: PostQuery) -> anyhow::Result<Vec<Post>>;
    async fn get_post(&self, post_id: Uuid) -> anyhow::Result<Option<Post>>;
    async fn insert_post(&self, new_post: NewPost) -> anyhow::Result<Post>;
    async fn update_post(&self, post_id: Uuid, patch: PostPatch) -> anyhow::Result<Option<Post>>;
    async fn delete_post(&self, post_id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_user_by_name(&self, user_name: &str) -> anyhow::Result<Option<AdminUser>>;
    async fn find_user_by_id(&self, user_id: Uuid) -> anyhow::Result<Option<AdminUser>>;
    async fn upsert_user(&self, user_name: &str, user_password_hash: &str)
    -> anyhow::Result<AdminUser>;
}

#[async_trait]
pub trait SubscriberStore: Send + Sync {
    async fn insert_subscriber(
        &self,
        subscriber: NewEmailSubscriber,
    ) -> anyhow::Result<SubscribeOutcome>;
}
