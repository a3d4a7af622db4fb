use std::cmp::Ordering;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::{
    auth::user::AdminUser,
    blog::post::{NewPost, Post, PostPatch},
    subscriber::{EmailSubscriber, NewEmailSubscriber, SubscribeOutcome},
};

use super::{
    PostFilter, PostQuery, PostSort, PostSortField, PostStore, SortDirection, SubscriberStore,
    UserStore,
};

/// Process-local post storage; contents are lost on restart.
#[derive(Default)]
pub struct MemoryPostStore {
    posts: scc::HashMap<Uuid, Post>,
}

impl MemoryPostStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a fully-formed post as is, keeping its id and timestamps.
    pub async fn insert_raw(&self, post: Post) {
        if let Err((post_id, post)) = self.posts.insert_async(post.post_id, post).await {
            let _ = self
                .posts
                .update_async(&post_id, |_, existing| *existing = post)
                .await;
        }
    }

    async fn collect_matching(&self, filter: PostFilter) -> Vec<Post> {
        let mut matching: Vec<Post> = Vec::with_capacity(self.posts.len());
        self.posts
            .iter_async(|_, post| {
                if filter.matches(post) {
                    matching.push(post.clone());
                }
                true
            })
            .await;
        matching
    }
}

pub(crate) fn compare_posts(a: &Post, b: &Post, sort: PostSort) -> Ordering {
    let primary = match sort.field {
        PostSortField::CreatedAt => a.post_created_at.cmp(&b.post_created_at),
        PostSortField::UpdatedAt => a.post_updated_at.cmp(&b.post_updated_at),
        PostSortField::Title => a.post_title.cmp(&b.post_title),
    };
    let primary = match sort.direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.post_id.cmp(&b.post_id))
}

#[async_trait]
impl PostStore for MemoryPostStore {
    async fn count_posts(&self, filter: PostFilter) -> anyhow::Result<u64> {
        let mut count: u64 = 0;
        self.posts
            .iter_async(|_, post| {
                if filter.matches(post) {
                    count += 1;
                }
                true
            })
            .await;
        Ok(count)
    }

    async fn find_posts(&self, query: PostQuery) -> anyhow::Result<Vec<Post>> {
        let mut matching = self.collect_matching(query.filter).await;
        matching.sort_by(|a, b| compare_posts(a, b, query.sort));

        let skip = usize::try_from(query.skip).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(skip).take(limit).collect())
    }

    async fn get_post(&self, post_id: Uuid) -> anyhow::Result<Option<Post>> {
        Ok(self.posts.read_async(&post_id, |_, post| post.clone()).await)
    }

    async fn insert_post(&self, new_post: NewPost) -> anyhow::Result<Post> {
        let post = new_post.into_post(Uuid::new_v4(), Utc::now());
        self.posts
            .insert_async(post.post_id, post.clone())
            .await
            .map_err(|(post_id, _)| anyhow::anyhow!("Post id {post_id} already exists"))?;
        Ok(post)
    }

    async fn update_post(&self, post_id: Uuid, patch: PostPatch) -> anyhow::Result<Option<Post>> {
        let now = Utc::now();
        Ok(self
            .posts
            .update_async(&post_id, |_, post| {
                patch.apply_to(post, now);
                post.clone()
            })
            .await)
    }

    async fn delete_post(&self, post_id: Uuid) -> anyhow::Result<bool> {
        Ok(self.posts.remove_async(&post_id).await.is_some())
    }
}

#[derive(Default)]
pub struct MemoryUserStore {
    users: scc::HashMap<String, AdminUser>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_user_by_name(&self, user_name: &str) -> anyhow::Result<Option<AdminUser>> {
        Ok(self
            .users
            .read_async(user_name, |_, user| user.clone())
            .await)
    }

    async fn find_user_by_id(&self, user_id: Uuid) -> anyhow::Result<Option<AdminUser>> {
        let mut found: Option<AdminUser> = None;
        self.users
            .iter_async(|_, user| {
                if user.user_id == user_id {
                    found = Some(user.clone());
                    return false;
                }
                true
            })
            .await;
        Ok(found)
    }

    async fn upsert_user(
        &self,
        user_name: &str,
        user_password_hash: &str,
    ) -> anyhow::Result<AdminUser> {
        if let Some(user) = self
            .users
            .update_async(user_name, |_, user| {
                user.user_password_hash = user_password_hash.to_owned();
                user.clone()
            })
            .await
        {
            return Ok(user);
        }

        let user = AdminUser {
            user_id: Uuid::new_v4(),
            user_name: user_name.to_owned(),
            user_password_hash: user_password_hash.to_owned(),
            user_created_at: Utc::now(),
        };
        self.users
            .insert_async(user_name.to_owned(), user.clone())
            .await
            .map_err(|_| anyhow::anyhow!("User {user_name} was inserted concurrently"))?;
        Ok(user)
    }
}

#[derive(Default)]
pub struct MemorySubscriberStore {
    subscribers: scc::HashMap<String, EmailSubscriber>,
}

impl MemorySubscriberStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubscriberStore for MemorySubscriberStore {
    async fn insert_subscriber(
        &self,
        subscriber: NewEmailSubscriber,
    ) -> anyhow::Result<SubscribeOutcome> {
        let subscriber = subscriber.into_subscriber(Uuid::new_v4(), Utc::now());
        match self
            .subscribers
            .insert_async(subscriber.subscriber_email.clone(), subscriber.clone())
            .await
        {
            Ok(()) => Ok(SubscribeOutcome::Subscribed(subscriber)),
            Err(_) => Ok(SubscribeOutcome::AlreadySubscribed),
        }
    }
}
