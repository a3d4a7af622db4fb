use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde_derive::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::posts;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PublishingStatus {
    #[default]
    Draft,
    Published,
}

impl PublishingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PublishingStatus::Draft => "draft",
            PublishingStatus::Published => "published",
        }
    }
}

impl fmt::Display for PublishingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PublishingStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "draft" => Ok(PublishingStatus::Draft),
            "published" => Ok(PublishingStatus::Published),
            other => Err(anyhow::anyhow!("Unknown publishing status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Post {
    pub post_id: Uuid,
    pub post_title: String,
    pub post_snippet: String,
    pub post_body: String,
    pub post_status: PublishingStatus,
    pub post_author: Option<String>,
    pub post_featured_image: Option<String>,
    pub post_tags: Vec<String>,
    pub post_created_at: DateTime<Utc>,
    pub post_updated_at: DateTime<Utc>,
}

impl Post {
    pub fn is_published(&self) -> bool {
        self.post_status == PublishingStatus::Published
    }
}

/// Row shape of the `posts` table; the status column is plain text.
#[derive(Queryable, Selectable)]
#[diesel(table_name = posts)]
pub struct PostRow {
    pub post_id: Uuid,
    pub post_title: String,
    pub post_snippet: String,
    pub post_body: String,
    pub post_status: String,
    pub post_author: Option<String>,
    pub post_featured_image: Option<String>,
    pub post_tags: Vec<String>,
    pub post_created_at: DateTime<Utc>,
    pub post_updated_at: DateTime<Utc>,
}

impl TryFrom<PostRow> for Post {
    type Error = anyhow::Error;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        Ok(Self {
            post_id: row.post_id,
            post_title: row.post_title,
            post_snippet: row.post_snippet,
            post_body: row.post_body,
            post_status: row.post_status.parse()?,
            post_author: row.post_author,
            post_featured_image: row.post_featured_image,
            post_tags: row.post_tags,
            post_created_at: row.post_created_at,
            post_updated_at: row.post_updated_at,
        })
    }
}

/// Validated input for creating a post.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub post_title: String,
    pub post_snippet: String,
    pub post_body: String,
    pub post_status: PublishingStatus,
    pub post_author: Option<String>,
    pub post_featured_image: Option<String>,
    pub post_tags: Vec<String>,
}

/// Full replacement of the editable fields; the admin edit form always submits all of them.
pub type PostPatch = NewPost;

impl NewPost {
    pub fn into_post(self, post_id: Uuid, now: DateTime<Utc>) -> Post {
        Post {
            post_id,
            post_title: self.post_title,
            post_snippet: self.post_snippet,
            post_body: self.post_body,
            post_status: self.post_status,
            post_author: self.post_author,
            post_featured_image: self.post_featured_image,
            post_tags: self.post_tags,
            post_created_at: now,
            post_updated_at: now,
        }
    }

    pub fn apply_to(self, post: &mut Post, now: DateTime<Utc>) {
        post.post_title = self.post_title;
        post.post_snippet = self.post_snippet;
        post.post_body = self.post_body;
        post.post_status = self.post_status;
        post.post_author = self.post_author;
        post.post_featured_image = self.post_featured_image;
        post.post_tags = self.post_tags;
        post.post_updated_at = now;
    }
}

#[derive(Insertable)]
#[diesel(table_name = posts)]
pub struct PostInsertable<'a> {
    pub post_id: &'a Uuid,
    pub post_title: &'a str,
    pub post_snippet: &'a str,
    pub post_body: &'a str,
    pub post_status: &'a str,
    pub post_author: Option<&'a str>,
    pub post_featured_image: Option<&'a str>,
    pub post_tags: &'a [String],
    pub post_created_at: DateTime<Utc>,
    pub post_updated_at: DateTime<Utc>,
}

impl<'a> PostInsertable<'a> {
    pub fn from_post(post: &'a Post) -> Self {
        Self {
            post_id: &post.post_id,
            post_title: &post.post_title,
            post_snippet: &post.post_snippet,
            post_body: &post.post_body,
            post_status: post.post_status.as_str(),
            post_author: post.post_author.as_deref(),
            post_featured_image: post.post_featured_image.as_deref(),
            post_tags: &post.post_tags,
            post_created_at: post.post_created_at,
            post_updated_at: post.post_updated_at,
        }
    }
}
