use serde_derive::Deserialize;

use crate::domain::blog::{
    post::{NewPost, Post, PublishingStatus},
    tags::{join_tags, parse_tags},
};

/// Url-encoded body of the admin create/edit form.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct SubmitPostRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub body: String,
    pub post_status: Option<String>,
    pub author: Option<String>,
    pub featured_image: Option<String>,
    pub tags: Option<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SubmitPostRequest {
    pub fn to_new_post(&self) -> Result<NewPost, String> {
        if self.title.trim().is_empty() {
            return Err("Title is required.".to_string());
        }
        if self.snippet.trim().is_empty() {
            return Err("Snippet is required.".to_string());
        }
        if self.body.trim().is_empty() {
            return Err("Body is required.".to_string());
        }

        let post_status = match non_blank(self.post_status.clone()) {
            Some(status) => status
                .parse::<PublishingStatus>()
                .map_err(|e| e.to_string())?,
            None => PublishingStatus::default(),
        };

        Ok(NewPost {
            post_title: self.title.trim().to_string(),
            post_snippet: self.snippet.trim().to_string(),
            post_body: self.body.clone(),
            post_status,
            post_author: non_blank(self.author.clone()),
            post_featured_image: non_blank(self.featured_image.clone()),
            post_tags: parse_tags(self.tags.as_deref().unwrap_or_default()),
        })
    }
}

/// Pre-fills the edit form from a stored post.
impl From<&Post> for SubmitPostRequest {
    fn from(post: &Post) -> Self {
        Self {
            title: post.post_title.clone(),
            snippet: post.post_snippet.clone(),
            body: post.post_body.clone(),
            post_status: Some(post.post_status.to_string()),
            author: post.post_author.clone(),
            featured_image: post.post_featured_image.clone(),
            tags: Some(join_tags(&post.post_tags)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> SubmitPostRequest {
        SubmitPostRequest {
            title: " Tantanmen ".to_string(),
            snippet: "Sesame and chili.".to_string(),
            body: "Grind the sesame first.".to_string(),
            post_status: Some("published".to_string()),
            author: Some("  ".to_string()),
            featured_image: Some("/uploads/a.png".to_string()),
            tags: Some("spicy, sesame , ".to_string()),
        }
    }

    #[test]
    fn test_valid_form_becomes_new_post() {
        let post = filled().to_new_post().unwrap();
        assert_eq!(post.post_title, "Tantanmen");
        assert_eq!(post.post_status, PublishingStatus::Published);
        assert_eq!(post.post_author, None);
        assert_eq!(post.post_featured_image.as_deref(), Some("/uploads/a.png"));
        assert_eq!(post.post_tags, vec!["spicy", "sesame"]);
    }

    #[test]
    fn test_missing_status_defaults_to_draft() {
        let mut form = filled();
        form.post_status = None;
        assert_eq!(
            form.to_new_post().unwrap().post_status,
            PublishingStatus::Draft
        );
    }

    #[test]
    fn test_blank_required_fields_are_rejected() {
        let mut form = filled();
        form.body = "   \n".to_string();
        assert_eq!(form.to_new_post().unwrap_err(), "Body is required.");

        let mut form = filled();
        form.title = String::new();
        assert_eq!(form.to_new_post().unwrap_err(), "Title is required.");
    }

    #[test]
    fn test_prefill_round_trips_through_validation() {
        let post = filled()
            .to_new_post()
            .unwrap()
            .into_post(uuid::Uuid::new_v4(), chrono::Utc::now());
        let again = SubmitPostRequest::from(&post).to_new_post().unwrap();
        assert_eq!(again.post_tags, post.post_tags);
        assert_eq!(again.post_status, post.post_status);
        assert_eq!(again.post_title, post.post_title);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let mut form = filled();
        form.post_status = Some("scheduled".to_string());
        assert!(form.to_new_post().is_err());
    }
}
