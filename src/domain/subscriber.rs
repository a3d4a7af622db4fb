use chrono::{DateTime, Utc};
use diesel::{Insertable, Queryable, Selectable};
use serde_derive::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::schema::email_subscribers;

#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable, ToSchema)]
#[diesel(table_name = email_subscribers)]
pub struct EmailSubscriber {
    pub subscriber_id: Uuid,
    pub subscriber_name: String,
    pub subscriber_email: String,
    pub subscriber_created_at: DateTime<Utc>,
}

/// Already validated; `subscriber_email` is stored lowercased so uniqueness is case-insensitive.
#[derive(Debug, Clone)]
pub struct NewEmailSubscriber {
    pub subscriber_name: String,
    pub subscriber_email: String,
}

impl NewEmailSubscriber {
    pub fn into_subscriber(self, subscriber_id: Uuid, now: DateTime<Utc>) -> EmailSubscriber {
        EmailSubscriber {
            subscriber_id,
            subscriber_name: self.subscriber_name,
            subscriber_email: self.subscriber_email,
            subscriber_created_at: now,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubscribeOutcome {
    Subscribed(EmailSubscriber),
    AlreadySubscribed,
}

#[derive(Insertable)]
#[diesel(table_name = email_subscribers)]
pub struct EmailSubscriberInsertable<'a> {
    pub subscriber_id: &'a Uuid,
    pub subscriber_name: &'a str,
    pub subscriber_email: &'a str,
    pub subscriber_created_at: DateTime<Utc>,
}

impl<'a> EmailSubscriberInsertable<'a> {
    pub fn from_subscriber(subscriber: &'a EmailSubscriber) -> Self {
        Self {
            subscriber_id: &subscriber.subscriber_id,
            subscriber_name: &subscriber.subscriber_name,
            subscriber_email: &subscriber.subscriber_email,
            subscriber_created_at: subscriber.subscriber_created_at,
        }
    }
}
