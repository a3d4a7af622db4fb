use chrono::{DateTime, Utc};
use serde_derive::Serialize;

use crate::util::time::duration_formatter::format_duration;

#[derive(Serialize)]
pub struct ResponseMeta<M: serde::Serialize> {
    time_to_process: String,
    timestamp: DateTime<Utc>,
    metadata: M,
}

impl<M: serde::Serialize> ResponseMeta<M> {
    pub fn from(start: tokio::time::Instant, metadata: M) -> Self {
        Self {
            time_to_process: format_duration(start.elapsed()),
            timestamp: Utc::now(),
            metadata,
        }
    }
}
