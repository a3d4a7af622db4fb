use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::{
    domain::blog::post::Post,
    store::{PostFilter, PostQuery, PostSort, PostStore},
};

pub const PAGINATION_LIMIT: u64 = 5;
pub const MAX_PAGE_LIMIT: u64 = 100;

/// 1-based page index and page size. Both are at least 1 by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u64,
    limit: u64,
}

impl PageRequest {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_PAGE_LIMIT),
        }
    }

    /// Normalizes raw query-string values: a missing, non-numeric or
    /// non-positive `page` becomes 1; a missing, non-numeric or non-positive
    /// `limit` becomes `default_limit`; oversized limits are capped.
    pub fn from_query(page: Option<&str>, limit: Option<&str>, default_limit: u64) -> Self {
        let page = page
            .and_then(|p| p.trim().parse::<i64>().ok())
            .filter(|p| *p > 0)
            .map_or(1, |p| p as u64);

        let limit = limit
            .and_then(|l| l.trim().parse::<i64>().ok())
            .filter(|l| *l > 0)
            .map_or(default_limit, |l| l as u64);

        Self::new(page, limit)
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn start_index(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    pub fn end_index(&self) -> u64 {
        self.page.saturating_mul(self.limit)
    }
}

/// Next/previous page descriptor. `page` is `None` exactly when `has_next` is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PageLink {
    pub has_next: bool,
    pub page: Option<u64>,
    pub limit: u64,
}

impl PageLink {
    fn to(page: u64, limit: u64) -> Self {
        Self {
            has_next: true,
            page: Some(page),
            limit,
        }
    }

    fn none(limit: u64) -> Self {
        Self {
            has_next: false,
            page: None,
            limit,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct PageResult {
    pub posts: Vec<Post>,
    pub next: PageLink,
    pub previous: PageLink,
    pub total: u64,
}

pub fn next_link(request: PageRequest, total: u64) -> PageLink {
    if request.end_index() < total {
        PageLink::to(request.page() + 1, request.limit())
    } else {
        PageLink::none(request.limit())
    }
}

/// Stays set on pages past the end, so an empty page still links back.
pub fn previous_link(request: PageRequest) -> PageLink {
    if request.start_index() > 0 {
        PageLink::to(request.page() - 1, request.limit())
    } else {
        PageLink::none(request.limit())
    }
}

/// One count and one sorted, sliced find, issued concurrently. Under
/// concurrent writes the two reads may see different snapshots.
pub async fn paginate(
    store: &dyn PostStore,
    filter: PostFilter,
    request: PageRequest,
) -> anyhow::Result<PageResult> {
    let query = PostQuery {
        filter,
        sort: PostSort::newest_first(),
        skip: request.start_index(),
        limit: request.limit(),
    };

    let (total, posts) = tokio::try_join!(store.count_posts(filter), store.find_posts(query))?;

    Ok(PageResult {
        posts,
        next: next_link(request, total),
        previous: previous_link(request),
        total,
    })
}

pub async fn paginate_published(
    store: &dyn PostStore,
    request: PageRequest,
) -> anyhow::Result<PageResult> {
    paginate(store, PostFilter::published(), request).await
}
