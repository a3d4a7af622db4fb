use serde_derive::Deserialize;
use utoipa::IntoParams;

use crate::domain::blog::paginator::PageRequest;

/// Raw query string; values are kept as text so junk input can be
/// normalized instead of rejected.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct GetPostsRequest {
    /// 1-based page number
    pub page: Option<String>,
    /// Page size, capped at 100
    pub limit: Option<String>,
}

impl GetPostsRequest {
    pub fn to_page_request(&self, default_limit: u64) -> PageRequest {
        PageRequest::from_query(self.page.as_deref(), self.limit.as_deref(), default_limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(page: Option<&str>, limit: Option<&str>) -> GetPostsRequest {
        GetPostsRequest {
            page: page.map(str::to_owned),
            limit: limit.map(str::to_owned),
        }
    }

    #[test]
    fn test_missing_values_use_defaults() {
        let page = request(None, None).to_page_request(5);
        assert_eq!((page.page(), page.limit()), (1, 5));
    }

    #[test]
    fn test_junk_values_are_normalized() {
        let page = request(Some("-4"), Some("abc")).to_page_request(7);
        assert_eq!((page.page(), page.limit()), (1, 7));

        let page = request(Some("2"), Some("0")).to_page_request(5);
        assert_eq!((page.page(), page.limit()), (2, 5));
    }

    #[test]
    fn test_valid_values_pass_through() {
        let page = request(Some("3"), Some("10")).to_page_request(5);
        assert_eq!((page.page(), page.limit()), (3, 10));
        assert_eq!(page.start_index(), 20);
    }
}
