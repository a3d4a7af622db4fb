use serde_derive::Serialize;
use utoipa::ToSchema;

use crate::domain::blog::paginator::PageRequest;

/// Normalized paging values echoed back in the response metadata.
#[derive(Serialize, ToSchema)]
pub struct GetPostsMeta {
    pub page: u64,
    pub limit: u64,
}

impl From<PageRequest> for GetPostsMeta {
    fn from(request: PageRequest) -> Self {
        Self {
            page: request.page(),
            limit: request.limit(),
        }
    }
}
