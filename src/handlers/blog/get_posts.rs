use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
};

use crate::{
    domain::blog::paginator::{PageResult, paginate_published},
    dto::{
        requests::blog::get_posts_request::GetPostsRequest,
        responses::{blog::get_posts::GetPostsMeta, response_data::http_resp},
    },
    errors::code_error::{CodeError, CodeErrorResp, HandlerResponse, code_err},
    init::state::ServerState,
    util::time::now::tokio_now,
};

#[utoipa::path(
    get,
    path = "/api/blog/posts",
    tag = "blog",
    params(GetPostsRequest),
    responses(
        (status = 200, description = "One page of published posts, newest first", body = PageResult),
        (status = 500, description = "Storage failure", body = CodeErrorResp)
    )
)]
pub async fn get_posts(
    State(state): State<Arc<ServerState>>,
    Query(request): Query<GetPostsRequest>,
) -> HandlerResponse<impl IntoResponse> {
    let start = tokio_now();

    let page_request = request.to_page_request(state.get_pagination_limit());

    let result = paginate_published(state.posts(), page_request)
        .await
        .map_err(|e| code_err(CodeError::DB_QUERY_ERROR, e))?;

    Ok(http_resp(result, GetPostsMeta::from(page_request), start))
}
