use axum::response::{Html, IntoResponse};

use crate::views::{
    layout::render_page,
    pages::{render_error, render_not_found},
};

use super::code_error::{CodeError, CodeErrorResp, code_err};

pub type PageResponse<T> = Result<T, PageErrorResp>;

/// HTML counterpart of `CodeErrorResp` for the server-rendered routes.
/// Carries the same error metadata so request logging treats both alike.
#[derive(Debug)]
pub struct PageErrorResp {
    pub error: CodeErrorResp,
    pub title: String,
    pub content: Option<String>,
    pub logged_in: bool,
}

pub fn page_err(cerr: CodeError, e: impl ToString) -> PageErrorResp {
    PageErrorResp::from(code_err(cerr, e))
}

impl From<CodeErrorResp> for PageErrorResp {
    fn from(error: CodeErrorResp) -> Self {
        Self {
            title: error.http_status_code.as_u16().to_string(),
            error,
            content: None,
            logged_in: false,
        }
    }
}

impl From<CodeError> for PageErrorResp {
    fn from(cerr: CodeError) -> Self {
        PageErrorResp::from(CodeErrorResp::from(cerr))
    }
}

impl PageErrorResp {
    /// Replaces the generic error page with a specific one, e.g. a form
    /// re-rendered with its validation message.
    pub fn with_page(mut self, title: &str, content: String) -> Self {
        self.title = title.to_string();
        self.content = Some(content);
        self
    }

    pub fn logged_in(mut self, logged_in: bool) -> Self {
        self.logged_in = logged_in;
        self
    }
}

impl IntoResponse for PageErrorResp {
    fn into_response(self) -> axum::response::Response {
        let status = self.error.http_status_code;
        let content = self.content.unwrap_or_else(|| {
            if status == axum::http::StatusCode::NOT_FOUND {
                render_not_found()
            } else {
                render_error(status.as_u16(), &self.error.message)
            }
        });

        let mut response =
            (status, Html(render_page(&self.title, self.logged_in, &content))).into_response();
        self.error.write_error_headers(response.headers_mut());
        response
    }
}
