use axum::http::{HeaderValue, StatusCode};
use axum::response::IntoResponse;
use serde_derive::Serialize;
use std::error::Error;
use std::fmt;
use tracing::Level;
use utoipa::ToSchema;

pub type HandlerResponse<T> = Result<T, CodeErrorResp>;

pub struct CodeError {
    pub success: bool,
    pub error_code: u16,
    pub http_status_code: StatusCode,
    pub message: &'static str,
    pub log_level: Level,
}

impl CodeError {
    pub const POOL_ERROR: CodeError = CodeError {
        success: false,
        error_code: 0,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not get conn out of pool!",
        log_level: Level::ERROR,
    };
    pub const DB_QUERY_ERROR: CodeError = CodeError {
        success: false,
        error_code: 1,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database query failed!",
        log_level: Level::ERROR,
    };
    pub const DB_INSERTION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 2,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database insertion failed!",
        log_level: Level::ERROR,
    };
    pub const DB_UPDATE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 3,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database update failed!",
        log_level: Level::ERROR,
    };
    pub const DB_DELETION_ERROR: CodeError = CodeError {
        success: false,
        error_code: 4,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Database deletion failed!",
        log_level: Level::ERROR,
    };
    pub const POST_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 5,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Post not found!",
        log_level: Level::INFO,
    };
    pub const POST_INVALID: CodeError = CodeError {
        success: false,
        error_code: 6,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Post is missing a required field!",
        log_level: Level::INFO,
    };
    pub const UNAUTHORIZED_ACCESS: CodeError = CodeError {
        success: false,
        error_code: 7,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Unauthorized access!",
        log_level: Level::WARN,
    };
    pub const USER_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 8,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Username does not exist.",
        log_level: Level::INFO,
    };
    pub const WRONG_PW: CodeError = CodeError {
        success: false,
        error_code: 9,
        http_status_code: StatusCode::UNAUTHORIZED,
        message: "Incorrect password.",
        log_level: Level::INFO,
    };
    pub const COULD_NOT_VERIFY_PW: CodeError = CodeError {
        success: false,
        error_code: 10,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not verify password!",
        log_level: Level::ERROR,
    };
    pub const SESSION_ID_ALREADY_EXISTS: CodeError = CodeError {
        success: false,
        error_code: 11,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Session ID already exists!",
        log_level: Level::ERROR,
    };
    pub const EMAIL_INVALID: CodeError = CodeError {
        success: false,
        error_code: 12,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Invalid email address!",
        log_level: Level::INFO,
    };
    pub const SUBSCRIBER_NAME_INVALID: CodeError = CodeError {
        success: false,
        error_code: 13,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Subscriber name must not be empty!",
        log_level: Level::INFO,
    };
    pub const EMAIL_ALREADY_SUBSCRIBED: CodeError = CodeError {
        success: false,
        error_code: 14,
        http_status_code: StatusCode::CONFLICT,
        message: "Email address is already subscribed!",
        log_level: Level::INFO,
    };
    pub const FILE_UPLOAD_ERROR: CodeError = CodeError {
        success: false,
        error_code: 15,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "File upload failed!",
        log_level: Level::WARN,
    };
    pub const FILE_TOO_LARGE: CodeError = CodeError {
        success: false,
        error_code: 16,
        http_status_code: StatusCode::PAYLOAD_TOO_LARGE,
        message: "Uploaded file is too large!",
        log_level: Level::WARN,
    };
    pub const UNSUPPORTED_IMAGE_FORMAT: CodeError = CodeError {
        success: false,
        error_code: 17,
        http_status_code: StatusCode::BAD_REQUEST,
        message: "Unsupported image format!",
        log_level: Level::INFO,
    };
    pub const FILE_WRITE_ERROR: CodeError = CodeError {
        success: false,
        error_code: 18,
        http_status_code: StatusCode::INTERNAL_SERVER_ERROR,
        message: "Could not write uploaded file!",
        log_level: Level::ERROR,
    };
    pub const PAGE_NOT_FOUND: CodeError = CodeError {
        success: false,
        error_code: 19,
        http_status_code: StatusCode::NOT_FOUND,
        message: "Page not found!",
        log_level: Level::INFO,
    };
}

pub fn code_err(cerr: CodeError, e: impl ToString) -> CodeErrorResp {
    CodeErrorResp {
        success: cerr.success,
        error_code: cerr.error_code,
        http_status_code: cerr.http_status_code,
        message: cerr.message.to_string(),
        error_message: e.to_string(),
        log_level: cerr.log_level,
    }
}

impl From<CodeError> for CodeErrorResp {
    fn from(cerr: CodeError) -> Self {
        CodeErrorResp {
            success: cerr.success,
            error_code: cerr.error_code,
            http_status_code: cerr.http_status_code,
            message: cerr.message.to_string(),
            error_message: String::new(),
            log_level: cerr.log_level,
        }
    }
}

#[derive(Serialize, Debug, ToSchema)]
pub struct CodeErrorResp {
    pub success: bool,
    pub error_code: u16,
    #[serde(serialize_with = "serialize_status_code")]
    #[schema(value_type = u16)]
    pub http_status_code: StatusCode,
    pub message: String,
    pub error_message: String,
    #[serde(skip)]
    pub log_level: Level,
}

fn serialize_status_code<S>(status: &StatusCode, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u16(status.as_u16())
}

impl fmt::Display for CodeErrorResp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.error_message)
    }
}

impl Error for CodeErrorResp {}

// The logging middleware reads the x-error-* headers, logs them and strips them
// before the response leaves the server.
impl IntoResponse for CodeErrorResp {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::to_string(&self).unwrap_or_else(|_| "{}".to_string());
        let mut response = (
            self.http_status_code,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response();

        self.write_error_headers(response.headers_mut());
        response
    }
}

impl CodeErrorResp {
    pub fn write_error_headers(&self, headers: &mut axum::http::HeaderMap) {
        insert_header(headers, "x-error-log-level", self.log_level.as_str());
        insert_header(headers, "x-error-status-code", self.http_status_code.as_str());
        insert_header(headers, "x-error-code", &self.error_code.to_string());
        insert_header(headers, "x-error-message", &self.message);
        insert_header(headers, "x-error-detail", &self.error_message);
    }
}

fn insert_header(headers: &mut axum::http::HeaderMap, key: &'static str, value: &str) {
    if let Ok(value) = HeaderValue::from_str(value) {
        headers.insert(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_err_keeps_raw_error_message() {
        let resp = code_err(CodeError::DB_QUERY_ERROR, "connection reset by peer");
        assert_eq!(resp.http_status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(resp.error_message, "connection reset by peer");

        let json = serde_json::to_value(&resp).unwrap();
        assert_eq!(json["http_status_code"], 500);
        assert_eq!(json["error_message"], "connection reset by peer");
        assert_eq!(json["success"], false);
        assert!(json.get("log_level").is_none());
    }

    #[test]
    fn into_response_sets_status_and_error_headers() {
        let response = CodeErrorResp::from(CodeError::POST_NOT_FOUND).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get("x-error-code").unwrap(),
            &HeaderValue::from_static("5")
        );
        assert_eq!(
            response.headers().get("x-error-log-level").unwrap(),
            &HeaderValue::from_static("INFO")
        );
    }
}
