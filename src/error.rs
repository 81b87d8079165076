use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::request_builder::BuildError;

/// Error response type
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Custom error type for API endpoints
///
/// Every variant maps to an HTTP status code and a JSON `{"error": ...}`
/// body, so no request-level failure escapes as a panic or a dropped
/// connection.
#[derive(Debug)]
pub enum ApiError {
    /// Request body is not the expected JSON document
    JsonError(serde_json::Error),
    /// Invocation names neither a template name nor an id
    MissingSelector,
    /// No template carries the requested name
    TemplateNotFound(String),
    /// Requested template index is past the end of the list
    TemplateIndexOutOfRange { id: usize, len: usize },
    /// Outbound request could not be constructed
    RequestBuild(BuildError),
    /// Upstream could not be reached or did not answer in time
    UpstreamTransport(String),
    /// Upstream answered but its body could not be read
    UpstreamBodyRead(String),
    /// Local failure unrelated to the caller's input
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            ApiError::JsonError(err) => (
                StatusCode::BAD_REQUEST,
                format!("JSON parse error: {}", err),
            ),
            ApiError::MissingSelector => (
                StatusCode::BAD_REQUEST,
                "Request must carry a template 'name' or 'id'".to_string(),
            ),
            ApiError::TemplateNotFound(name) => (
                StatusCode::BAD_REQUEST,
                format!("Template not found: {}", name),
            ),
            ApiError::TemplateIndexOutOfRange { id, len } => (
                StatusCode::BAD_REQUEST,
                format!("Template id {} out of range: {} template(s) loaded", id, len),
            ),
            ApiError::RequestBuild(err @ BuildError::UnsupportedParam { .. }) => (
                StatusCode::BAD_REQUEST,
                format!("Invalid parameter: {}", err),
            ),
            ApiError::RequestBuild(err) => (
                StatusCode::BAD_GATEWAY,
                format!("Cannot build upstream request: {}", err),
            ),
            ApiError::UpstreamTransport(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Upstream request failed: {}", msg),
            ),
            ApiError::UpstreamBodyRead(msg) => (
                StatusCode::BAD_GATEWAY,
                format!("Failed to read upstream response: {}", msg),
            ),
            ApiError::Internal(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {:#}", err),
            ),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::JsonError(err)
    }
}

impl From<BuildError> for ApiError {
    fn from(err: BuildError) -> Self {
        ApiError::RequestBuild(err)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::Internal(err)
    }
}

/// Render an error together with its whole source chain
pub fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, ErrorResponse) {
        let response = err.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_client_errors_are_bad_request() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let (status, body) = render(ApiError::from(json_err)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("JSON parse error"));

        let (status, body) = render(ApiError::TemplateNotFound("missing".to_string())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("missing"));

        let (status, _) = render(ApiError::MissingSelector).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = render(ApiError::TemplateIndexOutOfRange { id: 7, len: 2 }).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("7"));

        let (status, body) = render(ApiError::RequestBuild(BuildError::UnsupportedParam {
            key: "flag".to_string(),
            kind: "boolean",
        }))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.error.contains("flag"));
    }

    #[tokio::test]
    async fn test_upstream_errors_are_bad_gateway() {
        let (status, body) =
            render(ApiError::UpstreamTransport("connection refused".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert!(body.error.contains("connection refused"));

        let (status, _) = render(ApiError::UpstreamBodyRead("reset".to_string())).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);

        let (status, _) = render(ApiError::RequestBuild(BuildError::InvalidMethod(
            "GE T".to_string(),
        )))
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_internal_error() {
        let (status, body) = render(ApiError::from(anyhow::anyhow!("disk gone"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.error.contains("disk gone"));
    }

    #[test]
    fn test_error_chain_includes_sources() {
        let err = anyhow::anyhow!("inner").context("outer");
        let rendered = error_chain(&*err);
        assert_eq!(rendered, "outer: inner");
    }
}
