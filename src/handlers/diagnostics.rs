use crate::error::{ApiError, ErrorResponse};
use crate::models::{HelloJsonResponse, PostJsonRequest, PostJsonResponse};
use crate::routes;
use axum::{body::Bytes, http::StatusCode, Json};

fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// GET /hello handler - Liveness check with a fixed payload
#[utoipa::path(
    get,
    path = routes::HELLO,
    responses(
        (status = 200, description = "Fixed greeting", body = String)
    ),
    tag = "diagnostics"
)]
pub async fn hello_handler() -> Json<&'static str> {
    Json("hello")
}

/// GET /hello_json handler - Greeting stamped with the server's local time
#[utoipa::path(
    get,
    path = routes::HELLO_JSON,
    responses(
        (status = 200, description = "Greeting with timestamp", body = HelloJsonResponse)
    ),
    tag = "diagnostics"
)]
pub async fn hello_json_handler() -> Json<HelloJsonResponse> {
    Json(HelloJsonResponse { hello: timestamp() })
}

/// POST /post_json handler - Echo the typed payload with a timestamp
#[utoipa::path(
    post,
    path = routes::POST_JSON,
    request_body = PostJsonRequest,
    responses(
        (status = 200, description = "Echoed payload", body = PostJsonResponse),
        (status = 400, description = "Malformed payload", body = ErrorResponse)
    ),
    tag = "diagnostics"
)]
pub async fn post_json_handler(
    body: Bytes,
) -> Result<(StatusCode, Json<PostJsonResponse>), ApiError> {
    let payload: PostJsonRequest = serde_json::from_slice(&body).map_err(|err| {
        tracing::warn!("Rejected post_json payload: {}", err);
        ApiError::JsonError(err)
    })?;

    Ok((
        StatusCode::OK,
        Json(PostJsonResponse {
            hello: timestamp(),
            value2: payload.value2,
            value3: payload.value3,
        }),
    ))
}
