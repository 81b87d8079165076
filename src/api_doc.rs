use utoipa::OpenApi;

use crate::error::ErrorResponse;
use crate::handlers;
use crate::models::{HelloJsonResponse, PostJsonRequest, PostJsonResponse, SendRequest};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "request-relay API",
        version = "0.1.0",
        description = "Executes configured request templates and relays upstream responses"
    ),
    paths(
        handlers::proxy::send_request_handler,
        handlers::diagnostics::hello_handler,
        handlers::diagnostics::hello_json_handler,
        handlers::diagnostics::post_json_handler
    ),
    components(
        schemas(
            SendRequest,
            HelloJsonResponse,
            PostJsonRequest,
            PostJsonResponse,
            ErrorResponse
        )
    ),
    tags(
        (name = "relay", description = "Request template execution"),
        (name = "diagnostics", description = "Fixed diagnostic endpoints")
    )
)]
pub struct ApiDoc;
