use crate::api_doc::ApiDoc;
use crate::handlers::{
    download_handler, hello_handler, hello_json_handler, index_handler, post_json_handler,
    send_request_handler,
};
use crate::routes;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{services::ServeDir, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Assemble every route of the service around the shared state
pub fn build_router(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .route(routes::INDEX, get(index_handler))
        .route(routes::DOWNLOAD, get(download_handler))
        .route(routes::SEND_REQUEST, post(send_request_handler))
        .route(routes::HELLO, get(hello_handler))
        .route(routes::HELLO_JSON, get(hello_json_handler))
        .route(routes::POST_JSON, post(post_json_handler))
        .nest_service(routes::STATIC, static_files)
        .merge(SwaggerUi::new(routes::SWAGGER_UI).url(routes::OPENAPI_JSON, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
