use crate::error::{error_chain, ApiError, ErrorResponse};
use crate::models::SendRequest;
use crate::request_builder;
use crate::routes;
use crate::state::AppState;
use crate::templates::TemplateSelector;
use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{HeaderMap, HeaderName},
    response::Response,
};

/// POST /send-request handler - Execute a request template
///
/// Looks the template up by `name` (first match) or by zero-based `id`,
/// sends the outbound request and relays the upstream status, headers and
/// body unchanged.
#[utoipa::path(
    post,
    path = routes::SEND_REQUEST,
    request_body = SendRequest,
    responses(
        (
            status = 200,
            description = "Upstream response relayed verbatim, any upstream status"
        ),
        (
            status = 400,
            description = "Malformed request, unknown template or invalid parameter",
            body = ErrorResponse
        ),
        (
            status = 502,
            description = "Upstream unreachable or its body could not be read",
            body = ErrorResponse
        )
    ),
    tag = "relay"
)]
pub async fn send_request_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, ApiError> {
    let invocation: SendRequest = serde_json::from_slice(&body)?;
    let selector = invocation.selector().ok_or(ApiError::MissingSelector)?;

    let template = state
        .templates
        .select(&selector)
        .ok_or_else(|| match &selector {
            TemplateSelector::ByName(name) => ApiError::TemplateNotFound(name.clone()),
            TemplateSelector::ByIndex(id) => ApiError::TemplateIndexOutOfRange {
                id: *id,
                len: state.templates.len(),
            },
        })?;

    let params = invocation.params.unwrap_or_default();
    let payload = serde_json::to_vec(&params).map_err(|err| {
        ApiError::Internal(anyhow::Error::new(err).context("Failed to encode parameters"))
    })?;

    let request = request_builder::build(
        &state.http_client,
        &template.method,
        &template.url,
        Some(payload),
        Some(&params),
    )?;

    let method = request.method().clone();
    let url = request.url().clone();

    let upstream = state.http_client.execute(request).await.map_err(|err| {
        tracing::error!("Template '{}': {} {} failed: {}", template.name, method, url, err);
        ApiError::UpstreamTransport(error_chain(&err))
    })?;

    let status = upstream.status();
    let headers = upstream.headers().clone();
    let bytes = upstream.bytes().await.map_err(|err| {
        tracing::error!(
            "Template '{}': reading response from {} failed: {}",
            template.name,
            url,
            err
        );
        ApiError::UpstreamBodyRead(error_chain(&err))
    })?;

    tracing::info!(
        "Template '{}': {} {} -> {} ({} bytes)",
        template.name,
        method,
        url,
        status,
        bytes.len()
    );

    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    copy_end_to_end_headers(&headers, response.headers_mut());
    Ok(response)
}

/// Connection-scoped headers describe the upstream hop, not the payload
fn is_hop_by_hop(name: &HeaderName) -> bool {
    matches!(
        name.as_str(),
        "connection"
            | "keep-alive"
            | "proxy-connection"
            | "transfer-encoding"
            | "te"
            | "trailer"
            | "upgrade"
    )
}

fn copy_end_to_end_headers(from: &HeaderMap, to: &mut HeaderMap) {
    for (name, value) in from {
        if !is_hop_by_hop(name) {
            to.append(name.clone(), value.clone());
        }
    }
}
