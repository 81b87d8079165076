use crate::error::ApiError;
use crate::state::AppState;
use anyhow::Context;
use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{Html, IntoResponse},
};

/// GET / handler - Landing page listing every loaded template
pub async fn index_handler(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let html = state.index_page.render(state.templates.all())?;
    Ok(Html(html))
}

/// GET /download handler - Raw template file as an attachment
///
/// The file is read on every call, so the download reflects what is on disk
/// even though the running process keeps the snapshot loaded at startup.
pub async fn download_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, ApiError> {
    let path = &state.config.templates_path;
    let contents = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read template file {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().replace(['"', '\\'], "_"))
        .unwrap_or_else(|| "requests.yaml".to_string());
    let disposition = HeaderValue::from_str(&format!("attachment; filename=\"{}\"", file_name))
        .context("Template file name is not a valid header value")?;

    tracing::debug!("Serving template file {}", path.display());
    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/octet-stream"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        contents,
    ))
}
