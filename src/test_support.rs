//! Helpers shared by handler tests: an in-process upstream and a relay app.

use crate::app::build_router;
use crate::config::Config;
use crate::error::ErrorResponse;
use crate::state::AppState;
use crate::templates::{Template, TemplateStore};
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, Method, StatusCode, Uri},
    response::{AppendHeaders, IntoResponse, Response},
    routing::{any, get, post},
    Router,
};
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

pub struct Upstream {
    pub addr: SocketAddr,
    pub hits: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }
}

async fn echo(State(hits): State<Arc<AtomicUsize>>, method: Method, uri: Uri) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        [("x-upstream", "echo")],
        format!("{} {}", method, uri),
    )
        .into_response()
}

async fn create_item(
    State(hits): State<Arc<AtomicUsize>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    (
        StatusCode::CREATED,
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (header::HeaderName::from_static("x-received-content-type"), content_type),
        ],
        body,
    )
        .into_response()
}

async fn teapot(State(hits): State<Arc<AtomicUsize>>) -> Response {
    hits.fetch_add(1, Ordering::SeqCst);
    (
        StatusCode::IM_A_TEAPOT,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        AppendHeaders([(header::SET_COOKIE, "a=1"), (header::SET_COOKIE, "b=2")]),
        b"short and stout\n\x00\xff".to_vec(),
    )
        .into_response()
}

/// Bind a small upstream on an ephemeral local port
pub async fn spawn_upstream() -> Upstream {
    let hits = Arc::new(AtomicUsize::new(0));
    let router = Router::new()
        .route("/echo", any(echo))
        .route("/items", post(create_item))
        .route("/teapot", get(teapot))
        .with_state(hits.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    Upstream { addr, hits }
}

pub fn template(name: &str, method: &str, url: &str) -> Template {
    Template {
        name: name.to_string(),
        method: method.to_string(),
        url: url.to_string(),
        download: false,
        params: serde_json::Map::new(),
    }
}

pub fn test_config(templates_path: PathBuf) -> Config {
    let mut config = Config::from_source(|_| None).unwrap();
    config.templates_path = templates_path;
    config.static_dir = std::env::temp_dir().join("request-relay-test-static-missing");
    config
}

pub fn setup_test_app(templates: Vec<Template>) -> Router {
    setup_test_app_with_config(
        test_config(PathBuf::from("./config/requests.yaml")),
        templates,
    )
}

pub fn setup_test_app_with_config(config: Config, templates: Vec<Template>) -> Router {
    let state = AppState::new(config, TemplateStore::new(templates))
        .expect("Failed to create app state");
    build_router(state)
}

pub async fn read_error(response: Response) -> ErrorResponse {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

/// In-memory log sink for asserting on emitted events
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a subscriber writing into the returned buffer
pub fn capture_logs<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_ansi(false)
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs)
}
