mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod logging;
mod models;
mod render;
mod request_builder;
mod routes;
mod state;
mod templates;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use state::AppState;
use templates::TemplateStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    logging::init_logging(config.log_file.as_deref())?;

    tracing::info!("request-relay starting");
    config.log_startup();

    let templates = TemplateStore::new(templates::load(&config.templates_path)?);
    if templates.is_empty() {
        tracing::warn!("No request templates configured");
    }

    let addr = config.bind_addr();
    let state = AppState::new(config, templates)?;
    let router = app::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("request-relay stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown signal received"),
        Err(err) => {
            tracing::error!("Failed to listen for shutdown signal: {}", err);
            std::future::pending::<()>().await;
        }
    }
}
