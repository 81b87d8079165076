use crate::config::Config;
use crate::render::IndexPage;
use crate::templates::TemplateStore;
use anyhow::{Context, Result};
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub templates: TemplateStore,
    pub http_client: reqwest::Client,
    pub index_page: Arc<IndexPage>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config, templates: TemplateStore) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()
            .context("Failed to create HTTP client")?;

        let index_page = IndexPage::load(&config.static_dir)?;

        Ok(Self {
            templates,
            http_client,
            index_page: Arc::new(index_page),
            config: Arc::new(config),
        })
    }
}
