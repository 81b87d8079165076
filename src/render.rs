use std::path::Path;

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde_json::json;

use crate::models::TemplateView;
use crate::templates::Template;

const INDEX_TEMPLATE: &str = "index";
const BUILTIN_INDEX: &str = include_str!("../template/index.html");

/// Compiled Handlebars template for the landing page
pub struct IndexPage {
    registry: Handlebars<'static>,
}

impl IndexPage {
    /// Compile `index.html` from the static directory, falling back to the
    /// page bundled with the binary when the directory has none.
    pub fn load(static_dir: &Path) -> Result<Self> {
        let path = static_dir.join("index.html");
        let source = if path.is_file() {
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read index template {}", path.display()))?
        } else {
            tracing::info!(
                "No index template at {}, using the built-in page",
                path.display()
            );
            BUILTIN_INDEX.to_string()
        };
        Self::from_source(&source)
    }

    pub fn from_source(source: &str) -> Result<Self> {
        let mut registry = Handlebars::new();
        registry
            .register_template_string(INDEX_TEMPLATE, source)
            .context("Failed to compile index template")?;
        Ok(Self { registry })
    }

    pub fn render(&self, templates: &[Template]) -> Result<String> {
        let views: Vec<TemplateView> = templates
            .iter()
            .enumerate()
            .map(|(id, template)| TemplateView::new(id, template))
            .collect();
        let context = json!({
            "count": views.len(),
            "templates": views,
        });

        self.registry
            .render(INDEX_TEMPLATE, &context)
            .context("Failed to render index page")
    }
}
