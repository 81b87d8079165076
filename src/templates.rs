use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Method;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use url::Url;

/// A named, preconfigured outbound HTTP call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub name: String,
    pub method: String,
    pub url: String,
    /// Hint for the web UI to save the relayed response as a file
    #[serde(default)]
    pub download: bool,
    /// Default parameter values offered in the web UI form
    #[serde(default)]
    pub params: Map<String, JsonValue>,
}

/// Errors raised while loading the template file
#[derive(Debug, thiserror::Error)]
pub enum TemplateLoadError {
    #[error("cannot read template file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse template file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid template #{index} ({name:?}): {reason}")]
    Validation {
        index: usize,
        name: String,
        reason: String,
    },
}

/// How an invocation addresses a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSelector {
    /// Exact name match, first occurrence wins
    ByName(String),
    /// Zero-based position in the loaded list
    ByIndex(usize),
}

/// Load the ordered template list from a YAML file.
///
/// Duplicate names are reported with a warning and kept in place, so every
/// entry stays reachable by its index.
pub fn load(path: &Path) -> Result<Vec<Template>, TemplateLoadError> {
    let content = fs::read_to_string(path).map_err(|source| TemplateLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let templates = parse(&content).map_err(|source| TemplateLoadError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    for (index, template) in templates.iter().enumerate() {
        validate(index, template)?;
    }
    warn_duplicates(&templates);

    tracing::info!(
        "Loaded {} request template(s) from {}",
        templates.len(),
        path.display()
    );
    Ok(templates)
}

fn parse(content: &str) -> Result<Vec<Template>, serde_yaml::Error> {
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    let templates: Option<Vec<Template>> = serde_yaml::from_str(content)?;
    Ok(templates.unwrap_or_default())
}

fn validate(index: usize, template: &Template) -> Result<(), TemplateLoadError> {
    let invalid = |reason: String| TemplateLoadError::Validation {
        index,
        name: template.name.clone(),
        reason,
    };

    if template.name.trim().is_empty() {
        return Err(invalid("name must not be empty".to_string()));
    }
    Method::from_bytes(template.method.to_ascii_uppercase().as_bytes())
        .map_err(|_| invalid(format!("'{}' is not a valid HTTP method", template.method)))?;
    Url::parse(&template.url)
        .map_err(|err| invalid(format!("url '{}' is invalid: {}", template.url, err)))?;
    Ok(())
}

fn warn_duplicates(templates: &[Template]) {
    let mut seen = HashSet::new();
    for template in templates {
        if !seen.insert(template.name.as_str()) {
            tracing::warn!("Duplicate template name in configuration: {}", template.name);
        }
    }
}

/// Immutable snapshot of the loaded templates, shared across handlers
#[derive(Debug, Clone)]
pub struct TemplateStore {
    inner: Arc<[Template]>,
}

impl TemplateStore {
    pub fn new(templates: Vec<Template>) -> Self {
        Self {
            inner: templates.into(),
        }
    }

    pub fn all(&self) -> &[Template] {
        &self.inner
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Template> {
        self.inner.get(index)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Template> {
        self.inner.iter().find(|template| template.name == name)
    }

    pub fn select(&self, selector: &TemplateSelector) -> Option<&Template> {
        match selector {
            TemplateSelector::ByName(name) => self.find_by_name(name),
            TemplateSelector::ByIndex(index) => self.get(*index),
        }
    }
}
