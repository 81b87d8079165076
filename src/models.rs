use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};

use crate::templates::{Template, TemplateSelector};

/// Request body for the send-request endpoint
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SendRequest {
    /// Template name, first match wins
    pub name: Option<String>,
    /// Zero-based template position, used when `name` is absent
    pub id: Option<usize>,
    /// Runtime parameter values
    #[schema(value_type = Object)]
    pub params: Option<Map<String, JsonValue>>,
}

impl SendRequest {
    pub fn selector(&self) -> Option<TemplateSelector> {
        match (&self.name, self.id) {
            (Some(name), _) => Some(TemplateSelector::ByName(name.clone())),
            (None, Some(id)) => Some(TemplateSelector::ByIndex(id)),
            (None, None) => None,
        }
    }
}

/// Response type for the hello_json endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct HelloJsonResponse {
    pub hello: String,
}

/// Request body for the post_json endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostJsonRequest {
    pub value2: i64,
    pub value3: String,
}

/// Response type for the post_json endpoint
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
pub struct PostJsonResponse {
    pub hello: String,
    pub value2: i64,
    pub value3: String,
}

/// One template as shown on the index page
#[derive(Serialize)]
pub struct TemplateView {
    pub id: usize,
    pub name: String,
    pub method: String,
    pub url: String,
    pub download: bool,
    pub params: Map<String, JsonValue>,
    pub params_json: String,
}

impl TemplateView {
    pub fn new(id: usize, template: &Template) -> Self {
        let params_json = serde_json::to_string_pretty(&template.params)
            .unwrap_or_else(|_| "{}".to_string());
        Self {
            id,
            name: template.name.clone(),
            method: template.method.to_ascii_uppercase(),
            url: template.url.clone(),
            download: template.download,
            params: template.params.clone(),
            params_json,
        }
    }
}
