use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, Request};
use serde_json::{Map, Value as JsonValue};
use url::Url;

/// A runtime parameter value as seen by the query-string encoder
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    String(String),
    Integer(i128),
    Other(&'static str),
}

impl From<&JsonValue> for ParamValue {
    fn from(value: &JsonValue) -> Self {
        match value {
            JsonValue::String(s) => ParamValue::String(s.clone()),
            JsonValue::Number(n) => {
                let integer = n.as_i64().map(i128::from).or(n.as_u64().map(i128::from));
                match integer {
                    Some(i) => ParamValue::Integer(i),
                    None => ParamValue::Other("float"),
                }
            }
            JsonValue::Bool(_) => ParamValue::Other("boolean"),
            JsonValue::Null => ParamValue::Other("null"),
            JsonValue::Array(_) => ParamValue::Other("array"),
            JsonValue::Object(_) => ParamValue::Other("object"),
        }
    }
}

impl ParamValue {
    /// Query-string text for the value, or the JSON kind that has none
    pub fn to_query_text(self) -> Result<String, &'static str> {
        match self {
            ParamValue::String(s) => Ok(s),
            ParamValue::Integer(i) => Ok(i.to_string()),
            ParamValue::Other(kind) => Err(kind),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("'{0}' is not a valid HTTP method")]
    InvalidMethod(String),

    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("query parameter '{key}' must be a string or an integer, got {kind}")]
    UnsupportedParam { key: String, kind: &'static str },

    #[error("cannot build request: {0}")]
    Request(#[from] reqwest::Error),
}

/// Build one outbound request.
///
/// `GET` requests never carry a body: a non-empty `query_params` is merged
/// into the URL query string, replacing pairs with the same key. Every other
/// method sends `body` unchanged and leaves the URL untouched.
/// `Content-Type: application/json` is always set.
pub fn build(
    client: &Client,
    method: &str,
    url: &str,
    body: Option<Vec<u8>>,
    query_params: Option<&Map<String, JsonValue>>,
) -> Result<Request, BuildError> {
    let method = Method::from_bytes(method.to_ascii_uppercase().as_bytes())
        .map_err(|_| BuildError::InvalidMethod(method.to_string()))?;

    let mut target = Url::parse(url).map_err(|source| BuildError::InvalidUrl {
        url: url.to_string(),
        source,
    })?;

    let is_get = method == Method::GET;
    if is_get {
        if let Some(params) = query_params.filter(|params| !params.is_empty()) {
            merge_query(&mut target, params)?;
        }
    }

    let mut builder = client
        .request(method, target)
        .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if !is_get {
        builder = builder.body(body.unwrap_or_default());
    }

    Ok(builder.build()?)
}

fn merge_query(url: &mut Url, params: &Map<String, JsonValue>) -> Result<(), BuildError> {
    let rendered = params
        .iter()
        .map(|(key, value)| {
            ParamValue::from(value)
                .to_query_text()
                .map(|text| (key.clone(), text))
                .map_err(|kind| BuildError::UnsupportedParam {
                    key: key.clone(),
                    kind,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let kept: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(key, _)| !params.contains_key(key.as_ref()))
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();

    url.query_pairs_mut()
        .clear()
        .extend_pairs(kept)
        .extend_pairs(rendered);
    Ok(())
}
