// Route path constants - single source of truth for all paths

pub const INDEX: &str = "/";
pub const STATIC: &str = "/static";
pub const DOWNLOAD: &str = "/download";
pub const SEND_REQUEST: &str = "/send-request";
pub const HELLO: &str = "/hello";
pub const HELLO_JSON: &str = "/hello_json";
pub const POST_JSON: &str = "/post_json";
pub const SWAGGER_UI: &str = "/swagger-ui";
pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";
