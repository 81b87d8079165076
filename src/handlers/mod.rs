pub mod diagnostics;
pub mod index;
pub mod proxy;

pub use diagnostics::{hello_handler, hello_json_handler, post_json_handler};
pub use index::{download_handler, index_handler};
pub use proxy::send_request_handler;
