mod map;
pub use map::*;

/// Names of the request headers the server understands.
/// Names are stored lower-cased, so lookups use these constants as-is.
pub mod names {
    pub const ACCEPT_ENCODING: &str = "accept-encoding";
    pub const CONTENT_LENGTH: &str = "content-length";
    pub const USER_AGENT: &str = "user-agent";
}

/// Names of the response headers the server emits, in their canonical casing
pub mod response_names {
    pub const CONTENT_TYPE: &str = "Content-Type";
    pub const CONTENT_LENGTH: &str = "Content-Length";
    pub const CONTENT_ENCODING: &str = "Content-Encoding";
}
