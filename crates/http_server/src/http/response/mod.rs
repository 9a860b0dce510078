use std::fmt::Display;

use bytes::Bytes;
mod builder;
pub use builder::ResponseBuilder;

use crate::http::HttpVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatusCode(u16);

impl StatusCode {
    pub const OK: Self = Self(200);
    pub const CREATED: Self = Self(201);
    pub const BAD_REQUEST: Self = Self(400);
    pub const NOT_FOUND: Self = Self(404);
    pub const METHOD_NOT_ALLOWED: Self = Self(405);

    pub const fn as_u16(&self) -> u16 {
        self.0
    }

    pub const fn canonical_reason(&self) -> Option<&'static str> {
        Some(match self.0 {
            200 => "OK",
            201 => "Created",
            400 => "Bad Request",
            404 => "Not Found",
            405 => "Method Not Allowed",
            _ => return None,
        })
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// A typed payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub content_type: &'static str,
    pub body: Bytes,
}

/// A response as decided by a handler, before it is framed onto the wire.
///
/// Without [`Content`] only the status line and the blank line are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub version: HttpVersion,
    pub status: StatusCode,
    pub message: &'static str,
    pub content: Option<Content>,
    /// Gzip the content when written
    pub compress: bool,
}

impl Response {
    pub fn body(&self) -> Option<&Bytes> {
        self.content.as_ref().map(|content| &content.body)
    }
}
