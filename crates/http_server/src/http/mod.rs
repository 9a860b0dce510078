pub mod encoding;
pub mod header;
pub mod method;
pub mod parser;
pub mod request;
pub mod response;
pub mod sender;

mod version;
pub use version::{HttpVersion, ParseHttpVersionError};

use bytes::Bytes;

/// A message body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Body {
    /// No body was framed (no `content-length`, or a zero / unparsable one)
    #[default]
    None,
    Full(Bytes),
}

impl Body {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::None => &[],
            Self::Full(bytes) => bytes,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}
