use std::fmt::Display;

use crate::http::response::StatusCode;

/// Failure of the line reader to produce a complete line
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("connection closed before end of line")]
    UnexpectedEof,
    #[error("line exceeds {limit} bytes")]
    LineTooLong { limit: usize },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    StartLine,
    Headers,
    Body,
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::StartLine => "start line",
            Self::Headers => "headers",
            Self::Body => "body",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    LineBytes,
    HeaderBytesTotal,
}

impl Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::LineBytes => "line length",
            Self::HeaderBytesTotal => "header section size",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    /// Fewer than three whitespace separated fields on the request line
    MalformedRequestLine { fields: usize },
    /// Ran out of input before the line ended
    IncompleteMessage,
    TooLarge { what: LimitKind, limit: usize },
    Io(std::io::ErrorKind),
}

impl Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedRequestLine { fields } => {
                write!(f, "malformed request line ({fields} of 3 fields)")
            }
            Self::IncompleteMessage => f.write_str("incomplete message"),
            Self::TooLarge { what, limit } => write!(f, "{what} exceeds {limit} bytes"),
            Self::Io(kind) => Display::fmt(kind, f),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpParseError {
    pub kind: ParseErrorKind,
    pub location: Location,
}

impl Display for HttpParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "http parse error: {} while parsing {}",
            self.kind, self.location
        )
    }
}

impl std::error::Error for HttpParseError {}

impl HttpParseError {
    pub fn new(kind: ParseErrorKind, location: Location) -> Self {
        Self { kind, location }
    }

    pub(crate) fn read(err: ReadError, location: Location) -> Self {
        let kind = match err {
            ReadError::UnexpectedEof => ParseErrorKind::IncompleteMessage,
            ReadError::LineTooLong { limit } => ParseErrorKind::TooLarge {
                what: LimitKind::LineBytes,
                limit,
            },
            ReadError::Io(err) => ParseErrorKind::Io(err.kind()),
        };
        Self::new(kind, location)
    }

    /// The status the client is told about before the connection is closed
    pub fn status_code(&self) -> StatusCode {
        match self.kind {
            ParseErrorKind::MalformedRequestLine { .. }
            | ParseErrorKind::IncompleteMessage
            | ParseErrorKind::TooLarge { .. }
            | ParseErrorKind::Io(_) => StatusCode::BAD_REQUEST,
        }
    }
}
