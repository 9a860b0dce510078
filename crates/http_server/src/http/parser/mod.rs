mod error;
mod line;

use bytes::{Bytes, BytesMut};
pub use error::*;
use memchr::memchr;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::http::{Body, header::HeaderMap, request::Request};

pub type HttpParseResult<T> = Result<T, HttpParseError>;

/// Longest line, terminator included, the reader will buffer
pub const MAX_LINE_BYTES: usize = 8192;
/// Largest header section, terminating blank line included
pub const MAX_HEADER_BYTES: usize = 64 * 1024;

/// A buffered cursor over a connection, yielding `\n` terminated lines and then raw body bytes.
///
/// Both phases share one buffer, so bytes read ahead while looking for a line end are handed
/// out as body bytes later.
pub struct LineReader<READER: AsyncRead + Unpin> {
    inner: READER,
    buf: BytesMut,
    /// How far into `buf` we already know there is no `\n`
    scanned: usize,
}

impl<READER> LineReader<READER>
where
    READER: AsyncRead + Unpin,
{
    const BUF_SIZE: usize = 8192;

    pub fn new(reader: READER) -> Self {
        Self {
            inner: reader,
            buf: BytesMut::with_capacity(Self::BUF_SIZE),
            scanned: 0,
        }
    }

    async fn fill(&mut self) -> std::io::Result<usize> {
        self.buf.reserve(Self::BUF_SIZE);
        self.inner.read_buf(&mut self.buf).await
    }

    /// Reads the next line, terminator included. Lines over [`MAX_LINE_BYTES`] are refused
    /// without buffering past the limit.
    pub async fn read_line(&mut self) -> Result<Line, ReadError> {
        let too_long = ReadError::LineTooLong {
            limit: MAX_LINE_BYTES,
        };
        loop {
            if let Some(nl) = memchr(b'\n', &self.buf[self.scanned..]) {
                let end = self.scanned + nl + 1;
                self.scanned = 0;
                if end > MAX_LINE_BYTES {
                    return Err(too_long);
                }
                return Ok(Line(self.buf.split_to(end).freeze()));
            }
            self.scanned = self.buf.len();
            if self.scanned >= MAX_LINE_BYTES {
                return Err(too_long);
            }

            if 0 == self.fill().await? {
                return Err(ReadError::UnexpectedEof);
            }
        }
    }

    /// Reads `len` bytes, or fewer if the peer closes the connection first
    pub async fn read_body(&mut self, len: usize) -> std::io::Result<Bytes> {
        let mut body = self.buf.split_to(len.min(self.buf.len()));
        self.scanned = 0;

        let remaining = len - body.len();
        if remaining > 0 {
            // Grow with the data actually received rather than trusting the declared length
            let mut rest = Vec::new();
            (&mut self.inner)
                .take(remaining as u64)
                .read_to_end(&mut rest)
                .await?;
            body.extend_from_slice(&rest);
        }
        Ok(body.freeze())
    }
}

/// A single line as read off the wire, terminator included
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line(Bytes);

impl From<Bytes> for Line {
    fn from(bytes: Bytes) -> Self {
        Self(bytes)
    }
}

impl Line {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// The line without its `\n` or `\r\n` terminator
    pub fn content(&self) -> &[u8] {
        let line = self.0.strip_suffix(b"\n").unwrap_or(&self.0[..]);
        line.strip_suffix(b"\r").unwrap_or(line)
    }

    /// Whether this is the blank line closing the header section.
    /// Only an exact `\r\n` counts.
    pub fn is_terminator(&self) -> bool {
        &self.0[..] == b"\r\n"
    }

    /// Runs of non-whitespace bytes
    pub fn words(&self) -> impl Iterator<Item = &[u8]> {
        self.content()
            .split(u8::is_ascii_whitespace)
            .filter(|word| !word.is_empty())
    }

    /// Splits a field line on its first colon
    /// SPEC: RFC 9112 5 Field Syntax
    /// ABNF: field-line = field-name ":" OWS field-value OWS
    pub fn split_field(&self) -> Option<(&[u8], &[u8])> {
        let content = self.content();
        let colon = memchr(b':', content)?;
        Some((&content[..colon], &content[colon + 1..]))
    }
}

/// Parses a single HTTP request off a reader
pub struct Parser<READER: AsyncRead + Unpin> {
    reader: LineReader<READER>,
}

impl<READER> Parser<READER>
where
    READER: AsyncRead + Unpin,
{
    pub fn new(reader: READER) -> Self {
        Self {
            reader: LineReader::new(reader),
        }
    }

    pub async fn parse_request(&mut self) -> HttpParseResult<Request> {
        // SPEC: RFC 9112 - 2.1 Message Format
        // ABNF:
        //  HTTP-message = start-line CRLF *( field-line CRLF ) CRLF [ message-body ]
        let line = self
            .reader
            .read_line()
            .await
            .map_err(|err| HttpParseError::read(err, Location::StartLine))?;
        let request_line = line::parse_request_line(&line)?;
        let headers = self.parse_headers().await?;
        let body = self.parse_body(&headers).await?;

        Ok(Request::new(request_line, headers, body))
    }

    /// Collects header fields until the blank line. A read failure ends the section early and
    /// keeps what was collected; lines without a colon are skipped. Exceeding a size limit
    /// fails the request.
    async fn parse_headers(&mut self) -> HttpParseResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut total = 0;
        loop {
            let line = match self.reader.read_line().await {
                Ok(line) => line,
                Err(err @ ReadError::LineTooLong { .. }) => {
                    return Err(HttpParseError::read(err, Location::Headers));
                }
                Err(err) => {
                    log::debug!("header section ended without blank line: {err}");
                    break;
                }
            };
            total += line.as_bytes().len();
            if total > MAX_HEADER_BYTES {
                return Err(HttpParseError::new(
                    ParseErrorKind::TooLarge {
                        what: LimitKind::HeaderBytesTotal,
                        limit: MAX_HEADER_BYTES,
                    },
                    Location::Headers,
                ));
            }
            if line.is_terminator() {
                break;
            }

            match line.split_field() {
                Some((name, value)) => {
                    headers.insert(
                        &String::from_utf8_lossy(name),
                        &String::from_utf8_lossy(value),
                    );
                }
                None => log::debug!(
                    "skipping header line without colon: {:?}",
                    String::from_utf8_lossy(line.content())
                ),
            }
        }
        Ok(headers)
    }

    async fn parse_body(&mut self, headers: &HeaderMap) -> HttpParseResult<Body> {
        let len = match headers.content_length() {
            Some(len) if len > 0 => len,
            _ => return Ok(Body::None),
        };

        let body = self.reader.read_body(len).await.map_err(|err| {
            HttpParseError::new(ParseErrorKind::Io(err.kind()), Location::Body)
        })?;
        if body.len() < len {
            log::debug!("body truncated: expected {len} bytes, got {}", body.len());
        }
        Ok(Body::Full(body))
    }
}
