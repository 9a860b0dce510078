use std::io::Write;

/// Content codings the server can apply to a response body.
///
/// ## References
/// * [RFC 9110 8.4.1: Content Codings](https://httpwg.org/specs/rfc9110.html#content.codings)
/// * [RFC 1952: GZIP file format specification version 4.3](https://datatracker.ietf.org/doc/html/rfc1952)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentCoding {
    Gzip,
}

impl ContentCoding {
    /// Encodes the given data, using the default compression level
    pub fn encode(&self, data: &[u8]) -> std::io::Result<Vec<u8>> {
        match self {
            Self::Gzip => {
                let mut encoder =
                    flate2::write::GzEncoder::new(Vec::new(), flate2::Compression::default());
                encoder.write_all(data)?;
                encoder.finish()
            }
        }
    }

    /// The token used in `Accept-Encoding` and `Content-Encoding`
    pub fn http_identifier(&self) -> &'static str {
        match self {
            Self::Gzip => "gzip",
        }
    }
}

impl std::fmt::Display for ContentCoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.http_identifier())
    }
}
