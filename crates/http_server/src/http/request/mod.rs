use crate::http::{
    Body, HttpVersion, ParseHttpVersionError, header::HeaderMap, method::Method,
};

/// The first line of a request
/// SPEC: RFC 9112 3 Request Line
/// ABNF: request-line = method SP request-target SP HTTP-version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLine {
    pub method: Method,
    /// The raw request-target, not URL decoded
    pub path: String,
    /// The protocol token as sent, e.g. `HTTP/1.1`
    pub protocol: String,
}

#[derive(Debug, Clone)]
pub struct Request {
    line: RequestLine,
    headers: HeaderMap,
    body: Body,
}

impl Request {
    pub fn new(line: RequestLine, headers: HeaderMap, body: Body) -> Self {
        Self {
            line,
            headers,
            body,
        }
    }

    pub fn line(&self) -> &RequestLine {
        &self.line
    }

    pub fn method(&self) -> &Method {
        &self.line.method
    }

    pub fn path(&self) -> &str {
        &self.line.path
    }

    pub fn version(&self) -> Result<HttpVersion, ParseHttpVersionError> {
        self.line.protocol.parse()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    /// Returns the `index`th `/`-separated segment of the path, counting from the segment
    /// after the leading slash. Segments are not URL decoded.
    ///
    /// For `/files/a.txt`, segment 0 is `files` and segment 1 is `a.txt`.
    pub fn segment(&self, index: usize) -> Option<&str> {
        let path = self.path();
        path.strip_prefix('/').unwrap_or(path).split('/').nth(index)
    }
}
