use bytes::Bytes;

use crate::http::{
    HttpVersion,
    encoding::ContentCoding,
    request::Request,
    response::{Content, Response, StatusCode},
};

pub struct ResponseBuilder {
    status: StatusCode,
    content: Option<Content>,
    compress: bool,
}

impl ResponseBuilder {
    /// Starts a response to `req`, negotiating compression from its `accept-encoding`
    pub fn from_req(req: &Request, status: StatusCode) -> Self {
        Self::new(status).compress(req.headers().accepts(ContentCoding::Gzip))
    }

    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            content: None,
            compress: false,
        }
    }

    pub fn build(self) -> Response {
        let ResponseBuilder {
            status,
            content,
            compress,
        } = self;

        let message = status.canonical_reason().unwrap_or("Unknown Reason");

        Response {
            version: HttpVersion::HTTP_1_1,
            status,
            message,
            content,
            compress,
        }
    }

    pub fn compress(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    pub fn content(mut self, content_type: &'static str, body: impl Into<Bytes>) -> Self {
        self.content = Some(Content {
            content_type,
            body: body.into(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{Body, header::HeaderMap, method::Method, request::RequestLine};

    #[test]
    fn reason_defaults_to_canonical() {
        let res = ResponseBuilder::new(StatusCode::METHOD_NOT_ALLOWED).build();
        assert_eq!(res.message, "Method Not Allowed");
        assert_eq!(res.version, HttpVersion::HTTP_1_1);
        assert!(res.content.is_none());
        assert!(!res.compress);
    }

    #[test]
    fn from_req_negotiates_gzip() {
        let mut headers = HeaderMap::new();
        headers.insert("Accept-Encoding", "gzip");
        let req = Request::new(
            RequestLine {
                method: Method::GET,
                path: "/echo/hi".to_owned(),
                protocol: "HTTP/1.1".to_owned(),
            },
            headers,
            Body::None,
        );
        let res = ResponseBuilder::from_req(&req, StatusCode::OK)
            .content("text/plain", "hi")
            .build();
        assert!(res.compress);
        assert_eq!(res.body().map(|b| b.as_ref()), Some(&b"hi"[..]));
    }
}
