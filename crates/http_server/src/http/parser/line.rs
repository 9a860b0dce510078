use smallvec::SmallVec;

use crate::http::{
    method::Method,
    parser::{HttpParseError, HttpParseResult, Line, Location, ParseErrorKind},
    request::RequestLine,
};

/// Parses the request line. Fields are separated by runs of ASCII whitespace; anything after
/// the third field is ignored.
/// SPEC: RFC 9112 3 Request Line
/// ABNF: request-line = method SP request-target SP HTTP-version
pub(super) fn parse_request_line(line: &Line) -> HttpParseResult<RequestLine> {
    let fields: SmallVec<[&[u8]; 3]> = line.words().take(3).collect();
    let [method, path, protocol] = fields[..] else {
        return Err(HttpParseError::new(
            ParseErrorKind::MalformedRequestLine {
                fields: fields.len(),
            },
            Location::StartLine,
        ));
    };

    Ok(RequestLine {
        method: Method::from(&*String::from_utf8_lossy(method)),
        path: String::from_utf8_lossy(path).into_owned(),
        protocol: String::from_utf8_lossy(protocol).into_owned(),
    })
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;

    use super::*;

    fn parse(raw: &'static [u8]) -> HttpParseResult<RequestLine> {
        parse_request_line(&Line::from(Bytes::from_static(raw)))
    }

    #[test]
    fn request_lines() {
        let cases: &[(&'static [u8], HttpParseResult<RequestLine>)] = &[
            (
                b"GET / HTTP/1.1\r\n",
                Ok(RequestLine {
                    method: Method::GET,
                    path: "/".to_owned(),
                    protocol: "HTTP/1.1".to_owned(),
                }),
            ),
            (
                b"PATCH /login?username=xxx123 HTTP/1.1\r\n",
                Ok(RequestLine {
                    method: Method::PATCH,
                    path: "/login?username=xxx123".to_owned(),
                    protocol: "HTTP/1.1".to_owned(),
                }),
            ),
            (
                b"POST  /files/a.txt\tHTTP/1.0 trailing junk\r\n",
                Ok(RequestLine {
                    method: Method::POST,
                    path: "/files/a.txt".to_owned(),
                    protocol: "HTTP/1.0".to_owned(),
                }),
            ),
            (
                b"GET /\r\n",
                Err(HttpParseError::new(
                    ParseErrorKind::MalformedRequestLine { fields: 2 },
                    Location::StartLine,
                )),
            ),
            (
                b"\r\n",
                Err(HttpParseError::new(
                    ParseErrorKind::MalformedRequestLine { fields: 0 },
                    Location::StartLine,
                )),
            ),
        ];

        for (data, expected) in cases {
            assert_eq!(&parse(data), expected, "parsing {:?}", Bytes::from_static(data));
        }
    }

    #[test]
    fn method_case_is_preserved() {
        let line = parse(b"get / HTTP/1.1\r\n").unwrap();
        assert_ne!(line.method, Method::GET);
        assert_eq!(line.method.as_str(), "get");
    }
}
