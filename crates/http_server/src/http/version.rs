use std::str::FromStr;

/// HTTP Version
/// SPEC: RFC 9110 - 2.5. Protocol Version
/// ABNF: HTTP-version = HTTP-name "/" DIGIT "." DIGIT
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpVersion {
    pub major: u8,
    pub minor: u8,
}

impl HttpVersion {
    pub const HTTP_1_0: Self = Self { major: 1, minor: 0 };
    pub const HTTP_1_1: Self = Self { major: 1, minor: 1 };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP version")]
pub struct ParseHttpVersionError;

impl FromStr for HttpVersion {
    type Err = ParseHttpVersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (major, minor) = s
            .strip_prefix("HTTP/")
            .and_then(|s| s.split_once('.'))
            .ok_or(ParseHttpVersionError)?;
        let digit = |s: &str| match s.as_bytes() {
            [d @ b'0'..=b'9'] => Ok(d - b'0'),
            _ => Err(ParseHttpVersionError),
        };
        Ok(HttpVersion {
            major: digit(major)?,
            minor: digit(minor)?,
        })
    }
}

impl std::fmt::Display for HttpVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP/{}.{}", self.major, self.minor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_versions() {
        assert_eq!("HTTP/1.1".parse::<HttpVersion>(), Ok(HttpVersion::HTTP_1_1));
        assert_eq!("HTTP/1.0".parse::<HttpVersion>(), Ok(HttpVersion::HTTP_1_0));
        assert_eq!("HTTP/2".parse::<HttpVersion>(), Err(ParseHttpVersionError));
        assert_eq!("HTTP/1.10".parse::<HttpVersion>(), Err(ParseHttpVersionError));
        assert_eq!("http/1.1".parse::<HttpVersion>(), Err(ParseHttpVersionError));
    }

    #[test]
    fn display() {
        assert_eq!(HttpVersion::HTTP_1_1.to_string(), "HTTP/1.1");
    }
}
