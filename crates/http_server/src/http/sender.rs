use std::fmt;

use bytes::BytesMut;
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::{
    encoding::ContentCoding,
    header::response_names::{CONTENT_ENCODING, CONTENT_LENGTH, CONTENT_TYPE},
    response::Response,
};

/// Frames a [`Response`] onto a writer.
///
/// The whole message is assembled first and handed to the writer in one `write_all`, so the
/// status line, header block and body go out in order with nothing interleaved.
pub struct Sender<WRITER: AsyncWrite + Unpin> {
    writer: WRITER,
    buf: BytesMut,
}

impl<WRITER> Sender<WRITER>
where
    WRITER: AsyncWrite + Unpin,
{
    pub fn new(writer: WRITER) -> Self {
        Self {
            writer,
            buf: BytesMut::with_capacity(1024),
        }
    }

    pub fn into_inner(self) -> WRITER {
        self.writer
    }

    fn write_header(&mut self, name: &str, value: impl fmt::Display) {
        use std::fmt::Write;
        // Writing into a BytesMut never fails
        _ = write!(self, "{name}: {value}\r\n");
    }

    pub async fn send_response(&mut self, response: &Response) -> std::io::Result<()> {
        use std::fmt::Write;
        // SPEC: RFC 9112 4 Status Line
        // ABNF: status-line = HTTP-version SP status-code SP [ reason-phrase ]
        _ = write!(
            self,
            "{} {} {}\r\n",
            response.version, response.status, response.message
        );

        if let Some(content) = &response.content {
            self.write_header(CONTENT_TYPE, content.content_type);
            if response.compress {
                let coding = ContentCoding::Gzip;
                let encoded = coding.encode(&content.body)?;
                self.write_header(CONTENT_LENGTH, encoded.len());
                self.write_header(CONTENT_ENCODING, coding);
                self.buf.extend_from_slice(b"\r\n");
                self.buf.extend_from_slice(&encoded);
            } else {
                self.write_header(CONTENT_LENGTH, content.body.len());
                self.buf.extend_from_slice(b"\r\n");
                self.buf.extend_from_slice(&content.body);
            }
        } else {
            self.buf.extend_from_slice(b"\r\n");
        }

        self.flush().await
    }

    async fn flush(&mut self) -> std::io::Result<()> {
        let res = self.writer.write_all(&self.buf).await;
        self.buf.clear();
        res?;
        self.writer.flush().await
    }
}

impl<WRITER> fmt::Write for Sender<WRITER>
where
    WRITER: AsyncWrite + Unpin,
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.extend_from_slice(s.as_bytes());
        Ok(())
    }
}
