//! Test support: a reader that delivers its data in small chunks, one chunk per channel
//! message, so parsers see the partial reads a slow client would produce.

use std::{
    pin::Pin,
    task::{Context, Poll},
    time::Duration,
};

use bytes::{Buf, Bytes};
use tokio::{
    io::{AsyncRead, ReadBuf},
    sync::mpsc,
    time::sleep,
};

pub struct TrickleReader {
    rx: mpsc::Receiver<Bytes>,
    pending: Bytes,
}

impl TrickleReader {
    pub fn new(rx: mpsc::Receiver<Bytes>) -> Self {
        Self {
            rx,
            pending: Bytes::new(),
        }
    }

    /// Spawns a task feeding `data` in `chunk` sized pieces with a short pause between them.
    /// The reader reports EOF once everything has been sent.
    pub fn spawn(data: &[u8], chunk: usize) -> Self {
        let data = Bytes::copy_from_slice(data);
        let (tx, rx) = mpsc::channel::<Bytes>(4);

        tokio::spawn(async move {
            let mut offset = 0;
            while offset < data.len() {
                let end = (offset + chunk.max(1)).min(data.len());
                if tx.send(data.slice(offset..end)).await.is_err() {
                    return;
                }
                offset = end;
                sleep(Duration::from_millis(1)).await;
            }
        });
        Self::new(rx)
    }
}

impl AsyncRead for TrickleReader {
    fn poll_read(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<std::io::Result<()>> {
        if self.pending.is_empty() {
            match self.rx.poll_recv(cx) {
                Poll::Ready(Some(chunk)) => self.pending = chunk,
                // Sender dropped, leaving the buffer untouched signals EOF
                Poll::Ready(None) => return Poll::Ready(Ok(())),
                Poll::Pending => return Poll::Pending,
            }
        }

        let n = self.pending.len().min(buf.remaining());
        buf.put_slice(&self.pending[..n]);
        self.pending.advance(n);
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use tokio::io::AsyncReadExt;

    use super::*;

    const LINE: &[u8] = b"GET / HTTP/1.1\r\nHost: test\r\n\r\n";

    #[tokio::test]
    async fn read_exact_across_chunks() {
        let mut reader = TrickleReader::spawn(LINE, 3);
        let mut buf = [0u8; LINE.len()];
        reader.read_exact(&mut buf).await.unwrap();
        assert_eq!(&buf, LINE);
    }

    #[tokio::test]
    async fn reads_never_exceed_chunk() {
        let mut reader = TrickleReader::spawn(LINE, 4);
        let mut buf = [0u8; LINE.len()];
        let mut bytes_read = 0;

        while bytes_read < LINE.len() {
            let n = reader.read(&mut buf[bytes_read..]).await.unwrap();
            assert!(n > 0 && n <= 4);
            bytes_read += n;
        }
        assert_eq!(&buf[..], LINE);
        assert_eq!(reader.read(&mut buf).await.unwrap(), 0);
    }
}
