//! A small async HTTP/1.1 server: one request per connection, dispatched to echo,
//! user-agent and file handlers.

pub mod config;
pub mod http;
pub mod service;

#[cfg(test)]
mod sync;

use std::{net::SocketAddr, path::PathBuf, sync::Arc};

use tokio::{
    io::AsyncWriteExt,
    net::{TcpListener, TcpSocket, TcpStream},
};

pub use crate::config::Config;
use crate::{
    http::{
        parser::Parser,
        response::{Response, ResponseBuilder},
        sender::Sender,
    },
    service::{FileStore, Router, Service},
};

#[derive(Debug, thiserror::Error)]
pub enum HttpServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },
    #[error("failed to open storage directory {}: {source}", directory.display())]
    Storage {
        directory: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to accept connection: {0}")]
    Accept(std::io::Error),
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Failure confined to a single connection
#[derive(Debug, thiserror::Error)]
enum ConnectionError {
    #[error("writing response: {0}")]
    Write(std::io::Error),
    #[error("closing connection: {0}")]
    Shutdown(std::io::Error),
}

/// Accepts connections and serves each one on its own task
pub struct HttpServer<S: Service = Router>(Arc<HttpServerInternal<S>>);

impl HttpServer<Router> {
    /// Builds the router for `config`, opening its storage directory
    pub fn from_config(config: &Config) -> Result<Self, HttpServerError> {
        let files = config
            .directory
            .as_ref()
            .map(|directory| {
                FileStore::new(directory).map_err(|source| HttpServerError::Storage {
                    directory: directory.clone(),
                    source,
                })
            })
            .transpose()?;
        Ok(Self::new(config.addr, Router::new(files)))
    }
}

impl<S: Service> HttpServer<S> {
    pub fn new<A: Into<SocketAddr>>(addr: A, service: S) -> Self {
        Self(Arc::new(HttpServerInternal::new(addr, service)))
    }

    pub fn addr(&self) -> SocketAddr {
        self.0.addr
    }

    /// Binds the configured address and serves until the listener fails
    pub async fn serve(&self) -> Result<(), HttpServerError> {
        let listener = self.0.bind().map_err(|source| HttpServerError::Bind {
            addr: self.0.addr,
            source,
        })?;
        self.serve_listener(listener).await
    }

    /// Serves on an already bound listener
    pub async fn serve_listener(&self, listener: TcpListener) -> Result<(), HttpServerError> {
        HttpServerInternal::serve(self.0.clone(), listener).await
    }
}

pub(crate) struct HttpServerInternal<S: Service> {
    addr: SocketAddr,
    service: S,
}

impl<S: Service> HttpServerInternal<S> {
    pub fn new<A: Into<SocketAddr>>(addr: A, service: S) -> Self {
        Self {
            addr: addr.into(),
            service,
        }
    }

    fn bind(&self) -> std::io::Result<TcpListener> {
        let sock = match self.addr {
            SocketAddr::V4(_) => TcpSocket::new_v4()?,
            SocketAddr::V6(_) => TcpSocket::new_v6()?,
        };

        sock.set_reuseaddr(true)?;
        sock.bind(self.addr)?;
        sock.listen(1024)
    }

    async fn serve(sel: Arc<Self>, listener: TcpListener) -> Result<(), HttpServerError> {
        log::info!("listening on {}", listener.local_addr()?);
        loop {
            let (stream, addr) = listener.accept().await.map_err(HttpServerError::Accept)?;
            log::debug!("accepted connection from {addr}");
            tokio::spawn(Self::handle_connection(sel.clone(), stream, addr));
        }
    }

    async fn handle_connection(sel: Arc<Self>, stream: TcpStream, addr: SocketAddr) {
        if let Err(err) = sel.serve_connection(stream, addr).await {
            log::warn!("connection {addr}: {err}");
        }
    }

    /// Reads one request, answers it and closes the connection. The stream is dropped, and so
    /// closed, on every path out of here.
    async fn serve_connection(
        &self,
        mut stream: TcpStream,
        addr: SocketAddr,
    ) -> Result<(), ConnectionError> {
        let (reader, writer) = stream.split();
        let mut parser = Parser::new(reader);
        let mut sender = Sender::new(writer);

        let response: Response = match parser.parse_request().await {
            Ok(req) => {
                if req.version().is_err() {
                    log::debug!("{addr}: unrecognized protocol {:?}", req.line().protocol);
                }
                let response = self.service.call(&req).await;
                log::info!(
                    "{addr} \"{} {} {}\" {}",
                    req.method(),
                    req.path(),
                    req.line().protocol,
                    response.status
                );
                response
            }
            Err(err) => {
                log::warn!("{addr}: {err}");
                ResponseBuilder::new(err.status_code()).build()
            }
        };

        sender
            .send_response(&response)
            .await
            .map_err(ConnectionError::Write)?;
        sender
            .into_inner()
            .shutdown()
            .await
            .map_err(ConnectionError::Shutdown)
    }
}
