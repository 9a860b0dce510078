pub mod files;
pub mod router;

pub use files::{FileStore, FileStoreError};
pub use router::Router;

use crate::http::{request::Request, response::Response};

/// Turns a parsed request into the response for it.
///
/// Failures are part of the answer: an implementation reports them as a [`Response`] status,
/// it never errors out of the connection.
pub trait Service: Send + Sync + 'static {
    fn call(&self, req: &Request) -> impl Future<Output = Response> + Send;
}
