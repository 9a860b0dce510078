use crate::{
    http::{
        method::Method,
        request::Request,
        response::{Response, ResponseBuilder, StatusCode},
    },
    service::{FileStore, FileStoreError, Service},
};

const TEXT_PLAIN: &str = "text/plain";
const OCTET_STREAM: &str = "application/octet-stream";
const NO_MESSAGE: &str = "No message provided";

/// The handler family a path selects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Route<'a> {
    Root,
    Echo(Option<&'a str>),
    UserAgent,
    Files(Option<&'a str>),
    Unknown,
}

impl<'a> Route<'a> {
    fn of(req: &'a Request) -> Self {
        if req.path() == "/" {
            return Self::Root;
        }
        let argument = || req.segment(1).filter(|arg| !arg.is_empty());
        match req.segment(0) {
            Some("echo") => Self::Echo(argument()),
            Some("user-agent") => Self::UserAgent,
            Some("files") => Self::Files(argument()),
            _ => Self::Unknown,
        }
    }
}

/// Dispatches requests by method and first path segment:
///
/// | Method | Path              | Response                                      |
/// |--------|-------------------|-----------------------------------------------|
/// | GET    | `/`               | 200                                           |
/// | GET    | `/echo/<msg>`     | 200, `<msg>` as `text/plain`                  |
/// | GET    | `/user-agent`     | 200, the `user-agent` header, 400 without one |
/// | GET    | `/files/<name>`   | 200 with the file, 404 when it can't be read  |
/// | POST   | `/files/<name>`   | 201 after storing the body, 400 on failure    |
///
/// Anything else GET or POST is 404, any other method is 405.
#[derive(Debug, Clone, Default)]
pub struct Router {
    files: Option<FileStore>,
}

impl Router {
    pub fn new(files: Option<FileStore>) -> Self {
        Self { files }
    }

    fn files(&self) -> Result<&FileStore, FileStoreError> {
        self.files.as_ref().ok_or(FileStoreError::NotConfigured)
    }

    async fn get(&self, req: &Request) -> Response {
        match Route::of(req) {
            Route::Root => ResponseBuilder::new(StatusCode::OK).build(),
            Route::Echo(message) => ResponseBuilder::from_req(req, StatusCode::OK)
                .content(TEXT_PLAIN, message.unwrap_or(NO_MESSAGE).to_owned())
                .build(),
            Route::UserAgent => match req.headers().user_agent() {
                Some(agent) => ResponseBuilder::from_req(req, StatusCode::OK)
                    .content(TEXT_PLAIN, agent.to_owned())
                    .build(),
                None => ResponseBuilder::new(StatusCode::BAD_REQUEST).build(),
            },
            Route::Files(Some(name)) => match self.read_file(name).await {
                Ok(contents) => ResponseBuilder::from_req(req, StatusCode::OK)
                    .content(OCTET_STREAM, contents)
                    .build(),
                Err(err) => {
                    log::warn!("reading file {name:?}: {err}");
                    ResponseBuilder::new(StatusCode::NOT_FOUND).build()
                }
            },
            Route::Files(None) | Route::Unknown => {
                ResponseBuilder::new(StatusCode::NOT_FOUND).build()
            }
        }
    }

    async fn post(&self, req: &Request) -> Response {
        match Route::of(req) {
            Route::Files(Some(name)) => match self.write_file(name, req.body().as_bytes()).await {
                Ok(()) => ResponseBuilder::new(StatusCode::CREATED).build(),
                Err(err) => {
                    log::warn!("writing file {name:?}: {err}");
                    ResponseBuilder::new(StatusCode::BAD_REQUEST).build()
                }
            },
            Route::Files(None) => ResponseBuilder::new(StatusCode::BAD_REQUEST).build(),
            _ => ResponseBuilder::new(StatusCode::NOT_FOUND).build(),
        }
    }

    async fn read_file(&self, name: &str) -> Result<bytes::Bytes, FileStoreError> {
        self.files()?.read(name).await
    }

    async fn write_file(&self, name: &str, contents: &[u8]) -> Result<(), FileStoreError> {
        self.files()?.write(name, contents).await
    }
}

impl Service for Router {
    async fn call(&self, req: &Request) -> Response {
        if *req.method() == Method::GET {
            self.get(req).await
        } else if *req.method() == Method::POST {
            self.post(req).await
        } else {
            ResponseBuilder::new(StatusCode::METHOD_NOT_ALLOWED).build()
        }
    }
}
