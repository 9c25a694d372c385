//! Static file server.
//!
//! The whole contract: GET-only path-to-file resolution under a root
//! directory, `/` mapping to `index.html`, `404` with a plain-text body on
//! missing files, and a `Content-Type` derived from the file extension with
//! `text/plain` for anything unrecognized. No caching, no routing table.

use axum::{
    body::Body,
    http::{header, Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use crate::error::{CliError, CliResult};

/// Static server configuration
#[derive(Debug, Clone)]
pub struct ServeConfig {
    /// Directory files are resolved under
    pub root: PathBuf,
    /// HTTP port
    pub port: u16,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            port: 3000,
        }
    }
}

impl ServeConfig {
    /// Create a builder
    #[must_use]
    pub fn builder() -> ServeConfigBuilder {
        ServeConfigBuilder::default()
    }
}

/// Builder for [`ServeConfig`]
#[derive(Debug, Clone, Default)]
pub struct ServeConfigBuilder {
    config: ServeConfig,
}

impl ServeConfigBuilder {
    /// Set the root directory
    #[must_use]
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root = root.into();
        self
    }

    /// Set the HTTP port
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> ServeConfig {
        self.config
    }
}

/// Static site server
#[derive(Debug)]
pub struct StaticServer {
    config: ServeConfig,
}

impl StaticServer {
    /// Create a server for the given configuration
    #[must_use]
    pub fn new(config: ServeConfig) -> Self {
        Self { config }
    }

    /// The URL the server will listen on
    #[must_use]
    pub fn url(&self) -> String {
        format!("http://localhost:{}", self.config.port)
    }

    /// Build the router: `/` serves `index.html`, everything else resolves
    /// relative to the root. Non-GET requests fall through to 404, keeping
    /// the single-handler contract.
    #[must_use]
    pub fn router(&self) -> Router {
        let root = Arc::new(self.config.root.clone());
        Router::new()
            .route(
                "/",
                get({
                    let root = root.clone();
                    move || serve_file_response(root.clone(), PathBuf::from("index.html"))
                }),
            )
            .fallback({
                let root = root.clone();
                move |method: Method, uri: Uri| serve_static(root.clone(), method, uri)
            })
    }

    /// Bind and serve until shutdown (blocking within the async runtime).
    pub async fn run(&self) -> CliResult<()> {
        let addr = SocketAddr::from(([0, 0, 0, 0], self.config.port));
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| CliError::server(format!("failed to bind {addr}: {e}")))?;
        tracing::info!(url = %self.url(), root = %self.config.root.display(), "serving static site");
        axum::serve(listener, self.router())
            .await
            .map_err(|e| CliError::server(format!("server error: {e}")))?;
        Ok(())
    }
}

/// Resolve a request path against the root and serve the file.
async fn serve_static(root: Arc<PathBuf>, method: Method, uri: Uri) -> Response {
    if method != Method::GET {
        return not_found();
    }
    let relative = uri.path().trim_start_matches('/');
    serve_file_response(root, PathBuf::from(relative)).await
}

/// Serve one file under the root with its extension-derived content type.
async fn serve_file_response(root: Arc<PathBuf>, relative: PathBuf) -> Response {
    // Paths that climb out of the root resolve to not-found.
    if relative
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        return not_found();
    }
    let path = root.join(relative);
    match tokio::fs::read(&path).await {
        Ok(contents) => Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, content_type_for(&path))
            .body(Body::from(contents))
            .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response()),
        Err(_) => not_found(),
    }
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Content type for a file path, from its extension alone.
#[must_use]
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") => "text/html",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("svg") => "image/svg+xml",
        Some("ico") => "image/x-icon",
        Some("webp") => "image/webp",
        // txt and anything unrecognized
        _ => "text/plain",
    }
}
