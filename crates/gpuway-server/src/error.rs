//! Error types for the development server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Request-scoped server error.
///
/// Converted into a response; never stops the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// No page is registered at the requested path.
    #[error("Page not found: {0}")]
    PageNotFound(String),

    /// The page exists but could not be rendered.
    #[error("Failed to render {path}: {source}")]
    Render {
        /// Requested path.
        path: String,
        /// Underlying render error.
        #[source]
        source: gpuway_site::RenderError,
    },
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match &self {
            Self::PageNotFound(path) => {
                tracing::debug!(path = %path, "Page not found");
                (StatusCode::NOT_FOUND, "404 page not found\n").into_response()
            }
            Self::Render { path, source } => {
                tracing::error!(path = %path, error = %source, "Page render failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("500 internal server error\n\n{self}\n"),
                )
                    .into_response()
            }
        }
    }
}
