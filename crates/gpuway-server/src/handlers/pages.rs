//! Page rendering endpoint.
//!
//! Maps the request path to a registered page by exact match and renders it
//! with the same entry point the static builder uses, so both modes produce
//! identical bytes.

use std::path::Path;
use std::sync::Arc;

use axum::extract::State;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use percent_encoding::percent_decode_str;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET for any path not claimed by another route.
pub(crate) async fn get_page(
    State(state): State<Arc<AppState>>,
    uri: Uri,
) -> Result<Response, ServerError> {
    let path = decode_path(uri.path()).ok_or_else(|| ServerError::PageNotFound(uri.path().to_owned()))?;

    let page = state
        .site
        .find(&path)
        .ok_or_else(|| ServerError::PageNotFound(path.clone()))?;

    let html = state
        .site
        .render_to_string(page, &path)
        .map_err(|source| ServerError::Render {
            path: path.clone(),
            source,
        })?;

    tracing::debug!(path = %path, bytes = html.len(), "Rendered page");
    Ok(([(header::CONTENT_TYPE, content_type(&page.route_path))], html).into_response())
}

/// Percent-decode the request path. `None` if it is not valid UTF-8.
fn decode_path(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(std::borrow::Cow::into_owned)
}

/// Content type for a route. Extensionless routes are HTML documents.
fn content_type(route: &str) -> String {
    match Path::new(route).extension() {
        None => "text/html; charset=utf-8".to_owned(),
        Some(_) => {
            let mime = mime_guess::from_path(route).first_or_octet_stream();
            if mime.type_() == mime_guess::mime::TEXT {
                format!("{}; charset=utf-8", mime.essence_str())
            } else {
                mime.essence_str().to_owned()
            }
        }
    }
}
