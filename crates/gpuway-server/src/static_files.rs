//! Static file serving.
//!
//! Files under the static assets directory are served as-is at
//! `/static/<path>`.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use gpuway_site::STATIC_SEGMENT;
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create router serving `static_dir` under `/static`. The registry refuses
/// page routes with that prefix.
pub(crate) fn static_router(static_dir: &Path) -> Router<Arc<AppState>> {
    if !static_dir.is_dir() {
        tracing::warn!(
            path = %static_dir.display(),
            "Static directory not found, /static/ will return 404"
        );
    }
    Router::new().nest_service(&format!("/{STATIC_SEGMENT}"), ServeDir::new(static_dir))
}
