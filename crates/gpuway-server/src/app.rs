//! Router construction.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware::headers;
use crate::state::AppState;
use crate::static_files;

/// Create the application router.
///
/// Static files are matched first by prefix; every other path goes to the
/// page handler, which does the exact registry lookup itself.
pub(crate) fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    Router::new()
        .merge(static_files::static_router(static_dir))
        .fallback(get(handlers::pages::get_page))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(headers::no_cache_layer()),
        )
        .with_state(state)
}
