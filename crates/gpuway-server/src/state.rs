//! Application state.
//!
//! Shared state for all request handlers.

use gpuway_site::Site;

/// Application state shared across all handlers.
///
/// Read-only for the lifetime of the server, so handlers need no locking.
pub(crate) struct AppState {
    /// Registry and templates to render from.
    pub(crate) site: Site,
}
