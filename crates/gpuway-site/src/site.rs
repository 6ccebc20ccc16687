//! The single rendering entry point shared by the dev server and the builder.

use std::io::Write;
use std::path::PathBuf;

use crate::context::RenderContext;
use crate::page::PageDescriptor;
use crate::registry::Registry;
use crate::template::{ResolveError, TemplateResolver};

/// Error returned when a page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Fragments could not be composed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
    /// Template execution failed (e.g. undefined variable).
    #[error("Failed to render template {template}: {source}")]
    Template {
        /// Composed template identity.
        template: String,
        /// Execution error.
        #[source]
        source: minijinja::Error,
    },
    /// Writing to the output sink failed.
    #[error("Failed to write rendered page: {0}")]
    Io(#[source] std::io::Error),
}

/// Page registry plus the templates it renders with.
///
/// Immutable after construction and safe to share across request handlers.
#[derive(Clone, Debug)]
pub struct Site {
    registry: Registry,
    resolver: TemplateResolver,
}

impl Site {
    /// Create a site rendering `registry` with templates from `templates_dir`.
    pub fn new(registry: Registry, templates_dir: impl Into<PathBuf>) -> Self {
        Self {
            registry,
            resolver: TemplateResolver::new(templates_dir),
        }
    }

    /// The page registry.
    #[must_use]
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Template resolver.
    #[must_use]
    pub fn resolver(&self) -> &TemplateResolver {
        &self.resolver
    }

    /// Find the page for an exact request path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&PageDescriptor> {
        self.registry.find(path)
    }

    /// Render `page` as requested at `requested_path` into a string.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Resolve`] if the fragments cannot be composed
    /// and [`RenderError::Template`] if execution fails.
    pub fn render_to_string(
        &self,
        page: &PageDescriptor,
        requested_path: &str,
    ) -> Result<String, RenderError> {
        let template = self.resolver.resolve(&page.template_fragments)?;
        let ctx = RenderContext::new(page, requested_path, &self.registry);

        template.render(&ctx).map_err(|source| RenderError::Template {
            template: template.name().to_owned(),
            source,
        })
    }

    /// Render `page` into `sink`.
    ///
    /// Output is produced in full before anything is written, so the sink is
    /// untouched when rendering fails.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError`] if rendering fails or the sink cannot be
    /// written.
    pub fn render<W: Write>(
        &self,
        page: &PageDescriptor,
        requested_path: &str,
        sink: &mut W,
    ) -> Result<(), RenderError> {
        let html = self.render_to_string(page, requested_path)?;
        sink.write_all(html.as_bytes()).map_err(RenderError::Io)?;
        sink.flush().map_err(RenderError::Io)
    }
}
