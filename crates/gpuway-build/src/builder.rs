//! Static site builder.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use gpuway_site::{PageDescriptor, RegistryError, RenderError, STATIC_SEGMENT, Site, output_file};
use rayon::prelude::*;

use crate::copy::copy_tree;

/// Configuration for static site building.
#[derive(Clone, Debug)]
pub struct BuildConfig {
    /// Output root. Removed and recreated on every build.
    pub output_dir: PathBuf,
    /// Assets mirrored into `<output_dir>/static`. Skipped if missing.
    pub static_dir: PathBuf,
}

impl BuildConfig {
    /// Take the output and static directories from loaded configuration.
    #[must_use]
    pub fn from_config(config: &gpuway_config::Config) -> Self {
        Self {
            output_dir: config.site_resolved.output_dir.clone(),
            static_dir: config.site_resolved.static_dir.clone(),
        }
    }
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The built-in page set is invalid.
    #[error(transparent)]
    Registry(#[from] RegistryError),
    /// A page failed to render. Nothing has been written when this is returned.
    #[error("Failed to render {route}: {source}")]
    Render {
        /// Route of the failing page.
        route: String,
        #[source]
        source: RenderError,
    },
    /// Filesystem error.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Clearing the output root would delete templates or assets.
    #[error(
        "Output directory {} contains source directory {}",
        .output.display(),
        .source_dir.display()
    )]
    OutputContainsSources {
        /// Configured output root.
        output: PathBuf,
        /// Templates or static directory inside it.
        source_dir: PathBuf,
    },
}

/// What a build produced.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Generated page files, in registry order.
    pub pages: Vec<PathBuf>,
    /// Number of static files copied.
    pub static_files: usize,
}

/// Renders every page of a [`Site`] to disk.
pub struct StaticSiteBuilder {
    site: Site,
    config: BuildConfig,
}

impl StaticSiteBuilder {
    /// Create a builder for `site`.
    #[must_use]
    pub fn new(site: Site, config: BuildConfig) -> Self {
        Self { site, config }
    }

    /// Build the site.
    ///
    /// All pages are rendered before the output root is touched, so a
    /// template error leaves the previous build in place.
    ///
    /// # Errors
    ///
    /// Returns the render failure of the earliest page in registry order,
    /// any filesystem error, or
    /// [`BuildError::OutputContainsSources`] if the output root would swallow
    /// the templates or static directory.
    pub fn build(&self) -> Result<BuildReport, BuildError> {
        let output_dir = &self.config.output_dir;
        self.check_output_dir()?;

        let start = Instant::now();
        let rendered = self.render_all()?;
        tracing::info!(
            pages = rendered.len(),
            elapsed = ?start.elapsed(),
            "Rendered pages"
        );

        reset_dir(output_dir)?;

        let mut report = BuildReport::default();
        for (page, html) in rendered {
            let path = output_path(output_dir, &page.route_path);
            write_page(&path, &html)?;
            tracing::info!(route = %page.route_path, path = %path.display(), "Generated page");
            report.pages.push(path);
        }

        let static_dir = &self.config.static_dir;
        if static_dir.is_dir() {
            report.static_files = copy_tree(static_dir, &output_dir.join(STATIC_SEGMENT))?;
            tracing::info!(
                files = report.static_files,
                source = %static_dir.display(),
                "Copied static assets"
            );
        } else {
            tracing::warn!(path = %static_dir.display(), "Static directory not found, skipping");
        }

        Ok(report)
    }

    /// Render every page in parallel. Results keep registry order, so the
    /// reported failure does not depend on thread scheduling.
    fn render_all(&self) -> Result<Vec<(&PageDescriptor, String)>, BuildError> {
        let results: Vec<_> = self
            .site
            .registry()
            .pages()
            .par_iter()
            .map(|page| {
                self.site
                    .render_to_string(page, &page.route_path)
                    .map(|html| (page, html))
                    .map_err(|source| BuildError::Render {
                        route: page.route_path.clone(),
                        source,
                    })
            })
            .collect();

        results.into_iter().collect()
    }

    fn check_output_dir(&self) -> Result<(), BuildError> {
        let output = absolute(&self.config.output_dir);
        let sources = [self.site.resolver().root(), self.config.static_dir.as_path()];

        for source_dir in sources {
            if absolute(source_dir).starts_with(&output) {
                return Err(BuildError::OutputContainsSources {
                    output: self.config.output_dir.clone(),
                    source_dir: source_dir.to_path_buf(),
                });
            }
        }
        Ok(())
    }
}

/// File a route is written to under `root`.
///
/// Routes without an extension in their last segment become directories
/// holding an `index.html`.
///
/// ```
/// use std::path::Path;
/// use gpuway_build::output_path;
///
/// let root = Path::new("public");
/// assert_eq!(output_path(root, "/"), Path::new("public/index.html"));
/// assert_eq!(
///     output_path(root, "/tutorials/sdl-gpu"),
///     Path::new("public/tutorials/sdl-gpu/index.html")
/// );
/// assert_eq!(output_path(root, "/feed.xml"), Path::new("public/feed.xml"));
/// ```
#[must_use]
pub fn output_path(root: &Path, route: &str) -> PathBuf {
    root.join(output_file(route))
}

fn reset_dir(dir: &Path) -> Result<(), BuildError> {
    if dir.exists() {
        fs::remove_dir_all(dir).map_err(|source| BuildError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }
    fs::create_dir_all(dir).map_err(|source| BuildError::Io {
        path: dir.to_path_buf(),
        source,
    })
}

fn write_page(path: &Path, html: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| BuildError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::write(path, html).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Canonical path if it exists, otherwise joined onto the current directory.
fn absolute(path: &Path) -> PathBuf {
    fs::canonicalize(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}
