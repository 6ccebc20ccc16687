//! Page registry and rendering for gpuway.
//!
//! This crate provides:
//! - [`Registry`]: the ordered, validated set of pages the site serves
//! - [`Variant`]: language track selection from route paths
//! - [`TemplateResolver`]: composition of a page's template fragments
//! - [`Site`]: the rendering entry point used by both the dev server and
//!   the static builder
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use gpuway_site::{Site, default_registry};
//!
//! let site = Site::new(default_registry()?, "templates");
//! let page = site.find("/tutorials/sdl-gpu").expect("registered");
//!
//! let mut out = Vec::new();
//! site.render(page, &page.route_path, &mut out)?;
//! # Ok(())
//! # }
//! ```

mod context;
mod page;
mod pages;
mod registry;
mod site;
mod template;
mod variant;

pub use context::{LanguageLink, RenderContext};
pub use page::{LanguageTrack, PageDescriptor, STATIC_SEGMENT, VariantPages, output_file};
pub use pages::{base_pages, default_registry, sdl_gpu_odin_pages};
pub use registry::{Registry, RegistryError};
pub use site::{RenderError, Site};
pub use template::{ComposedTemplate, ResolveError, TemplateResolver};
pub use variant::Variant;
