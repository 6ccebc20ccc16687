//! Static site generation for gpuway.
//!
//! Renders every registered page once, with the same [`Site`] the dev server
//! uses, and writes the results under an output root:
//!
//! - `/` becomes `<output>/index.html`
//! - `/tutorials/sdl-gpu` becomes `<output>/tutorials/sdl-gpu/index.html`
//! - routes with an extension, e.g. `/feed.xml`, are written as-is
//!
//! The static assets directory is then mirrored into `<output>/static`.
//!
//! [`Site`]: gpuway_site::Site

mod builder;
mod copy;

pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder, output_path};
pub use copy::copy_tree;
