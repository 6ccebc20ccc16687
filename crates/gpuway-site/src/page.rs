//! Page descriptors.

use std::path::{Component, Path, PathBuf};

use serde::Serialize;

use crate::variant::Variant;

/// Static description of one route: metadata plus template composition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PageDescriptor {
    /// URL path, unique within a registry (e.g. `/tutorials/sdl-gpu`).
    pub route_path: String,
    /// Page title.
    pub title: String,
    /// Page description.
    pub description: String,
    /// Template paths relative to the templates root, base layout first.
    pub template_fragments: Vec<String>,
}

impl PageDescriptor {
    /// Create a page descriptor.
    pub fn new<I, S>(
        route_path: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        template_fragments: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            route_path: route_path.into(),
            title: title.into(),
            description: description.into(),
            template_fragments: template_fragments.into_iter().map(Into::into).collect(),
        }
    }

    /// Content track derived from the route path.
    #[must_use]
    pub fn variant(&self) -> Variant {
        Variant::from_route(&self.route_path)
    }

    /// File this page is written to, relative to the build output root.
    #[must_use]
    pub fn output_file(&self) -> PathBuf {
        output_file(&self.route_path)
    }
}

/// First route segment reserved for static assets, in both serving modes.
pub const STATIC_SEGMENT: &str = "static";

/// File a route is written to, relative to the build output root.
///
/// The leading `/` is stripped. Routes whose last segment has no extension
/// become directories holding an `index.html`, so `/guide`, `/guide/` and
/// `/guide/index.html` all map to `guide/index.html`.
#[must_use]
pub fn output_file(route: &str) -> PathBuf {
    let relative = route.trim_start_matches('/');
    let mut path = PathBuf::from(relative);
    if Path::new(relative).extension().is_none() {
        path.push("index.html");
    }
    path
}

/// Whether an output file lands in the static assets directory.
pub(crate) fn is_reserved(file: &Path) -> bool {
    file.components().next() == Some(Component::Normal(STATIC_SEGMENT.as_ref()))
}

/// A language track of a tutorial.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LanguageTrack {
    /// Variant the track's routes resolve to.
    pub variant: Variant,
    /// Display name of the language.
    pub language: String,
    /// Logo shown on the language tab.
    pub logo_path: String,
    /// Alt text for the logo.
    pub logo_alt: String,
    /// Tutorial the track belongs to.
    pub tutorial: String,
}

impl LanguageTrack {
    /// Prefix shared by every route of the track, e.g.
    /// `/tutorials/sdl-gpu/odin/`.
    #[must_use]
    pub fn route_prefix(&self) -> String {
        let marker = self.variant.marker().unwrap_or("/");
        format!("/tutorials/{}{marker}", self.tutorial)
    }
}

/// Pages contributed by one language track.
#[derive(Clone, Debug)]
pub struct VariantPages {
    /// Track metadata.
    pub track: LanguageTrack,
    /// Pages of the track, in navigation order.
    pub pages: Vec<PageDescriptor>,
}
