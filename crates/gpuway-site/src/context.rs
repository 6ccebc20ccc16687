//! Data bound to a template during one render.

use serde::Serialize;

use crate::page::{LanguageTrack, PageDescriptor};
use crate::registry::Registry;
use crate::variant::Variant;

/// Render context for a single page render.
///
/// Serialized field names are the names templates see: `page`,
/// `current_page`, `title`, `description`, `chosen_language` and
/// `languages`.
#[derive(Debug, Serialize)]
pub struct RenderContext<'a> {
    /// The full page descriptor.
    pub page: &'a PageDescriptor,
    /// Path the page was requested under.
    pub current_page: &'a str,
    /// Page title.
    pub title: &'a str,
    /// Page description.
    pub description: &'a str,
    /// Language track selected by the requested path.
    pub chosen_language: Variant,
    /// Every registered language track, in registration order.
    pub languages: Vec<LanguageLink<'a>>,
}

/// A language track as templates see it.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct LanguageLink<'a> {
    /// Display name, e.g. `Odin`.
    pub language: &'a str,
    /// Logo URL.
    pub logo_path: &'a str,
    /// Logo alt text.
    pub logo_alt: &'a str,
    /// Tutorial id.
    pub tutorial: &'a str,
    /// Prefix of every route in the track.
    pub route_prefix: String,
    /// First registered page of the track. `None` for a track with no pages.
    pub start_page: Option<&'a str>,
    /// Whether the requested path is inside this track.
    pub active: bool,
}

impl<'a> LanguageLink<'a> {
    fn new(track: &'a LanguageTrack, registry: &'a Registry, requested_path: &str) -> Self {
        let route_prefix = track.route_prefix();
        let start_page = registry
            .pages()
            .iter()
            .find(|page| page.route_path.starts_with(&route_prefix))
            .map(|page| page.route_path.as_str());

        Self {
            language: &track.language,
            logo_path: &track.logo_path,
            logo_alt: &track.logo_alt,
            tutorial: &track.tutorial,
            active: track.variant != Variant::None
                && Variant::from_route(requested_path) == track.variant,
            route_prefix,
            start_page,
        }
    }
}

impl<'a> RenderContext<'a> {
    /// Build the context for `page` of `registry` requested at
    /// `requested_path`.
    #[must_use]
    pub fn new(page: &'a PageDescriptor, requested_path: &'a str, registry: &'a Registry) -> Self {
        Self {
            page,
            current_page: requested_path,
            title: &page.title,
            description: &page.description,
            chosen_language: Variant::from_route(requested_path),
            languages: registry
                .tracks()
                .iter()
                .map(|track| LanguageLink::new(track, registry, requested_path))
                .collect(),
        }
    }
}
