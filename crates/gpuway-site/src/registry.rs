//! Page registry.
//!
//! The registry is assembled once from a base page set and any number of
//! language tracks, then only read. Assembly validates every descriptor so
//! that both serving modes can rely on unique, well-formed routes.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use crate::page::{LanguageTrack, PageDescriptor, VariantPages, is_reserved};
use crate::template::fragment_key;

/// Error returned when registry assembly rejects a descriptor.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// Two descriptors share a route path.
    #[error("Duplicate route: {0}")]
    DuplicateRoute(String),
    /// Descriptor has no template fragments.
    #[error("Route {0} has no template fragments")]
    EmptyFragments(String),
    /// Descriptor lists the same fragment twice.
    #[error("Route {route} lists template fragment {fragment} more than once")]
    DuplicateFragment {
        /// Offending route.
        route: String,
        /// Repeated fragment.
        fragment: String,
    },
    /// Two routes would be written to the same file, or one route's file sits
    /// where another needs a directory.
    #[error("Route {route} conflicts with {other} at output path {}", .path.display())]
    OutputConflict {
        /// Route registered later.
        route: String,
        /// Route registered earlier.
        other: String,
        /// Contested path relative to the output root.
        path: PathBuf,
    },
    /// Route is not an absolute path or tries to leave the site root.
    #[error("Invalid route {route}: {reason}")]
    InvalidRoute {
        /// Offending route.
        route: String,
        /// Why it was rejected.
        reason: &'static str,
    },
    /// Page of a language track whose route does not select that track.
    #[error("Route {route} is registered in the {language} track but does not belong to it")]
    VariantMismatch {
        /// Offending route.
        route: String,
        /// Track it was registered in.
        language: String,
    },
}

/// Ordered, immutable collection of page descriptors.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    pages: Vec<PageDescriptor>,
    tracks: Vec<LanguageTrack>,
}

impl Registry {
    /// Merge base pages and language tracks into a registry.
    ///
    /// Order is preserved: base pages first, then each track in the order
    /// given.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] for duplicate routes, empty fragment lists,
    /// malformed routes, or track pages outside their track.
    pub fn merge(
        base: Vec<PageDescriptor>,
        variant_sets: Vec<VariantPages>,
    ) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        let mut pages = Vec::with_capacity(
            base.len() + variant_sets.iter().map(|set| set.pages.len()).sum::<usize>(),
        );
        let mut tracks = Vec::with_capacity(variant_sets.len());

        for page in base {
            validate(&page, &mut seen)?;
            pages.push(page);
        }

        for set in variant_sets {
            for page in set.pages {
                validate(&page, &mut seen)?;
                if page.variant() != set.track.variant {
                    return Err(RegistryError::VariantMismatch {
                        route: page.route_path,
                        language: set.track.language,
                    });
                }
                pages.push(page);
            }
            tracks.push(set.track);
        }

        check_outputs(&pages)?;

        tracing::debug!(pages = pages.len(), tracks = tracks.len(), "Assembled page registry");
        Ok(Self { pages, tracks })
    }

    /// Find the page registered for an exact route path.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&PageDescriptor> {
        self.pages.iter().find(|page| page.route_path == path)
    }

    /// All pages in registration order.
    #[must_use]
    pub fn pages(&self) -> &[PageDescriptor] {
        &self.pages
    }

    /// Language tracks in registration order.
    #[must_use]
    pub fn tracks(&self) -> &[LanguageTrack] {
        &self.tracks
    }

    /// Number of registered pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Whether the registry has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

fn validate(page: &PageDescriptor, seen: &mut HashSet<String>) -> Result<(), RegistryError> {
    let route = &page.route_path;

    if !route.starts_with('/') {
        return Err(RegistryError::InvalidRoute {
            route: route.clone(),
            reason: "must start with '/'",
        });
    }
    if route.split('/').any(|segment| segment == "..") {
        return Err(RegistryError::InvalidRoute {
            route: route.clone(),
            reason: "must not contain '..' segments",
        });
    }
    if is_reserved(&page.output_file()) {
        return Err(RegistryError::InvalidRoute {
            route: route.clone(),
            reason: "the /static prefix is reserved for assets",
        });
    }
    if page.template_fragments.is_empty() {
        return Err(RegistryError::EmptyFragments(route.clone()));
    }
    let mut fragments = HashSet::with_capacity(page.template_fragments.len());
    for fragment in &page.template_fragments {
        if !fragments.insert(fragment_key(fragment)) {
            return Err(RegistryError::DuplicateFragment {
                route: route.clone(),
                fragment: fragment.clone(),
            });
        }
    }
    if !seen.insert(route.clone()) {
        return Err(RegistryError::DuplicateRoute(route.clone()));
    }
    Ok(())
}

/// Every page must own its output file, and no output file may be needed as
/// a directory by another page.
fn check_outputs(pages: &[PageDescriptor]) -> Result<(), RegistryError> {
    let mut outputs: HashMap<PathBuf, &str> = HashMap::with_capacity(pages.len());
    for page in pages {
        let file = page.output_file();
        if let Some(other) = outputs.get(&file) {
            return Err(RegistryError::OutputConflict {
                route: page.route_path.clone(),
                other: (*other).to_owned(),
                path: file,
            });
        }
        outputs.insert(file, &page.route_path);
    }

    for page in pages {
        let file = page.output_file();
        for dir in file.ancestors().skip(1) {
            if let Some(other) = outputs.get(dir) {
                return Err(RegistryError::OutputConflict {
                    route: page.route_path.clone(),
                    other: (*other).to_owned(),
                    path: dir.to_path_buf(),
                });
            }
        }
    }
    Ok(())
}
