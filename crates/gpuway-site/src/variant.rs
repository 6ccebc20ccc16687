//! Content track selection from route paths.
//!
//! A tutorial can exist in several languages. The track a page belongs to is
//! encoded in its route (`/tutorials/sdl-gpu/odin/...`) and is derived by an
//! ordered list of substring rules.

use serde::Serialize;

/// Content track a page belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
pub enum Variant {
    /// Not part of a language track.
    #[default]
    #[serde(rename = "")]
    None,
    /// Odin track.
    Odin,
    /// C track.
    C,
}

/// Marker rules in priority order. The first marker found wins.
const RULES: &[(&str, Variant)] = &[("/odin/", Variant::Odin), ("/c/", Variant::C)];

impl Variant {
    /// Derive the variant for a route path.
    ///
    /// Total over all strings: paths without a known marker are [`Variant::None`].
    #[must_use]
    pub fn from_route(path: &str) -> Self {
        RULES
            .iter()
            .find(|(marker, _)| path.contains(marker))
            .map_or(Self::None, |&(_, variant)| variant)
    }

    /// Value exposed to templates as `chosen_language`.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Odin => "Odin",
            Self::C => "C",
        }
    }

    /// Route marker that selects this variant, if any.
    #[must_use]
    pub fn marker(self) -> Option<&'static str> {
        RULES
            .iter()
            .find(|(_, variant)| *variant == self)
            .map(|(marker, _)| *marker)
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odin_route() {
        assert_eq!(
            Variant::from_route("/tutorials/sdl-gpu/odin/chapter-1"),
            Variant::Odin
        );
    }

    #[test]
    fn test_c_route() {
        assert_eq!(Variant::from_route("/tutorials/sdl-gpu/c/chapter-1"), Variant::C);
    }

    #[test]
    fn test_root_has_no_variant() {
        assert_eq!(Variant::from_route("/"), Variant::None);
        assert_eq!(Variant::from_route(""), Variant::None);
    }

    #[test]
    fn test_marker_needs_both_slashes() {
        // Track index pages without a trailing segment are not part of the track.
        assert_eq!(Variant::from_route("/tutorials/sdl-gpu/odin"), Variant::None);
        assert_eq!(Variant::from_route("/tutorials/cmake/"), Variant::None);
    }

    #[test]
    fn test_first_rule_wins() {
        assert_eq!(Variant::from_route("/c/odin/page"), Variant::Odin);
    }

    #[test]
    fn test_as_str() {
        assert_eq!(Variant::None.as_str(), "");
        assert_eq!(Variant::Odin.as_str(), "Odin");
        assert_eq!(Variant::C.to_string(), "C");
    }

    #[test]
    fn test_marker_round_trips_through_from_route() {
        for variant in [Variant::Odin, Variant::C] {
            let marker = variant.marker().unwrap();
            assert_eq!(Variant::from_route(&format!("/x{marker}y")), variant);
        }
        assert_eq!(Variant::None.marker(), None);
    }

    #[test]
    fn test_serializes_as_template_string() {
        assert_eq!(serde_json::to_string(&Variant::None).unwrap(), "\"\"");
        assert_eq!(serde_json::to_string(&Variant::Odin).unwrap(), "\"Odin\"");
    }
}
