//! Built-in pages of the SDL GPU Way site.

use crate::page::{LanguageTrack, PageDescriptor, VariantPages};
use crate::registry::{Registry, RegistryError};
use crate::variant::Variant;

const TUTORIAL_LAYOUT: &str = "/tutorials/sdl-gpu/template.html";
const TUTORIAL_SIDEBAR: &str = "/tutorials/sdl-gpu/sidebar.html";

/// Pages that belong to no language track.
#[must_use]
pub fn base_pages() -> Vec<PageDescriptor> {
    let get_started = [
        TUTORIAL_LAYOUT,
        TUTORIAL_SIDEBAR,
        "/tutorials/sdl-gpu/get-started.html",
    ];

    vec![
        PageDescriptor::new("/", "Learn SDL GPU", "Bla bla", ["index.html"]),
        PageDescriptor::new(
            "/tutorials/sdl-gpu",
            "SDL GPU: Get Started",
            "Get started!",
            get_started,
        ),
        PageDescriptor::new(
            "/tutorials/sdl-gpu/get-started",
            "SDL GPU: Get Started",
            "Get started!",
            get_started,
        ),
    ]
}

/// The Odin track of the SDL GPU tutorial.
#[must_use]
pub fn sdl_gpu_odin_pages() -> VariantPages {
    let tutorial_page = |route: &str, title: &str, description: &str, content: &str| {
        PageDescriptor::new(
            route,
            title,
            description,
            [TUTORIAL_LAYOUT, TUTORIAL_SIDEBAR, content],
        )
    };

    VariantPages {
        track: LanguageTrack {
            variant: Variant::Odin,
            language: "Odin".to_owned(),
            logo_path: "/static/images/odin-logo.svg".to_owned(),
            logo_alt: "Odin programming language logo".to_owned(),
            tutorial: "sdl-gpu".to_owned(),
        },
        pages: vec![
            tutorial_page(
                "/tutorials/sdl-gpu/odin/prerequisites",
                "SDL GPU Way: Prerequisites",
                "Get started!",
                "/tutorials/sdl-gpu/odin/prerequisites/prerequisites.html",
            ),
            tutorial_page(
                "/tutorials/sdl-gpu/odin/chapter-1-hello-gpu",
                "SDL GPU Way: Chapter 1: Hello GPU (Odin)",
                "This chapter introduces you to basic concepts of modern GPU API's.",
                "/tutorials/sdl-gpu/odin/chapter-1-hello-gpu/index.html",
            ),
            tutorial_page(
                "/tutorials/sdl-gpu/odin/chapter-1-hello-gpu/1-1-hello_sdl.html",
                "SDL GPU Way: 1:1 Hello SDL",
                "Open a window with SDL3.",
                "/tutorials/sdl-gpu/odin/chapter-1-hello-gpu/1-1-hello_sdl.html",
            ),
        ],
    }
}

/// Registry of every page the site serves.
///
/// # Errors
///
/// Returns [`RegistryError`] if the built-in pages violate a registry
/// invariant.
pub fn default_registry() -> Result<Registry, RegistryError> {
    Registry::merge(base_pages(), vec![sdl_gpu_odin_pages()])
}
