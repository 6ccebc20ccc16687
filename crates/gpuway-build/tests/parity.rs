//! Dev server responses and built files must be byte-identical.

use std::fs;
use std::path::{Path, PathBuf};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use gpuway_build::{BuildConfig, StaticSiteBuilder, output_path};
use gpuway_site::{Site, default_registry};
use tower::ServiceExt;

fn workspace_dir(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../..").join(name)
}

async fn get(app: axum::Router, path: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::get(path).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, body.to_vec())
}

#[tokio::test]
async fn test_built_pages_match_dev_server() {
    let templates = workspace_dir("templates");
    let static_dir = workspace_dir("static");
    let out = tempfile::tempdir().unwrap();
    let output_dir = out.path().join("public");

    let site = Site::new(default_registry().unwrap(), &templates);
    let report = StaticSiteBuilder::new(
        site.clone(),
        BuildConfig {
            output_dir: output_dir.clone(),
            static_dir: static_dir.clone(),
        },
    )
    .build()
    .unwrap();

    assert_eq!(report.pages.len(), site.registry().len());

    let app = gpuway_server::router(site.clone(), &static_dir);
    for page in site.registry().pages() {
        let (status, body) = get(app.clone(), &page.route_path).await;
        assert_eq!(status, StatusCode::OK, "{}", page.route_path);
        assert!(!body.is_empty(), "{}", page.route_path);

        let built = fs::read(output_path(&output_dir, &page.route_path)).unwrap();
        assert_eq!(built, body, "{} differs between modes", page.route_path);
    }
}

#[tokio::test]
async fn test_built_static_assets_match_dev_server() {
    let templates = workspace_dir("templates");
    let static_dir = workspace_dir("static");
    let out = tempfile::tempdir().unwrap();
    let output_dir = out.path().join("public");

    let site = Site::new(default_registry().unwrap(), &templates);
    StaticSiteBuilder::new(
        site.clone(),
        BuildConfig {
            output_dir: output_dir.clone(),
            static_dir: static_dir.clone(),
        },
    )
    .build()
    .unwrap();

    let app = gpuway_server::router(site, &static_dir);
    let (status, body) = get(app, "/static/css/site.css").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fs::read(output_dir.join("static/css/site.css")).unwrap(), body);
}

#[tokio::test]
async fn test_variant_pages_carry_language() {
    let site = Site::new(default_registry().unwrap(), workspace_dir("templates"));
    let app = gpuway_server::router(site, &workspace_dir("static"));

    let (_, odin) = get(app.clone(), "/tutorials/sdl-gpu/odin/prerequisites").await;
    let (_, base) = get(app, "/tutorials/sdl-gpu/get-started").await;
    let odin = String::from_utf8(odin).unwrap();
    let base = String::from_utf8(base).unwrap();

    assert!(odin.contains(r#"<span class="language">Odin</span>"#));
    assert!(odin.contains(r#"alt="Odin programming language logo""#));
    assert!(!base.contains(r#"class="language""#));
}

#[tokio::test]
async fn test_home_links_every_language_track() {
    let registry = default_registry().unwrap();
    let tracks: Vec<_> = registry.tracks().to_vec();
    let site = Site::new(registry, workspace_dir("templates"));
    let app = gpuway_server::router(site, &workspace_dir("static"));

    let (status, home) = get(app, "/").await;
    let home = String::from_utf8(home).unwrap();

    assert_eq!(status, StatusCode::OK);
    for track in tracks {
        assert!(home.contains(&format!("Start the tutorial in {}", track.language)));
        assert!(home.contains(&format!(r#"src="{}""#, track.logo_path)));
    }
}

#[test]
fn test_every_page_owns_its_output_file() {
    let registry = default_registry().unwrap();
    let root = Path::new("public");
    let mut files: Vec<PathBuf> = registry
        .pages()
        .iter()
        .map(|page| output_path(root, &page.route_path))
        .collect();
    files.sort();
    files.dedup();

    assert_eq!(files.len(), registry.len());
}
