//! Template fragment resolution and composition.
//!
//! A page lists template fragments base layout first. Each fragment after the
//! first is registered as a child of the one before it, so blocks defined in
//! later fragments override the same blocks in earlier ones. Rendering the
//! last fragment renders the whole chain.
//!
//! Fragments are read from disk on every resolution. Edits to templates show
//! up on the next request without restarting the dev server.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use minijinja::{AutoEscape, Environment, Output, State, UndefinedBehavior, Value};

/// Error returned when fragments cannot be composed.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// Page has no fragments.
    #[error("Template fragment list is empty")]
    EmptyFragments,
    /// Fragment file does not exist.
    #[error("Template fragment not found: {fragment} ({})", .path.display())]
    FragmentNotFound {
        /// Fragment as listed by the page.
        fragment: String,
        /// Path it was looked up at.
        path: PathBuf,
    },
    /// Same fragment listed twice.
    #[error("Template fragment listed more than once: {0}")]
    DuplicateFragment(String),
    /// Fragment could not be read.
    #[error("Failed to read template fragment {}: {source}", .path.display())]
    Io {
        /// Path of the fragment.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Fragment is not a valid template.
    #[error("Syntax error in template fragment {fragment}: {source}")]
    Syntax {
        /// Fragment as listed by the page.
        fragment: String,
        /// Parser error.
        #[source]
        source: minijinja::Error,
    },
}

/// A page's fragments composed into one renderable unit.
pub struct ComposedTemplate {
    name: String,
    entry: String,
    env: Environment<'static>,
}

impl ComposedTemplate {
    /// Identity of the composed template: base name of the first fragment.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Render against any serializable context.
    pub(crate) fn render<S: serde::Serialize>(&self, ctx: S) -> Result<String, minijinja::Error> {
        self.env.get_template(&self.entry)?.render(ctx)
    }
}

impl std::fmt::Debug for ComposedTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComposedTemplate")
            .field("name", &self.name)
            .field("entry", &self.entry)
            .finish_non_exhaustive()
    }
}

/// Loads and composes template fragments from a templates root.
#[derive(Clone, Debug)]
pub struct TemplateResolver {
    root: PathBuf,
}

impl TemplateResolver {
    /// Create a resolver for fragments under `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Templates root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Compose `fragments` into a single template.
    ///
    /// # Errors
    ///
    /// Fails if the list is empty or repeats a fragment, a fragment is
    /// missing or unreadable, or a fragment does not parse.
    pub fn resolve(&self, fragments: &[String]) -> Result<ComposedTemplate, ResolveError> {
        let first = fragments.first().ok_or(ResolveError::EmptyFragments)?;
        let name = base_name(first);

        let mut env = self.environment();
        let mut seen = HashSet::with_capacity(fragments.len());
        let mut parent: Option<String> = None;

        for fragment in fragments {
            let key = fragment_key(fragment).to_owned();
            if !seen.insert(key.clone()) {
                return Err(ResolveError::DuplicateFragment(fragment.clone()));
            }

            let source = self.read_fragment(fragment, &key)?;
            // Kept on the first line so error line numbers match the file.
            let source = match &parent {
                Some(parent) => format!("{{% extends {parent:?} %}}{source}"),
                None => source,
            };

            env.add_template_owned(key.clone(), source)
                .map_err(|source| ResolveError::Syntax {
                    fragment: fragment.clone(),
                    source,
                })?;
            parent = Some(key);
        }

        let entry = parent.unwrap_or_default();
        tracing::trace!(template = %name, entry = %entry, "Composed template");
        Ok(ComposedTemplate { name, entry, env })
    }

    fn environment(&self) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_formatter(html_formatter);
        // Lets fragments `{% include %}` other files from the same root.
        env.set_loader(minijinja::path_loader(&self.root));
        env.add_function("has_prefix", has_prefix);
        env.add_function("eq", eq);
        env
    }

    fn read_fragment(&self, fragment: &str, key: &str) -> Result<String, ResolveError> {
        let path = self.root.join(key);
        std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ResolveError::FragmentNotFound {
                    fragment: fragment.to_owned(),
                    path,
                }
            } else {
                ResolveError::Io { path, source }
            }
        })
    }
}

/// Template helper: whether `s` starts with `prefix`.
fn has_prefix(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

/// Template helper: string equality.
fn eq(a: &str, b: &str) -> bool {
    a == b
}

/// Output formatter for auto-escaped templates.
///
/// Strings are escaped with [`escape`], which leaves `/` intact so paths
/// print as written. Everything else uses minijinja's default.
fn html_formatter(
    out: &mut Output<'_>,
    state: &State<'_, '_>,
    value: &Value,
) -> Result<(), minijinja::Error> {
    if matches!(state.auto_escape(), AutoEscape::Html)
        && !value.is_safe()
        && let Some(s) = value.as_str()
    {
        return out.write_str(&escape(s)).map_err(|_| {
            minijinja::Error::new(minijinja::ErrorKind::WriteFailure, "failed to write output")
        });
    }
    minijinja::escape_formatter(out, state, value)
}

/// Escape HTML special characters.
fn escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

/// Fragments may be listed with a leading slash; they are always relative to
/// the templates root.
pub(crate) fn fragment_key(fragment: &str) -> &str {
    fragment.trim_start_matches('/')
}

fn base_name(fragment: &str) -> String {
    Path::new(fragment)
        .file_name()
        .map_or_else(|| fragment.to_owned(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fragments(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn test_single_fragment() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", "<h1>{{ title }}</h1>");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver.resolve(&fragments(&["index.html"])).unwrap();

        assert_eq!(template.name(), "index.html");
        let html = template.render(minijinja::context! { title => "Home" }).unwrap();
        assert_eq!(html, "<h1>Home</h1>");
    }

    #[test]
    fn test_later_fragments_override_blocks() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "t/layout.html",
            "[{% block sidebar %}no sidebar{% endblock %}|{% block content %}empty{% endblock %}]",
        );
        write(dir.path(), "t/sidebar.html", "{% block sidebar %}nav{% endblock %}");
        write(dir.path(), "t/page.html", "{% block content %}body{% endblock %}");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver
            .resolve(&fragments(&["/t/layout.html", "/t/sidebar.html", "/t/page.html"]))
            .unwrap();

        assert_eq!(template.name(), "layout.html");
        assert_eq!(template.render(minijinja::context! {}).unwrap(), "[nav|body]");
    }

    #[test]
    fn test_last_definition_wins() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "{% block x %}a{% endblock %}");
        write(dir.path(), "b.html", "{% block x %}b{% endblock %}");
        write(dir.path(), "c.html", "{% block x %}c{% endblock %}");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver
            .resolve(&fragments(&["a.html", "b.html", "c.html"]))
            .unwrap();
        assert_eq!(template.render(minijinja::context! {}).unwrap(), "c");
    }

    #[test]
    fn test_child_can_extend_parent_block() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "{% block x %}base{% endblock %}");
        write(dir.path(), "b.html", "{% block x %}{{ super() }}+more{% endblock %}");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver.resolve(&fragments(&["a.html", "b.html"])).unwrap();
        assert_eq!(template.render(minijinja::context! {}).unwrap(), "base+more");
    }

    #[test]
    fn test_empty_fragments() {
        let resolver = TemplateResolver::new("/nonexistent");
        let err = resolver.resolve(&[]).unwrap_err();
        assert!(matches!(err, ResolveError::EmptyFragments));
    }

    #[test]
    fn test_missing_fragment() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "layout.html", "{% block content %}{% endblock %}");

        let resolver = TemplateResolver::new(dir.path());
        let err = resolver
            .resolve(&fragments(&["layout.html", "missing.html"]))
            .unwrap_err();

        match err {
            ResolveError::FragmentNotFound { fragment, path } => {
                assert_eq!(fragment, "missing.html");
                assert_eq!(path, dir.path().join("missing.html"));
            }
            other => panic!("expected FragmentNotFound, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.html", "{% block content %}unterminated");

        let resolver = TemplateResolver::new(dir.path());
        let err = resolver.resolve(&fragments(&["broken.html"])).unwrap_err();
        assert!(matches!(err, ResolveError::Syntax { .. }));
        assert!(err.to_string().contains("broken.html"));
    }

    #[test]
    fn test_duplicate_fragment() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "a.html", "a");

        let resolver = TemplateResolver::new(dir.path());
        let err = resolver
            .resolve(&fragments(&["a.html", "/a.html"]))
            .unwrap_err();
        assert!(matches!(err, ResolveError::DuplicateFragment(_)));
    }

    #[test]
    fn test_resolution_rereads_files() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", "one");
        let resolver = TemplateResolver::new(dir.path());
        let list = fragments(&["index.html"]);

        assert_eq!(resolver.resolve(&list).unwrap().render(minijinja::context! {}).unwrap(), "one");
        write(dir.path(), "index.html", "two");
        assert_eq!(resolver.resolve(&list).unwrap().render(minijinja::context! {}).unwrap(), "two");
    }

    #[test]
    fn test_helpers_available() {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "index.html",
            "{% if has_prefix(path, '/tutorials') %}T{% endif %}{% if eq(lang, 'Odin') %}O{% endif %}",
        );

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver.resolve(&fragments(&["index.html"])).unwrap();
        let html = template
            .render(minijinja::context! { path => "/tutorials/sdl-gpu", lang => "Odin" })
            .unwrap();
        assert_eq!(html, "TO");
    }

    #[test]
    fn test_include_from_root() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "partials/footer.html", "footer");
        write(dir.path(), "index.html", "main {% include 'partials/footer.html' %}");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver.resolve(&fragments(&["index.html"])).unwrap();
        assert_eq!(template.render(minijinja::context! {}).unwrap(), "main footer");
    }

    #[test]
    fn test_autoescape_keeps_slashes() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.html", "<a href=\"{{ path }}\">{{ label }}</a>");

        let resolver = TemplateResolver::new(dir.path());
        let template = resolver.resolve(&fragments(&["index.html"])).unwrap();
        let html = template
            .render(minijinja::context! { path => "/tutorials/sdl-gpu", label => "<C & Odin>" })
            .unwrap();
        assert_eq!(html, "<a href=\"/tutorials/sdl-gpu\">&lt;C &amp; Odin&gt;</a>");
    }

    #[test]
    fn test_escape_special_characters() {
        assert_eq!(escape("<script>"), "&lt;script&gt;");
        assert_eq!(escape("it's \"quoted\""), "it&#x27;s &quot;quoted&quot;");
        assert_eq!(escape("/a/b"), "/a/b");
    }

    #[test]
    fn test_base_name() {
        assert_eq!(base_name("/tutorials/sdl-gpu/template.html"), "template.html");
        assert_eq!(base_name("index.html"), "index.html");
    }
}
