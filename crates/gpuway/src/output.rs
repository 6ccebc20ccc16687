//! Terminal reporting for the serve and build modes.

use std::fmt::Display;
use std::path::Path;

use console::{Term, style};

/// Writes user-facing status lines to stderr.
pub(crate) struct Output {
    term: Term,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
        }
    }

    /// `label: value` with a dimmed label.
    pub(crate) fn field(&self, label: &str, value: impl Display) {
        self.line(format_args!("{} {value}", style(format!("{label}:")).dim()));
    }

    /// One file written by the build.
    pub(crate) fn generated(&self, path: &Path) {
        self.line(format_args!("  {} {}", style("+").green(), path.display()));
    }

    pub(crate) fn success(&self, msg: &str) {
        self.line(style(msg).green().bold());
    }

    pub(crate) fn warning(&self, msg: &str) {
        self.line(format_args!("{} {msg}", style("warning:").yellow().bold()));
    }

    /// Whole line in red.
    pub(crate) fn error(&self, err: &dyn Display) {
        self.line(style(format!("error: {err}")).red());
    }

    // Terminal write failures are not worth failing the command over.
    fn line(&self, msg: impl Display) {
        let _ = self.term.write_line(&msg.to_string());
    }
}
