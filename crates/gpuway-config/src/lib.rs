//! Configuration management for gpuway.
//!
//! Parses `gpuway.toml` with serde and discovers it in the current directory
//! or any parent. Every section is optional; a missing file yields defaults
//! rooted at the current working directory.
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and the `[site]` directories accept `${VAR}` and
//! `${VAR:-default}` references.

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Settings from the command line that take precedence over the file.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the build output directory.
    pub output_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "gpuway.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dev server configuration.
    pub server: ServerConfig,
    /// Site directories as written in TOML.
    site: SiteConfigRaw,

    /// Site directories resolved against the config directory.
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Path to the config file, if one was loaded.
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Dev server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    templates_dir: Option<String>,
    static_dir: Option<String>,
    output_dir: Option<String>,
}

/// Resolved site directories.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Root that template fragment paths are resolved against.
    pub templates_dir: PathBuf,
    /// Static assets served under `/static/` and mirrored on build.
    pub static_dir: PathBuf,
    /// Build mode output root. Cleared on every build.
    pub output_dir: PathBuf,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Explicit config file does not exist.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Unset environment variable during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config key, e.g. `server.host`.
        field: String,
        /// What went wrong.
        message: String,
    },
}

impl Config {
    /// Load configuration, then apply CLI settings on top.
    ///
    /// With `config_path` the file must exist; otherwise `gpuway.toml` is
    /// searched for upward from the current directory and defaults are used
    /// if none is found.
    ///
    /// # Errors
    ///
    /// Returns an error if the explicit path is missing, the file cannot be
    /// read or parsed, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
    }

    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        let mut config = Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig::default(),
            config_path: None,
        };
        config.resolve_paths(base);
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration");

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` naming the offending key.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::Validation(
                "server.host cannot be empty".to_owned(),
            ));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;

        let site = &mut self.site;
        for (value, field) in [
            (&mut site.templates_dir, "site.templates_dir"),
            (&mut site.static_dir, "site.static_dir"),
            (&mut site.output_dir, "site.output_dir"),
        ] {
            if let Some(raw) = value.take() {
                *value = Some(expand::expand_env(&raw, field)?);
            }
        }

        Ok(())
    }

    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            templates_dir: resolve(self.site.templates_dir.as_deref(), "templates"),
            static_dir: resolve(self.site.static_dir.as_deref(), "static"),
            output_dir: resolve(self.site.output_dir.as_deref(), "public"),
        };
    }
}
