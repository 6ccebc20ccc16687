//! gpuway CLI - SDL GPU Way site renderer.
//!
//! Runs in one of two modes:
//! - default: development server rendering pages on every request
//! - `--build`: render every page once into the output directory

mod commands;
mod error;
mod output;

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::{BuildCommand, ServeCommand};
use error::CliError;
use gpuway_config::{CliSettings, Config};
use output::Output;

/// gpuway - render the SDL GPU Way site.
#[derive(Parser)]
#[command(name = "gpuway", version, about)]
struct Cli {
    /// Generate the static site instead of starting the dev server.
    #[arg(long)]
    build: bool,

    /// Path to configuration file (default: auto-discover gpuway.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long, env = "GPUWAY_HOST")]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long, env = "GPUWAY_PORT")]
    port: Option<u16>,

    /// Output directory for --build (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Enable verbose output (log every generated page and request).
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            host: self.host.clone(),
            port: self.port,
            output_dir: self.output_dir.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }
}

fn main() {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let result = run(&cli);

    if let Err(err) = result {
        output.error(&err);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let config = cli.load_config()?;

    if cli.build {
        return BuildCommand::new(config).execute();
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(ServeCommand::new(config).execute())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_mode_is_serve() {
        let cli = Cli::try_parse_from(["gpuway"]).unwrap();
        assert!(!cli.build);
        assert!(cli.config.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_build_flag_with_overrides() {
        let cli = Cli::try_parse_from([
            "gpuway",
            "--build",
            "-c",
            "site/gpuway.toml",
            "-o",
            "dist",
            "-v",
        ])
        .unwrap();

        assert!(cli.build);
        assert_eq!(cli.config, Some(PathBuf::from("site/gpuway.toml")));
        assert_eq!(cli.output_dir, Some(PathBuf::from("dist")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_server_overrides() {
        let cli = Cli::try_parse_from(["gpuway", "--host", "0.0.0.0", "-p", "9000"]).unwrap();

        assert_eq!(cli.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli.port, Some(9000));
        assert_eq!(cli.output_dir, None);
    }

    #[test]
    fn test_rejects_invalid_port() {
        assert!(Cli::try_parse_from(["gpuway", "--port", "http"]).is_err());
    }
}
