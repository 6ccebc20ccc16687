//! Dev server mode.

use gpuway_config::Config;
use gpuway_server::{run_server, server_config_from_config};
use gpuway_site::default_registry;

use crate::error::CliError;
use crate::output::Output;

/// Serve pages on demand until Ctrl-C.
pub(crate) struct ServeCommand {
    config: Config,
}

impl ServeCommand {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if the page set is invalid or the server fails to
    /// start.
    pub(crate) async fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let registry = default_registry()?;
        let site = &self.config.site_resolved;

        if self.config.config_path.is_none() {
            output.warning("No gpuway.toml found, using defaults");
        }
        output.field(
            "Listening",
            format_args!(
                "http://{}:{}",
                self.config.server.host, self.config.server.port
            ),
        );
        output.field("Templates", site.templates_dir.display());
        output.field("Static", site.static_dir.display());
        output.field("Pages", registry.len());

        let server_config = server_config_from_config(&self.config);
        run_server(server_config, registry)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
