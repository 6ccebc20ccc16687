//! Static build mode.

use gpuway_build::{BuildConfig, StaticSiteBuilder};
use gpuway_config::Config;
use gpuway_site::{Site, default_registry};

use crate::error::CliError;
use crate::output::Output;

/// Render every page into the output directory.
pub(crate) struct BuildCommand {
    config: Config,
}

impl BuildCommand {
    pub(crate) fn new(config: Config) -> Self {
        Self { config }
    }

    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let resolved = &self.config.site_resolved;

        output.field("Templates", resolved.templates_dir.display());
        output.field("Output", resolved.output_dir.display());

        let site = Site::new(default_registry()?, resolved.templates_dir.clone());
        let builder = StaticSiteBuilder::new(site, BuildConfig::from_config(&self.config));
        let report = builder.build()?;

        for path in &report.pages {
            output.generated(path);
        }
        if !resolved.static_dir.is_dir() {
            output.warning(&format!(
                "Static directory {} not found, no assets copied",
                resolved.static_dir.display()
            ));
        }
        output.success(&format!(
            "Built {} pages and {} static files to {}",
            report.pages.len(),
            report.static_files,
            resolved.output_dir.display()
        ));
        Ok(())
    }
}
