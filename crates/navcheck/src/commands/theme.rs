//! `navcheck theme` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use navcheck_config::{CliSettings, Config};
use navcheck_site::{LayoutSource, SiteConfig, SiteDocument};

use super::Format;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the theme command.
#[derive(Args)]
pub(crate) struct ThemeArgs {
    /// Site configuration file (overrides config; default: docs/.vuepress/config.json).
    path: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navcheck.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

impl ThemeArgs {
    /// Execute the theme command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site configuration
    /// cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            site_config: self.path,
            ..Default::default()
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let document = SiteDocument::load(&config.site_resolved.config)?;
        let shaped = SiteConfig::from_document(document.value())?;

        for finding in shaped
            .findings
            .iter()
            .filter(|f| f.location.top_key() == Some("theme"))
        {
            output.warning(&finding.to_string());
        }

        let Some(theme) = shaped.config.theme else {
            match self.format {
                Format::Json => output.data("null"),
                Format::Text => output.info("No theme configured; generator defaults apply"),
            }
            return Ok(ExitCode::SUCCESS);
        };
        let resolved = theme.resolve();

        match self.format {
            Format::Json => output.data(&serde_json::to_string_pretty(&resolved)?),
            Format::Text if theme.is_external() => {
                let source = resolved.source.as_deref().unwrap_or_default();
                output.info(&format!(
                    "Theme is declared in {source}; its base and layouts are not in this file"
                ));
            }
            Format::Text => {
                let name = resolved.name.as_deref().unwrap_or("(unnamed)");
                output.highlight(&format!("Theme {name} extends {}", resolved.base));
                for (slot, source) in &resolved.slots {
                    match source {
                        LayoutSource::Override(component) => {
                            output.success(&format!("  {slot}: {component} (override)"));
                        }
                        LayoutSource::Inherited(base) => {
                            output.info(&format!("  {slot}: inherited from {base}"));
                        }
                    }
                }
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}
