//! `navcheck diff` command implementation.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Args;
use navcheck_site::{SiteConfig, SiteDocument};
use navcheck_validate::{ChangeKind, diff_routes};

use super::Format;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the diff command.
#[derive(Args)]
pub(crate) struct DiffArgs {
    /// Older site configuration.
    old: PathBuf,

    /// Newer site configuration.
    new: PathBuf,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: Format,
}

impl DiffArgs {
    /// Execute the diff command.
    ///
    /// # Errors
    ///
    /// Returns an error if either file cannot be loaded.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let output = Output::new();

        let old = load_site(&self.old)?;
        let new = load_site(&self.new)?;
        let changes = diff_routes(&old, &new);

        match self.format {
            Format::Json => output.data(&serde_json::to_string_pretty(&changes)?),
            Format::Text if changes.is_empty() => output.info("No route changes"),
            Format::Text => {
                for change in &changes {
                    match change.change {
                        ChangeKind::Added => output.success(&change.to_string()),
                        ChangeKind::Removed => output.error(&change.to_string()),
                    }
                }
            }
        }

        Ok(ExitCode::SUCCESS)
    }
}

/// Load a site configuration, ignoring shape findings.
fn load_site(path: &Path) -> Result<SiteConfig, CliError> {
    let document = SiteDocument::load(path)?;
    let shaped = SiteConfig::from_document(document.value())?;
    if !shaped.findings.is_empty() {
        tracing::warn!(
            path = %path.display(),
            findings = shaped.findings.len(),
            "Configuration has shape problems; run `navcheck check` for details"
        );
    }
    Ok(shaped.config)
}
