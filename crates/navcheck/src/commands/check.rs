//! `navcheck check` command implementation.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;
use navcheck_config::{CliSettings, Config};
use navcheck_site::Finding;
use navcheck_validate::{Accepted, CheckOutcome, FsContent, Validator, check_file};
use serde::Serialize;

use super::Format;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Site configuration file (overrides config; default: docs/.vuepress/config.json).
    path: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover navcheck.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fail with a non-zero exit code on any finding.
    #[arg(long)]
    strict: bool,

    /// Report findings as warnings and exit successfully.
    #[arg(long, conflicts_with = "strict")]
    lenient: bool,

    /// Docs directory to check sidebar routes against (overrides config).
    #[arg(long, env = "NAVCHECK_CONTENT_DIR")]
    content_dir: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, default_value_t)]
    format: Format,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// JSON report for `--format json`.
#[derive(Serialize)]
struct Report<'a> {
    status: &'static str,
    strict: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<Accepted>,
    findings: &'a [Finding],
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the site configuration is
    /// structurally malformed.
    pub(crate) fn execute(self) -> Result<ExitCode, CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            strict: self.resolve_strict(),
            site_config: self.path,
            content_dir: self.content_dir,
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        let strict = config.validate.strict;
        let site_path = &config.site_resolved.config;

        tracing::info!(path = %site_path.display(), strict, "Checking site configuration");

        let validator = validator_from_config(&config);
        let (summary, findings) = match check_file(site_path, &validator) {
            CheckOutcome::Accepted(summary) => (Some(summary), Vec::new()),
            CheckOutcome::Rejected(findings) => (None, findings),
            CheckOutcome::Malformed(err) => return Err(err.into()),
        };

        match self.format {
            Format::Json => {
                let report = Report {
                    status: if findings.is_empty() { "accepted" } else { "rejected" },
                    strict,
                    summary,
                    findings: &findings,
                };
                output.data(&serde_json::to_string_pretty(&report)?);
            }
            Format::Text => {
                output.highlight(&format!("Checked {}", site_path.display()));
                for finding in &findings {
                    if strict {
                        output.error(&finding.to_string());
                    } else {
                        output.warning(&finding.to_string());
                    }
                }
                match summary {
                    Some(summary) => output.success(&format!(
                        "OK: {} sections, {} routes, {} navbar entries",
                        summary.sections, summary.routes, summary.navbar_entries
                    )),
                    None => output.info(&format!("{} finding(s)", findings.len())),
                }
            }
        }

        if strict && !findings.is_empty() {
            Ok(ExitCode::FAILURE)
        } else {
            Ok(ExitCode::SUCCESS)
        }
    }

    /// Resolve strict mode from --strict/--lenient flags.
    fn resolve_strict(&self) -> Option<bool> {
        self.lenient
            .then_some(false)
            .or(self.strict.then_some(true))
    }
}

/// Build a validator from the loaded configuration.
fn validator_from_config(config: &Config) -> Validator {
    let mut validator = Validator::new();
    if let Some(tags) = &config.validate.allowed_head_tags {
        validator = validator.with_allowed_head_tags(tags);
    }
    match &config.content_resolved.dir {
        Some(dir) => validator.with_content(FsContent::new(dir.clone())),
        None => validator,
    }
}
