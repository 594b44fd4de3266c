//! CLI error types.

use navcheck_config::ConfigError;
use navcheck_site::StructuralError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Structural(#[from] StructuralError),

    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
