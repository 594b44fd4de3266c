//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod diff;
pub(crate) mod theme;

pub(crate) use check::CheckArgs;
pub(crate) use diff::DiffArgs;
pub(crate) use theme::ThemeArgs;

use clap::ValueEnum;

/// Output format for command results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum Format {
    /// Colored human-readable text on stderr.
    #[default]
    Text,
    /// JSON on stdout.
    Json,
}
