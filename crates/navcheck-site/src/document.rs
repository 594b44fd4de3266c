//! Loading configuration files into an ordered document tree.
//!
//! JSON, YAML and TOML files all end up as a [`serde_json::Value`] with key
//! order preserved, so findings come out in the order nodes were written.

use std::path::{Path, PathBuf};

use serde_json::Value;

/// Input is not a site configuration at all.
///
/// Fatal to a single check: without a document there is no tree to walk.
#[derive(Debug, thiserror::Error)]
pub enum StructuralError {
    /// File could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// File extension is not one of the supported formats.
    #[error("Unsupported configuration format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
    /// JSON syntax error.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML syntax error.
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// TOML syntax error.
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    /// Document root is not a mapping.
    #[error("Site configuration must be a mapping, found {0}")]
    NotAMapping(&'static str),
}

/// Supported configuration file formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
    Toml,
}

impl DocumentFormat {
    /// Detect the format from a file extension.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            "toml" => Some(Self::Toml),
            _ => None,
        }
    }
}

/// A parsed configuration document.
#[derive(Clone, Debug, PartialEq)]
pub struct SiteDocument {
    value: Value,
    path: Option<PathBuf>,
}

impl SiteDocument {
    /// Read and parse a configuration file, picking the format by extension.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] if the file cannot be read, has an unknown
    /// extension, or does not parse.
    pub fn load(path: &Path) -> Result<Self, StructuralError> {
        let format = DocumentFormat::from_path(path)
            .ok_or_else(|| StructuralError::UnsupportedFormat(path.to_path_buf()))?;
        let content = std::fs::read_to_string(path).map_err(|source| StructuralError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), ?format, "Loading site configuration");

        let mut document = Self::parse(&content, format)?;
        document.path = Some(path.to_path_buf());
        Ok(document)
    }

    /// Parse configuration text in the given format.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError`] on syntax errors.
    pub fn parse(content: &str, format: DocumentFormat) -> Result<Self, StructuralError> {
        let value: Value = match format {
            DocumentFormat::Json => serde_json::from_str(content)?,
            DocumentFormat::Yaml => {
                if content.trim().is_empty() {
                    Value::Null
                } else {
                    serde_yaml::from_str(content)?
                }
            }
            DocumentFormat::Toml => toml::from_str(content)?,
        };
        Ok(Self::from_value(value))
    }

    /// Wrap an already-built document tree.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        Self { value, path: None }
    }

    /// Document tree.
    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Source file, if loaded from disk.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

/// Human-readable name of a JSON value's type.
pub(crate) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a mapping",
    }
}
