//! Configuration management for navcheck.
//!
//! Parses `navcheck.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Path Expansion
//!
//! Path values support `~` and environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default
//!
//! Expanded fields:
//! - `site.config`
//! - `content.dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the site configuration file to validate.
    pub site_config: Option<PathBuf>,
    /// Override strict mode.
    pub strict: Option<bool>,
    /// Override the content directory used for route existence checks.
    pub content_dir: Option<PathBuf>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "navcheck.toml";

/// Site configuration checked when nothing else is given.
const DEFAULT_SITE_CONFIG: &str = "docs/.vuepress/config.json";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site section (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Validation rules.
    pub validate: ValidateConfig,
    /// Content section (optional directory).
    content: ContentConfigRaw,

    /// Resolved site settings (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteSettings,
    /// Resolved content settings (set after loading).
    #[serde(skip)]
    pub content_resolved: ContentSettings,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw site section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    config: Option<String>,
}

/// Resolved site settings with absolute paths.
#[derive(Debug, Default)]
pub struct SiteSettings {
    /// Site configuration file to validate.
    pub config: PathBuf,
}

/// Validation rules.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidateConfig {
    /// Treat any finding as a failure.
    pub strict: bool,
    /// Tag names allowed in `head` entries. `None` keeps the validator's
    /// built-in list.
    pub allowed_head_tags: Option<Vec<String>>,
}

/// Raw content section as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ContentConfigRaw {
    dir: Option<String>,
}

/// Resolved content settings.
#[derive(Debug, Default)]
pub struct ContentSettings {
    /// Markdown content root. When `None`, route existence is not checked.
    pub dir: Option<PathBuf>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
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
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`content.dir`").
        field: String,
        /// Error message (e.g., "${`DOCS_ROOT`} not set").
        message: String,
    },
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `navcheck.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(site_config) = &settings.site_config {
            self.site_resolved.config.clone_from(site_config);
        }
        if let Some(strict) = settings.strict {
            self.validate.strict = strict;
        }
        if let Some(content_dir) = &settings.content_dir {
            self.content_resolved.dir = Some(content_dir.clone());
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            validate: ValidateConfig::default(),
            content: ContentConfigRaw::default(),
            site_resolved: SiteSettings {
                config: base.join(DEFAULT_SITE_CONFIG),
            },
            content_resolved: ContentSettings::default(),
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the head tag allow-list is empty
    /// or contains names that are not lowercase ASCII.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Some(tags) = &self.validate.allowed_head_tags else {
            return Ok(());
        };
        if tags.is_empty() {
            return Err(ConfigError::Validation(
                "validate.allowed_head_tags cannot be empty".to_owned(),
            ));
        }
        if let Some(bad) = tags
            .iter()
            .find(|t| t.is_empty() || !t.bytes().all(|b| b.is_ascii_lowercase() || b == b'-'))
        {
            return Err(ConfigError::Validation(format!(
                "validate.allowed_head_tags contains invalid tag name {bad:?}"
            )));
        }
        Ok(())
    }

    /// Expand and resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let site_config = match &self.site.config {
            Some(raw) => expand::expand_path(raw, "site.config")?,
            None => DEFAULT_SITE_CONFIG.to_owned(),
        };
        self.site_resolved = SiteSettings {
            config: config_dir.join(site_config),
        };

        let content_dir = match &self.content.dir {
            Some(raw) => Some(config_dir.join(expand::expand_path(raw, "content.dir")?)),
            None => None,
        };
        self.content_resolved = ContentSettings { dir: content_dir };

        Ok(())
    }
}

/// Search for the config file in `start` and its parents.
fn discover_config(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
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
