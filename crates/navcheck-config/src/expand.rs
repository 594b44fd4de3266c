//! Path expansion for configuration strings.
//!
//! Supports:
//! - `~` and `~/...` - expands to the home directory
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand home directory and environment variable references in a path string.
///
/// Returns the original string unchanged if it contains neither `~` nor `$`.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<String, ConfigError> {
    // Fast path: no expansion needed
    if !value.contains('$') && !value.starts_with('~') {
        return Ok(value.to_owned());
    }

    shellexpand::full(value)
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", e.var_name),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_braced_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("NAVCHECK_TEST_DOCS_ROOT", "/srv/kb");
        }
        let result = expand_path("${NAVCHECK_TEST_DOCS_ROOT}/docs", "content.dir").unwrap();
        assert_eq!(result, "/srv/kb/docs");
        unsafe {
            std::env::remove_var("NAVCHECK_TEST_DOCS_ROOT");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVCHECK_TEST_UNSET_ROOT");
        }
        let result = expand_path("${NAVCHECK_TEST_UNSET_ROOT:-docs}", "content.dir").unwrap();
        assert_eq!(result, "docs");
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("NAVCHECK_TEST_MISSING_ROOT");
        }
        let err = expand_path("${NAVCHECK_TEST_MISSING_ROOT}/docs", "content.dir").unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NAVCHECK_TEST_MISSING_ROOT"));
        assert!(err.to_string().contains("content.dir"));
    }

    #[test]
    fn test_expand_literal_unchanged() {
        let result = expand_path("docs/.vuepress/config.json", "site.config").unwrap();
        assert_eq!(result, "docs/.vuepress/config.json");
    }
}
