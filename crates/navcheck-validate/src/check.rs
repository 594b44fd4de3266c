//! End-to-end check of a configuration document.
//!
//! Shapes the document into a [`SiteConfig`], validates it, and merges the
//! shaping findings with the validator findings. The merged list follows the
//! validator's pass order and, within a pass, the order of the nodes in the
//! document.

use std::path::Path;

use navcheck_site::{Finding, Location, SiteConfig, SiteDocument, StructuralError};
use serde_json::Value;

use crate::validator::{Accepted, Validator};

/// Result of checking one configuration document.
#[derive(Debug)]
pub enum CheckOutcome {
    /// No findings.
    Accepted(Accepted),
    /// At least one finding, in report order.
    Rejected(Vec<Finding>),
    /// The document is not a site configuration at all.
    Malformed(StructuralError),
}

impl CheckOutcome {
    /// Findings of a rejected document, empty otherwise.
    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        match self {
            Self::Rejected(findings) => findings,
            Self::Accepted(_) | Self::Malformed(_) => &[],
        }
    }
}

/// Check a parsed document tree.
#[must_use]
pub fn check(document: &Value, validator: &Validator) -> CheckOutcome {
    let shaped = match SiteConfig::from_document(document) {
        Ok(shaped) => shaped,
        Err(err) => return CheckOutcome::Malformed(err),
    };

    let config = shaped.config;
    let mut findings = shaped.findings;

    match validator.validate(&config) {
        Ok(accepted) if findings.is_empty() => return CheckOutcome::Accepted(accepted),
        Ok(_) => {}
        Err(more) => {
            // A wrong-typed value was replaced by an empty default, which the
            // validator reports again as missing. Keep the shaping finding.
            let shaped_count = findings.len();
            for finding in more {
                let already = findings[..shaped_count]
                    .iter()
                    .any(|f| f.location == finding.location && f.kind == finding.kind);
                if !already {
                    findings.push(finding);
                }
            }
        }
    }

    // Stable: ties keep shaping findings ahead of validator findings.
    findings.sort_by_cached_key(|f| {
        (
            pass_rank(&f.location, &config),
            f.location.position(document),
        )
    });
    CheckOutcome::Rejected(findings)
}

/// Index of the validator pass that owns `location`.
fn pass_rank(location: &Location, config: &SiteConfig) -> u8 {
    if location.starts_with(&config.sidebar_location()) {
        2
    } else if location.starts_with(&config.navbar_location()) {
        3
    } else {
        match location.top_key() {
            Some("head") => 1,
            Some("theme") => 4,
            _ => 0,
        }
    }
}

/// Load and check a configuration file.
#[must_use]
pub fn check_file(path: &Path, validator: &Validator) -> CheckOutcome {
    match SiteDocument::load(path) {
        Ok(document) => check(document.value(), validator),
        Err(err) => CheckOutcome::Malformed(err),
    }
}
