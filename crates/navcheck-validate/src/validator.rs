//! Single-pass consistency checks over a [`SiteConfig`].
//!
//! Passes run in a fixed order and each reports findings in the order its
//! nodes appear in the configuration:
//!
//! 1. site fields (`title`, `base`)
//! 2. `head` entries
//! 3. sidebar sections, groups and routes (collects the known section keys)
//! 4. navbar entries, recursing into dropdowns
//! 5. theme
//!
//! The validator only reads its input and keeps no state between calls.

use std::collections::HashSet;

use navcheck_site::route;
use navcheck_site::{
    Finding, FindingKind, Location, NavTarget, NavbarEntry, SidebarSection, SiteConfig,
};
use serde::Serialize;

use crate::content::ContentSource;

/// Head tags accepted by default.
pub const DEFAULT_HEAD_TAGS: [&str; 3] = ["link", "script", "meta"];

/// Summary of a configuration that passed validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Accepted {
    /// Number of sidebar sections.
    pub sections: usize,
    /// Number of sidebar routes.
    pub routes: usize,
    /// Number of navbar entries, dropdown children included.
    pub navbar_entries: usize,
}

/// Validate a configuration with the default rules.
///
/// # Errors
///
/// Returns every finding, in report order, if there is at least one.
pub fn validate(config: &SiteConfig) -> Result<Accepted, Vec<Finding>> {
    Validator::new().validate(config)
}

/// Configurable configuration validator.
///
/// # Example
///
/// ```ignore
/// use navcheck_validate::{FsContent, Validator};
///
/// let validator = Validator::new()
///     .with_allowed_head_tags(["link", "meta"])
///     .with_content(FsContent::new("docs".into()));
/// let accepted = validator.validate(&config)?;
/// ```
pub struct Validator {
    allowed_head_tags: Vec<String>,
    content: Option<Box<dyn ContentSource>>,
}

impl Default for Validator {
    fn default() -> Self {
        Self {
            allowed_head_tags: DEFAULT_HEAD_TAGS.iter().map(|&t| t.to_owned()).collect(),
            content: None,
        }
    }
}

impl std::fmt::Debug for Validator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Validator")
            .field("allowed_head_tags", &self.allowed_head_tags)
            .field("content", &self.content.is_some())
            .finish()
    }
}

impl Validator {
    /// Create a validator with the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the head tag allow-list. Names are compared case-insensitively.
    #[must_use]
    pub fn with_allowed_head_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.allowed_head_tags = tags
            .into_iter()
            .map(|t| t.as_ref().to_ascii_lowercase())
            .collect();
        self
    }

    /// Check that every sidebar route resolves to content.
    #[must_use]
    pub fn with_content(mut self, content: impl ContentSource + 'static) -> Self {
        self.content = Some(Box::new(content));
        self
    }

    /// Validate a configuration.
    ///
    /// # Errors
    ///
    /// Returns every finding, in report order, if there is at least one.
    pub fn validate(&self, config: &SiteConfig) -> Result<Accepted, Vec<Finding>> {
        let findings = self.findings(config);
        if findings.is_empty() {
            let accepted = Accepted {
                sections: config.sidebar.len(),
                routes: config.route_count(),
                navbar_entries: count_entries(&config.navbar),
            };
            tracing::debug!(?accepted, "Configuration accepted");
            Ok(accepted)
        } else {
            tracing::debug!(count = findings.len(), "Configuration rejected");
            Err(findings)
        }
    }

    /// Run every pass and collect findings in report order.
    #[must_use]
    pub fn findings(&self, config: &SiteConfig) -> Vec<Finding> {
        let mut pass = Pass {
            validator: self,
            findings: Vec::new(),
        };

        pass.site(config);
        pass.head(config);
        let known = pass.sidebar(config);
        pass.navbar(&config.navbar, &config.navbar_location(), &known);
        pass.theme(config);

        pass.findings
    }

    fn is_allowed_head_tag(&self, tag: &str) -> bool {
        self.allowed_head_tags
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(tag))
    }
}

struct Pass<'v> {
    validator: &'v Validator,
    findings: Vec<Finding>,
}

impl Pass<'_> {
    fn report(&mut self, kind: FindingKind, location: Location) {
        self.findings.push(Finding::new(kind, location));
    }

    fn missing(&mut self, field: &str, location: Location) {
        self.findings.push(Finding::missing(field, location));
    }

    fn site(&mut self, config: &SiteConfig) {
        let root = Location::root();
        if config.title.trim().is_empty() {
            self.missing("title", root.key("title"));
        }
        if !config.base.starts_with('/') || !config.base.ends_with('/') {
            self.report(
                FindingKind::InvalidBasePath {
                    base: config.base.clone(),
                },
                root.key("base"),
            );
        }
    }

    fn head(&mut self, config: &SiteConfig) {
        let at = Location::root().key("head");
        for (i, entry) in config.head.iter().enumerate() {
            let tag = entry.tag.trim();
            if tag.is_empty() {
                self.missing("tag", at.index(i));
            } else if !self.validator.is_allowed_head_tag(tag) {
                self.report(
                    FindingKind::DisallowedHeadTag {
                        tag: entry.tag.clone(),
                    },
                    at.index(i),
                );
            }
        }
    }

    /// Check sections depth-first and return the normalized section keys.
    fn sidebar(&mut self, config: &SiteConfig) -> HashSet<String> {
        let at = config.sidebar_location();
        let mut known = HashSet::with_capacity(config.sidebar.len());

        for section in &config.sidebar {
            known.insert(route::normalize(&section.key));
            self.section(section, &at.key(section.key.clone()));
        }

        tracing::debug!(sections = known.len(), "Sidebar checked");
        known
    }

    fn section(&mut self, section: &SidebarSection, at: &Location) {
        let content = self.validator.content.as_deref();
        let mut seen = HashSet::new();

        for (gi, group) in section.groups.iter().enumerate() {
            let group_at = at.index(gi);
            if group.title.trim().is_empty() {
                self.missing("text", group_at.clone());
            }

            let children_at = group_at.key("children");
            for (ri, sidebar_route) in group.routes.iter().enumerate() {
                let route_at = children_at.index(ri);
                if sidebar_route.path.trim().is_empty() {
                    self.missing("link", route_at);
                    continue;
                }

                let resolved = route::resolve(&section.key, &sidebar_route.path);
                if !seen.insert(resolved.clone()) {
                    self.report(
                        FindingKind::DuplicateRoute {
                            section: section.key.clone(),
                            path: sidebar_route.path.clone(),
                        },
                        route_at,
                    );
                    continue;
                }

                if let Some(content) = content
                    && !content.contains(&resolved)
                {
                    self.report(
                        FindingKind::ContentNotFound {
                            section: section.key.clone(),
                            path: sidebar_route.path.clone(),
                        },
                        route_at,
                    );
                }
            }
        }
    }

    fn navbar(&mut self, entries: &[NavbarEntry], at: &Location, known: &HashSet<String>) {
        for (i, entry) in entries.iter().enumerate() {
            let entry_at = at.index(i);
            if entry.text.trim().is_empty() {
                self.missing("text", entry_at.clone());
            }

            match &entry.target {
                Some(NavTarget::Internal(target)) => {
                    if !known.contains(&route::normalize(target)) {
                        self.report(
                            FindingKind::UnresolvedNavTarget {
                                text: entry.text.clone(),
                                target: target.clone(),
                            },
                            entry_at.clone(),
                        );
                    }
                }
                Some(NavTarget::External(url)) => {
                    if !is_absolute_url(url) {
                        self.report(
                            FindingKind::MalformedExternalUrl {
                                text: entry.text.clone(),
                                url: url.clone(),
                            },
                            entry_at.clone(),
                        );
                    }
                }
                None if entry.children.is_empty() => self.missing("link", entry_at.clone()),
                None => {}
            }

            if !entry.children.is_empty() {
                self.navbar(&entry.children, &entry_at.key("children"), known);
            }
        }
    }

    fn theme(&mut self, config: &SiteConfig) {
        let Some(theme) = &config.theme else {
            return;
        };
        let at = Location::root().key("theme");
        if theme.extends.trim().is_empty() && !theme.is_external() {
            self.missing("extends", at.clone());
        }
        let layouts_at = at.key("layouts");
        for (slot, component) in &theme.layouts {
            if component.trim().is_empty() {
                self.missing(slot.as_str(), layouts_at.key(slot.as_str()));
            }
        }
    }
}

/// Conservative absolute URL check: must parse and carry a host.
fn is_absolute_url(raw: &str) -> bool {
    url::Url::parse(raw).is_ok_and(|url| url.host_str().is_some_and(|host| !host.is_empty()))
}

fn count_entries(entries: &[NavbarEntry]) -> usize {
    entries
        .iter()
        .map(|entry| 1 + count_entries(&entry.children))
        .sum()
}
