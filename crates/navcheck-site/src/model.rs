//! Site configuration data model.
//!
//! A [`SiteConfig`] is built once (from a file or in code), validated, and
//! then handed on read-only. Nothing in this module mutates it after
//! construction.

use serde::Serialize;

use crate::finding::Location;
use crate::theme::ThemeDescriptor;

/// Markdown renderer options, keyed by option name in declaration order.
pub type MarkdownOptions = serde_json::Map<String, serde_json::Value>;

/// Root declarative description of a documentation site.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Site description.
    pub description: String,
    /// Base path the site is served under.
    pub base: String,
    /// Tags injected into every page `<head>`, in order.
    pub head: Vec<HeadEntry>,
    /// Markdown renderer options.
    pub markdown: MarkdownOptions,
    /// Theme declaration. `None` means the generator default.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeDescriptor>,
    /// Top navigation bar.
    pub navbar: Vec<NavbarEntry>,
    /// Sidebar sections in declaration order.
    pub sidebar: Vec<SidebarSection>,
    /// Where `navbar` and `sidebar` live in the source document.
    #[serde(skip)]
    pub nav_root: NavRoot,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base: "/".to_owned(),
            head: Vec::new(),
            markdown: MarkdownOptions::new(),
            theme: None,
            navbar: Vec::new(),
            sidebar: Vec::new(),
            nav_root: NavRoot::default(),
        }
    }
}

impl SiteConfig {
    /// Location of the navbar list in the source document.
    #[must_use]
    pub fn navbar_location(&self) -> Location {
        self.nav_root.location().key("navbar")
    }

    /// Location of the sidebar mapping in the source document.
    #[must_use]
    pub fn sidebar_location(&self) -> Location {
        self.nav_root.location().key("sidebar")
    }

    /// Look up a sidebar section by its exact key.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&SidebarSection> {
        self.sidebar.iter().find(|s| s.key == key)
    }

    /// Total number of sidebar routes across all sections.
    #[must_use]
    pub fn route_count(&self) -> usize {
        self.sidebar
            .iter()
            .flat_map(|s| &s.groups)
            .map(|g| g.routes.len())
            .sum()
    }
}

/// Parent of the `navbar` and `sidebar` keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavRoot {
    /// Keys sit at the document root.
    #[default]
    TopLevel,
    /// Keys sit under `themeConfig`.
    ThemeConfig,
}

impl NavRoot {
    fn location(self) -> Location {
        match self {
            Self::TopLevel => Location::root(),
            Self::ThemeConfig => Location::root().key("themeConfig"),
        }
    }
}

/// A tag injected into the page head, e.g. `["link", { rel: "icon" }]`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct HeadEntry {
    /// Tag name.
    pub tag: String,
    /// Tag attributes in declaration order.
    pub attrs: serde_json::Map<String, serde_json::Value>,
}

impl HeadEntry {
    /// Create a head entry with no attributes.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: serde_json::Map::new(),
        }
    }

    /// Add an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs
            .insert(name.into(), serde_json::Value::String(value.into()));
        self
    }
}

/// Link target of a navbar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum NavTarget {
    /// Route inside the site (starts with `/`).
    Internal(String),
    /// Anything else, expected to be an absolute URL.
    External(String),
}

impl NavTarget {
    /// Classify a raw link string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with('/') && !raw.starts_with("//") {
            Self::Internal(raw.to_owned())
        } else {
            Self::External(raw.to_owned())
        }
    }

    /// The raw link string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Internal(s) | Self::External(s) => s,
        }
    }
}

/// Top-level navigation link, optionally with a dropdown.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct NavbarEntry {
    /// Display text.
    pub text: String,
    /// Link target. Dropdown parents usually have none.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<NavTarget>,
    /// Dropdown children.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavbarEntry>,
}

impl NavbarEntry {
    /// Create an entry linking to `target`.
    #[must_use]
    pub fn link(text: impl Into<String>, target: &str) -> Self {
        Self {
            text: text.into(),
            target: Some(NavTarget::parse(target)),
            children: Vec::new(),
        }
    }

    /// Create a dropdown entry with children and no target.
    #[must_use]
    pub fn dropdown(text: impl Into<String>, children: Vec<NavbarEntry>) -> Self {
        Self {
            text: text.into(),
            target: None,
            children,
        }
    }
}

/// Sidebar content for one route namespace, e.g. `/basement/`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SidebarSection {
    /// Route-namespace prefix.
    pub key: String,
    /// Groups in display order.
    pub groups: Vec<SidebarGroup>,
}

impl SidebarSection {
    #[must_use]
    pub fn new(key: impl Into<String>, groups: Vec<SidebarGroup>) -> Self {
        Self {
            key: key.into(),
            groups,
        }
    }

    /// Iterate over all routes of the section in display order.
    pub fn routes(&self) -> impl Iterator<Item = &SidebarRoute> {
        self.groups.iter().flat_map(|g| &g.routes)
    }
}

/// Titled cluster of routes inside a section.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SidebarGroup {
    /// Group title.
    pub title: String,
    /// Routes in display order.
    pub routes: Vec<SidebarRoute>,
}

impl SidebarGroup {
    /// Create a group from plain route strings.
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            routes: routes.into_iter().map(SidebarRoute::new).collect(),
        }
    }
}

/// Pointer to a content file, relative to its section or absolute.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SidebarRoute {
    /// Route path as written.
    pub path: String,
    /// Explicit display title (`{ text, link }` form).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl SidebarRoute {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            title: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_target_internal() {
        assert_eq!(
            NavTarget::parse("/basement/"),
            NavTarget::Internal("/basement/".to_owned())
        );
    }

    #[test]
    fn test_nav_target_external() {
        assert_eq!(
            NavTarget::parse("https://github.com/x/y"),
            NavTarget::External("https://github.com/x/y".to_owned())
        );
        assert_eq!(
            NavTarget::parse("not a url"),
            NavTarget::External("not a url".to_owned())
        );
    }

    #[test]
    fn test_nav_target_protocol_relative_is_external() {
        assert!(matches!(
            NavTarget::parse("//cdn.example.com/x"),
            NavTarget::External(_)
        ));
    }

    #[test]
    fn test_default_site_uses_root_base() {
        let site = SiteConfig::default();
        assert_eq!(site.base, "/");
        assert_eq!(site.nav_root, NavRoot::TopLevel);
    }

    #[test]
    fn test_locations_follow_nav_root() {
        let mut site = SiteConfig::default();
        assert_eq!(site.navbar_location().to_string(), "navbar");

        site.nav_root = NavRoot::ThemeConfig;
        assert_eq!(site.navbar_location().to_string(), "themeConfig.navbar");
        assert_eq!(site.sidebar_location().to_string(), "themeConfig.sidebar");
    }

    #[test]
    fn test_route_count() {
        let site = SiteConfig {
            sidebar: vec![
                SidebarSection::new(
                    "/a/",
                    vec![
                        SidebarGroup::new("One", ["/a/1.md", "/a/2.md"]),
                        SidebarGroup::new("Two", ["/a/3.md"]),
                    ],
                ),
                SidebarSection::new("/b/", vec![SidebarGroup::new("Three", ["/b/1.md"])]),
            ],
            ..SiteConfig::default()
        };

        assert_eq!(site.route_count(), 4);
        assert_eq!(site.section("/a/").map(|s| s.routes().count()), Some(3));
        assert!(site.section("/c/").is_none());
    }

    #[test]
    fn test_head_entry_builder() {
        let entry = HeadEntry::new("link")
            .with_attr("rel", "icon")
            .with_attr("href", "/favicon.ico");

        assert_eq!(entry.tag, "link");
        let names: Vec<_> = entry.attrs.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["rel", "href"]);
    }
}
