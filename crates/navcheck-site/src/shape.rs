//! Lenient conversion from a document tree to [`SiteConfig`].
//!
//! Every list element in the document becomes exactly one node in the model,
//! even when it is malformed, so list indices in the model match the
//! document and validator locations point at the right place.
//!
//! Values of the wrong type are reported as `MissingField` and replaced by
//! defaults. Required strings that are simply absent are left empty for the
//! validator to report.

use serde_json::{Map, Value};

use crate::document::{StructuralError, type_name};
use crate::finding::{Finding, FindingKind, Location};
use crate::model::{
    HeadEntry, MarkdownOptions, NavRoot, NavTarget, NavbarEntry, SidebarGroup, SidebarRoute,
    SidebarSection, SiteConfig,
};
use crate::theme::{LayoutSlot, ThemeDescriptor};

/// A site configuration plus the shape problems found while building it.
#[derive(Clone, Debug, PartialEq)]
pub struct Shaped {
    /// The configuration, with defaults standing in for malformed values.
    pub config: SiteConfig,
    /// Shape problems in document order.
    pub findings: Vec<Finding>,
}

impl SiteConfig {
    /// Build a configuration from a document tree.
    ///
    /// `navbar` and `sidebar` are read from `themeConfig` when it is present,
    /// otherwise from the document root.
    ///
    /// # Errors
    ///
    /// Returns [`StructuralError::NotAMapping`] if the root is not a mapping.
    pub fn from_document(document: &Value) -> Result<Shaped, StructuralError> {
        let root = document
            .as_object()
            .ok_or_else(|| StructuralError::NotAMapping(type_name(document)))?;

        let mut shaper = Shaper::default();
        let config = shaper.site(root);

        tracing::debug!(
            sections = config.sidebar.len(),
            navbar = config.navbar.len(),
            findings = shaper.findings.len(),
            "Shaped site configuration"
        );

        Ok(Shaped {
            config,
            findings: shaper.findings,
        })
    }
}

#[derive(Default)]
struct Shaper {
    findings: Vec<Finding>,
}

impl Shaper {
    fn site(&mut self, root: &Map<String, Value>) -> SiteConfig {
        let here = Location::root();

        let title = self.string(root, "title", &here).unwrap_or_default();
        let description = self.string(root, "description", &here).unwrap_or_default();
        let base = self
            .string(root, "base", &here)
            .unwrap_or_else(|| "/".to_owned());
        let head = self
            .list(root, "head", &here)
            .map(|(items, at)| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.head_entry(item, &at.index(i)))
                    .collect()
            })
            .unwrap_or_default();
        let markdown = self
            .mapping(root, "markdown", &here)
            .cloned()
            .unwrap_or_else(MarkdownOptions::new);
        let theme = root.get("theme").and_then(|value| self.theme(value, &here.key("theme")));

        let (nav_source, nav_root) = match root.get("themeConfig") {
            Some(Value::Object(theme_config)) => (theme_config, NavRoot::ThemeConfig),
            Some(other) => {
                self.wrong_type("themeConfig", &here.key("themeConfig"), "a mapping", other);
                (root, NavRoot::TopLevel)
            }
            None => (root, NavRoot::TopLevel),
        };
        let nav_here = match nav_root {
            NavRoot::TopLevel => here,
            NavRoot::ThemeConfig => Location::root().key("themeConfig"),
        };

        let navbar = self
            .list(nav_source, "navbar", &nav_here)
            .map(|(items, at)| self.navbar(items, &at))
            .unwrap_or_default();
        let sidebar = self
            .mapping(nav_source, "sidebar", &nav_here)
            .map(|sections| self.sidebar(sections, &nav_here.key("sidebar")))
            .unwrap_or_default();

        SiteConfig {
            title,
            description,
            base,
            head,
            markdown,
            theme,
            navbar,
            sidebar,
            nav_root,
        }
    }

    /// `["link", { rel: "icon" }]` or `{ tag: "link", attrs: { rel: "icon" } }`.
    fn head_entry(&mut self, item: &Value, at: &Location) -> HeadEntry {
        let (tag, attrs) = match item {
            Value::Array(parts) => (parts.first(), parts.get(1)),
            Value::Object(obj) => (obj.get("tag"), obj.get("attrs")),
            other => {
                self.wrong_type("tag", at, "a list or a mapping", other);
                return HeadEntry::default();
            }
        };

        let tag = match tag {
            Some(Value::String(tag)) => tag.clone(),
            Some(other) => {
                self.wrong_type("tag", at, "a string", other);
                String::new()
            }
            None => String::new(),
        };
        let attrs = match attrs {
            Some(Value::Object(attrs)) => attrs.clone(),
            Some(other) => {
                self.wrong_type("attrs", at, "a mapping", other);
                Map::new()
            }
            None => Map::new(),
        };

        HeadEntry { tag, attrs }
    }

    fn theme(&mut self, value: &Value, at: &Location) -> Option<ThemeDescriptor> {
        let obj = match value {
            Value::String(dir) => return Some(ThemeDescriptor::from_dir(dir.clone())),
            Value::Object(obj) => obj,
            other => {
                self.wrong_type("theme", at, "a string or a mapping", other);
                return None;
            }
        };

        let mut theme = ThemeDescriptor {
            name: self.string(obj, "name", at),
            extends: self.string(obj, "extends", at).unwrap_or_default(),
            ..ThemeDescriptor::default()
        };

        if let Some(layouts) = self.mapping(obj, "layouts", at) {
            let layouts_at = at.key("layouts");
            for (name, component) in layouts {
                let slot_at = layouts_at.key(name.clone());
                let Ok(slot) = name.parse::<LayoutSlot>() else {
                    self.findings.push(Finding::new(
                        FindingKind::UnknownLayoutSlot { slot: name.clone() },
                        slot_at,
                    ));
                    continue;
                };
                let component = match component {
                    Value::String(component) => component.clone(),
                    other => {
                        self.wrong_type(name, &slot_at, "a string", other);
                        String::new()
                    }
                };
                theme.layouts.insert(slot, component);
            }
        }

        Some(theme)
    }

    fn navbar(&mut self, items: &[Value], at: &Location) -> Vec<NavbarEntry> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.navbar_entry(item, &at.index(i)))
            .collect()
    }

    /// `{ text, link, children }`, or a bare route string.
    ///
    /// A blank link counts as absent.
    fn navbar_entry(&mut self, item: &Value, at: &Location) -> NavbarEntry {
        let obj = match item {
            Value::String(link) if link.trim().is_empty() => return NavbarEntry::default(),
            Value::String(link) => return NavbarEntry::link(link.clone(), link),
            Value::Object(obj) => obj,
            other => {
                self.wrong_type("text", at, "a string or a mapping", other);
                return NavbarEntry::default();
            }
        };

        let text = self.string(obj, "text", at).unwrap_or_default();
        let target = self
            .string(obj, "link", at)
            .filter(|link| !link.trim().is_empty())
            .map(|link| NavTarget::parse(&link));
        let children = self
            .list(obj, "children", at)
            .map(|(items, children_at)| self.navbar(items, &children_at))
            .unwrap_or_default();

        NavbarEntry {
            text,
            target,
            children,
        }
    }

    fn sidebar(&mut self, sections: &Map<String, Value>, at: &Location) -> Vec<SidebarSection> {
        sections
            .iter()
            .map(|(key, groups)| {
                let section_at = at.key(key.clone());
                let groups = match groups {
                    Value::Array(groups) => groups
                        .iter()
                        .enumerate()
                        .map(|(i, group)| self.sidebar_group(group, &section_at.index(i)))
                        .collect(),
                    other => {
                        self.wrong_type(key, &section_at, "a list of groups", other);
                        Vec::new()
                    }
                };
                SidebarSection::new(key.clone(), groups)
            })
            .collect()
    }

    /// `{ text, children: [...] }`.
    fn sidebar_group(&mut self, item: &Value, at: &Location) -> SidebarGroup {
        let Value::Object(obj) = item else {
            self.wrong_type("text", at, "a mapping", item);
            return SidebarGroup::default();
        };

        let title = self.string(obj, "text", at).unwrap_or_default();
        let routes = self
            .list(obj, "children", at)
            .map(|(items, children_at)| {
                items
                    .iter()
                    .enumerate()
                    .map(|(i, route)| self.sidebar_route(route, &children_at.index(i)))
                    .collect()
            })
            .unwrap_or_default();

        SidebarGroup { title, routes }
    }

    /// A route string, or `{ text, link }`.
    fn sidebar_route(&mut self, item: &Value, at: &Location) -> SidebarRoute {
        match item {
            Value::String(path) => SidebarRoute::new(path.clone()),
            Value::Object(obj) => SidebarRoute {
                path: self.string(obj, "link", at).unwrap_or_default(),
                title: self.string(obj, "text", at),
            },
            other => {
                self.wrong_type("link", at, "a string or a mapping", other);
                SidebarRoute::default()
            }
        }
    }

    /// Read an optional string field.
    ///
    /// Findings for the wrong type are reported at the parent location, the
    /// same place the validator reports missing values.
    fn string(&mut self, obj: &Map<String, Value>, key: &str, at: &Location) -> Option<String> {
        match obj.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Null => None,
            other => {
                self.wrong_type(key, &field_location(at, key), "a string", other);
                None
            }
        }
    }

    /// Read an optional list field, returning it with its location.
    fn list<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        at: &Location,
    ) -> Option<(&'a [Value], Location)> {
        match obj.get(key)? {
            Value::Array(items) => Some((items.as_slice(), at.key(key))),
            Value::Null => None,
            other => {
                self.wrong_type(key, &at.key(key), "a list", other);
                None
            }
        }
    }

    /// Read an optional mapping field.
    fn mapping<'a>(
        &mut self,
        obj: &'a Map<String, Value>,
        key: &str,
        at: &Location,
    ) -> Option<&'a Map<String, Value>> {
        match obj.get(key)? {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                self.wrong_type(key, &at.key(key), "a mapping", other);
                None
            }
        }
    }

    fn wrong_type(&mut self, field: &str, at: &Location, expected: &str, found: &Value) {
        self.findings.push(Finding::with_message(
            FindingKind::MissingField {
                field: field.to_owned(),
            },
            at.clone(),
            format!(
                "field `{field}` must be {expected}, found {}",
                type_name(found)
            ),
        ));
    }
}

/// Location used for scalar field findings.
///
/// Site-level fields are reported at their own key (`title`); fields of list
/// elements are reported at the element (`navbar[2]`), which is what the
/// validator does too.
fn field_location(at: &Location, key: &str) -> Location {
    if at.is_root() {
        at.key(key)
    } else {
        at.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn shape(value: &Value) -> Shaped {
        SiteConfig::from_document(value).unwrap()
    }

    fn original_config() -> Value {
        json!({
            "title": "lliiooiill's FEKA",
            "description": "Record the front-end knowledge I learned",
            "head": [
                ["link", { "rel": "icon", "href": "/public/favicon.ico" }],
                ["link", { "rel": "stylesheet", "href": "https://cdn.example.com/katex.min.css" }]
            ],
            "theme": {
                "name": "my-custom-theme",
                "extends": "@vuepress/theme-default",
                "layouts": { "Layout": "layouts/Layout.vue" }
            },
            "markdown": { "code": { "lineNumbers": true }, "toc": true },
            "themeConfig": {
                "navbar": [
                    { "text": "基础", "link": "/basement/" },
                    { "text": "算法", "link": "/algorithm/" }
                ],
                "sidebar": {
                    "/basement/": [
                        { "text": "JavaScript", "children": ["/basement/JS/this指向.md", "/basement/JS/原型链.md"] },
                        { "text": "CSS", "children": ["/basement/CSS/BFC.md"] }
                    ],
                    "/algorithm/": [
                        { "text": "常见算法", "children": [{ "text": "排序", "link": "/algorithm/排序算法.md" }] }
                    ]
                }
            }
        })
    }

    #[test]
    fn test_root_must_be_mapping() {
        let err = SiteConfig::from_document(&json!(["not", "a", "site"])).unwrap_err();
        assert!(matches!(err, StructuralError::NotAMapping("a list")));
    }

    #[test]
    fn test_shape_full_config() {
        let shaped = shape(&original_config());
        let config = shaped.config;

        assert!(shaped.findings.is_empty(), "{:?}", shaped.findings);
        assert_eq!(config.title, "lliiooiill's FEKA");
        assert_eq!(config.base, "/");
        assert_eq!(config.nav_root, NavRoot::ThemeConfig);
        assert_eq!(config.head.len(), 2);
        assert_eq!(config.head[0].tag, "link");
        assert_eq!(config.head[0].attrs["rel"], "icon");
        assert_eq!(config.markdown["toc"], true);

        let theme = config.theme.unwrap();
        assert_eq!(theme.name.as_deref(), Some("my-custom-theme"));
        assert_eq!(theme.extends, "@vuepress/theme-default");
        assert_eq!(
            theme.layouts.get(&LayoutSlot::Layout).map(String::as_str),
            Some("layouts/Layout.vue")
        );

        assert_eq!(
            config.navbar,
            vec![
                NavbarEntry::link("基础", "/basement/"),
                NavbarEntry::link("算法", "/algorithm/"),
            ]
        );

        let keys: Vec<_> = config.sidebar.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["/basement/", "/algorithm/"]);
        assert_eq!(config.sidebar[0].groups[0].title, "JavaScript");
        assert_eq!(config.sidebar[0].groups[0].routes.len(), 2);
        assert_eq!(
            config.sidebar[1].groups[0].routes[0],
            SidebarRoute {
                path: "/algorithm/排序算法.md".to_owned(),
                title: Some("排序".to_owned()),
            }
        );
    }

    #[test]
    fn test_top_level_nav_when_no_theme_config() {
        let shaped = shape(&json!({
            "title": "Docs",
            "navbar": [{ "text": "Guide", "link": "/guide/" }],
            "sidebar": { "/guide/": [] }
        }));

        assert_eq!(shaped.config.nav_root, NavRoot::TopLevel);
        assert_eq!(shaped.config.navbar.len(), 1);
        assert_eq!(shaped.config.sidebar.len(), 1);
    }

    #[test]
    fn test_head_object_form() {
        let shaped = shape(&json!({
            "head": [{ "tag": "meta", "attrs": { "name": "theme-color", "content": "#fff" } }]
        }));

        assert_eq!(shaped.config.head[0].tag, "meta");
        assert_eq!(shaped.config.head[0].attrs["name"], "theme-color");
    }

    #[test]
    fn test_head_entry_wrong_type_keeps_index() {
        let shaped = shape(&json!({
            "head": [42, ["script", {}]]
        }));

        assert_eq!(shaped.config.head.len(), 2);
        assert_eq!(shaped.config.head[0].tag, "");
        assert_eq!(shaped.config.head[1].tag, "script");
        assert_eq!(shaped.findings.len(), 1);
        assert_eq!(shaped.findings[0].location.to_string(), "head[0]");
        assert!(shaped.findings[0].message.contains("found a number"));
    }

    #[test]
    fn test_wrong_type_title_reported_at_field() {
        let shaped = shape(&json!({ "title": 7 }));

        assert_eq!(shaped.config.title, "");
        assert_eq!(shaped.findings.len(), 1);
        assert_eq!(shaped.findings[0].location.to_string(), "title");
        assert_eq!(
            shaped.findings[0].kind,
            FindingKind::MissingField {
                field: "title".to_owned()
            }
        );
    }

    #[test]
    fn test_sidebar_not_a_mapping() {
        let shaped = shape(&json!({ "sidebar": ["/a.md"] }));

        assert!(shaped.config.sidebar.is_empty());
        assert_eq!(shaped.findings.len(), 1);
        assert_eq!(shaped.findings[0].location.to_string(), "sidebar");
        assert!(shaped.findings[0].message.contains("must be a mapping"));
    }

    #[test]
    fn test_sidebar_route_wrong_type_keeps_index() {
        let shaped = shape(&json!({
            "sidebar": { "/a/": [{ "text": "A", "children": [true, "/a/x.md"] }] }
        }));

        let routes = &shaped.config.sidebar[0].groups[0].routes;
        assert_eq!(routes.len(), 2);
        assert_eq!(routes[0].path, "");
        assert_eq!(routes[1].path, "/a/x.md");
        assert_eq!(
            shaped.findings[0].location.to_string(),
            r#"sidebar["/a/"][0].children[0]"#
        );
    }

    #[test]
    fn test_navbar_dropdown_and_string_entries() {
        let shaped = shape(&json!({
            "navbar": [
                "/guide/",
                { "text": "More", "children": [
                    { "text": "GitHub", "link": "https://github.com" }
                ]}
            ]
        }));

        assert_eq!(
            shaped.config.navbar,
            vec![
                NavbarEntry::link("/guide/", "/guide/"),
                NavbarEntry::dropdown("More", vec![NavbarEntry::link("GitHub", "https://github.com")]),
            ]
        );
    }

    #[test]
    fn test_navbar_blank_link_is_absent() {
        let shaped = shape(&json!({
            "navbar": [{ "text": "A", "link": "" }, { "text": "B", "link": "  " }, " "]
        }));

        assert!(shaped.findings.is_empty());
        let targets: Vec<_> = shaped.config.navbar.iter().map(|e| e.target.clone()).collect();
        assert_eq!(targets, vec![None, None, None]);
    }

    #[test]
    fn test_theme_string_form_names_a_directory() {
        let shaped = shape(&json!({ "theme": "/site/docs/.vuepress/theme" }));

        let theme = shaped.config.theme.unwrap();
        assert_eq!(theme.source.as_deref(), Some("/site/docs/.vuepress/theme"));
        assert_eq!(theme.extends, "");
        assert!(theme.layouts.is_empty());
        assert!(shaped.findings.is_empty());
    }

    #[test]
    fn test_theme_unknown_layout_slot() {
        let shaped = shape(&json!({
            "theme": {
                "extends": "@vuepress/theme-default",
                "layouts": { "Layout": "Layout.vue", "Sidebar": "Sidebar.vue" }
            }
        }));

        let theme = shaped.config.theme.unwrap();
        assert_eq!(theme.layouts.len(), 1);
        assert_eq!(
            shaped.findings,
            vec![Finding::new(
                FindingKind::UnknownLayoutSlot {
                    slot: "Sidebar".to_owned()
                },
                Location::root().key("theme").key("layouts").key("Sidebar"),
            )]
        );
    }

    #[test]
    fn test_theme_config_wrong_type_falls_back_to_root() {
        let shaped = shape(&json!({
            "themeConfig": "oops",
            "navbar": [{ "text": "Guide", "link": "/guide/" }]
        }));

        assert_eq!(shaped.config.nav_root, NavRoot::TopLevel);
        assert_eq!(shaped.config.navbar.len(), 1);
        assert_eq!(shaped.findings[0].location.to_string(), "themeConfig");
    }

    #[test]
    fn test_null_fields_are_absent() {
        let shaped = shape(&json!({ "title": null, "head": null, "markdown": null }));

        assert!(shaped.findings.is_empty());
        assert_eq!(shaped.config.title, "");
        assert!(shaped.config.head.is_empty());
    }
}
