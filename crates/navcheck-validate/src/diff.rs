//! Sidebar route changes between two configuration snapshots.

use std::collections::HashSet;
use std::fmt;

use navcheck_site::{SidebarSection, SiteConfig, route};
use serde::Serialize;

/// Direction of a route change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Added,
    Removed,
}

/// A sidebar route that appears in only one of two snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RouteChange {
    /// Added or removed.
    pub change: ChangeKind,
    /// Section key.
    pub section: String,
    /// Route as written in the snapshot that has it.
    pub path: String,
}

impl fmt::Display for RouteChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.change {
            ChangeKind::Added => '+',
            ChangeKind::Removed => '-',
        };
        write!(f, "{sign} {} {}", self.section, self.path)
    }
}

/// Report sidebar routes added or removed between `old` and `new`.
///
/// Sections are visited in `old` order, then sections only present in `new`.
/// Within a section, removals (in `old` order) come before additions (in
/// `new` order). Routes are compared after resolving them against their
/// section key, so moving a route between groups is not a change.
#[must_use]
pub fn diff_routes(old: &SiteConfig, new: &SiteConfig) -> Vec<RouteChange> {
    let mut changes = Vec::new();

    for old_section in &old.sidebar {
        let new_section = new.section(&old_section.key);
        section_changes(&old_section.key, Some(old_section), new_section, &mut changes);
    }
    for new_section in &new.sidebar {
        if old.section(&new_section.key).is_none() {
            section_changes(&new_section.key, None, Some(new_section), &mut changes);
        }
    }

    tracing::debug!(changes = changes.len(), "Diffed sidebar routes");
    changes
}

fn section_changes(
    key: &str,
    old: Option<&SidebarSection>,
    new: Option<&SidebarSection>,
    changes: &mut Vec<RouteChange>,
) {
    let old_routes = unique_routes(old);
    let new_routes = unique_routes(new);
    let old_set: HashSet<&str> = old_routes.iter().map(|(resolved, _)| resolved.as_str()).collect();
    let new_set: HashSet<&str> = new_routes.iter().map(|(resolved, _)| resolved.as_str()).collect();

    let removed = old_routes
        .iter()
        .filter(|(resolved, _)| !new_set.contains(resolved.as_str()))
        .map(|(_, path)| (ChangeKind::Removed, path));
    let added = new_routes
        .iter()
        .filter(|(resolved, _)| !old_set.contains(resolved.as_str()))
        .map(|(_, path)| (ChangeKind::Added, path));

    changes.extend(removed.chain(added).map(|(change, path)| RouteChange {
        change,
        section: key.to_owned(),
        path: (*path).to_owned(),
    }));
}

/// Resolved routes of a section with their written form, first occurrence only.
fn unique_routes(section: Option<&SidebarSection>) -> Vec<(String, &str)> {
    let Some(section) = section else {
        return Vec::new();
    };
    let mut seen = HashSet::new();
    section
        .routes()
        .filter(|r| !r.path.trim().is_empty())
        .map(|r| (route::resolve(&section.key, &r.path), r.path.as_str()))
        .filter(|(resolved, _)| seen.insert(resolved.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use navcheck_site::SidebarGroup;
    use pretty_assertions::assert_eq;

    fn snapshot(sections: Vec<SidebarSection>) -> SiteConfig {
        SiteConfig {
            title: "FEKA".to_owned(),
            sidebar: sections,
            ..SiteConfig::default()
        }
    }

    fn change(change: ChangeKind, section: &str, path: &str) -> RouteChange {
        RouteChange {
            change,
            section: section.to_owned(),
            path: path.to_owned(),
        }
    }

    #[test]
    fn test_diff_with_itself_is_empty() {
        let config = snapshot(vec![
            SidebarSection::new(
                "/basement/",
                vec![SidebarGroup::new("JS", ["/basement/JS/BOM.md", "/basement/JS/Class.md"])],
            ),
            SidebarSection::new("/algorithm/", vec![SidebarGroup::new("Algo", ["/algorithm/a.md"])]),
        ]);

        assert!(diff_routes(&config, &config).is_empty());
    }

    #[test]
    fn test_diff_added_and_removed_routes() {
        let old = snapshot(vec![SidebarSection::new(
            "/basement/",
            vec![SidebarGroup::new("JS", ["/basement/JS/BOM.md", "/basement/JS/Class.md"])],
        )]);
        let new = snapshot(vec![SidebarSection::new(
            "/basement/",
            vec![SidebarGroup::new("JS", ["/basement/JS/Class.md", "/basement/JS/Promise.md"])],
        )]);

        assert_eq!(
            diff_routes(&old, &new),
            vec![
                change(ChangeKind::Removed, "/basement/", "/basement/JS/BOM.md"),
                change(ChangeKind::Added, "/basement/", "/basement/JS/Promise.md"),
            ]
        );
    }

    #[test]
    fn test_diff_new_and_dropped_sections() {
        let old = snapshot(vec![SidebarSection::new(
            "/old/",
            vec![SidebarGroup::new("Old", ["/old/a.md"])],
        )]);
        let new = snapshot(vec![SidebarSection::new(
            "/new/",
            vec![SidebarGroup::new("New", ["/new/a.md", "/new/b.md"])],
        )]);

        assert_eq!(
            diff_routes(&old, &new),
            vec![
                change(ChangeKind::Removed, "/old/", "/old/a.md"),
                change(ChangeKind::Added, "/new/", "/new/a.md"),
                change(ChangeKind::Added, "/new/", "/new/b.md"),
            ]
        );
    }

    #[test]
    fn test_moving_route_between_groups_is_not_a_change() {
        let old = snapshot(vec![SidebarSection::new(
            "/a/",
            vec![
                SidebarGroup::new("One", ["/a/x.md"]),
                SidebarGroup::new("Two", ["/a/y.md"]),
            ],
        )]);
        let new = snapshot(vec![SidebarSection::new(
            "/a/",
            vec![SidebarGroup::new("One", ["/a/y.md", "x.md"])],
        )]);

        assert!(diff_routes(&old, &new).is_empty());
    }

    #[test]
    fn test_route_change_display() {
        let added = change(ChangeKind::Added, "/a/", "/a/x.md");
        let removed = change(ChangeKind::Removed, "/a/", "/a/y.md");

        assert_eq!(added.to_string(), "+ /a/ /a/x.md");
        assert_eq!(removed.to_string(), "- /a/ /a/y.md");
    }

    #[test]
    fn test_route_change_serialization() {
        let json = serde_json::to_value(change(ChangeKind::Added, "/a/", "/a/x.md")).unwrap();

        assert_eq!(json["change"], "added");
        assert_eq!(json["section"], "/a/");
        assert_eq!(json["path"], "/a/x.md");
    }
}
