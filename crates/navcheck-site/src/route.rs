//! Route path rules shared by validation and diffing.
//!
//! Sidebar routes may be absolute (`/basement/JS/BOM.md`) or relative to
//! their section key (`JS/BOM.md` under `/basement/`). Navbar links point
//! at section keys and may carry a query, a fragment, or an explicit index
//! page (`/basement/README.md`).

/// Index page names that stand for their directory.
const INDEX_PAGES: [&str; 4] = ["README.md", "index.md", "index.html", "README.html"];

/// Resolve a sidebar route against its section key.
///
/// Absolute routes are returned as written; relative routes are joined onto
/// the section key. A leading `./` is dropped.
#[must_use]
pub fn resolve(section: &str, route: &str) -> String {
    let route = route.trim();
    if route.starts_with('/') {
        return route.to_owned();
    }

    let route = route.strip_prefix("./").unwrap_or(route);
    let mut resolved = String::with_capacity(section.len() + route.len() + 1);
    if !section.starts_with('/') {
        resolved.push('/');
    }
    resolved.push_str(section);
    if !resolved.ends_with('/') {
        resolved.push('/');
    }
    resolved.push_str(route);
    resolved
}

/// Normalize an internal link or section key for comparison.
///
/// Strips query and fragment, drops a trailing index page name, and ensures
/// both a leading and a trailing `/`.
#[must_use]
pub fn normalize(link: &str) -> String {
    let link = link.trim();
    let end = link.find(['?', '#']).unwrap_or(link.len());
    let mut path = &link[..end];

    if let Some((dir, page)) = path.rsplit_once('/')
        && INDEX_PAGES.contains(&page)
    {
        path = &path[..=dir.len()];
    }

    let mut normalized = String::with_capacity(path.len() + 2);
    if !path.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(path);
    if !normalized.ends_with('/') {
        normalized.push('/');
    }
    normalized
}
