//! Content lookup for sidebar routes.
//!
//! Provides the [`ContentSource`] trait so route existence can be checked
//! against the filesystem ([`FsContent`]) or an in-memory set of routes
//! ([`RouteSet`]) without the validator knowing which.
//!
//! # Route Convention
//!
//! Routes passed to [`ContentSource::contains`] are resolved, absolute
//! routes:
//! - `/basement/` - section home (`basement/README.md` or `basement/index.md`)
//! - `/basement/JS/BOM.md` - markdown file
//! - `/basement/JS/BOM.html` - page built from `basement/JS/BOM.md`
//! - `/basement/JS/BOM` - same page without extension

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

/// Source of content files that sidebar routes point to.
pub trait ContentSource: Send + Sync {
    /// Check whether `route` resolves to a content file.
    fn contains(&self, route: &str) -> bool;
}

/// Index files that make a directory route resolvable.
const INDEX_FILES: [&str; 2] = ["README.md", "index.md"];

/// Filesystem-backed content source rooted at the docs directory.
#[derive(Debug, Clone)]
pub struct FsContent {
    root: PathBuf,
}

impl FsContent {
    /// Create a content source for the given docs directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    /// Content root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate files for a route, relative to the root.
    fn candidates(route: &str) -> Vec<PathBuf> {
        let end = route.find(['?', '#']).unwrap_or(route.len());
        let route = route[..end].trim_start_matches('/');

        if route.is_empty() || route.ends_with('/') {
            let dir = Path::new(route);
            return INDEX_FILES.iter().map(|index| dir.join(index)).collect();
        }

        if Path::new(route).extension().is_some_and(|ext| ext == "md") {
            return vec![PathBuf::from(route)];
        }

        if let Some(stem) = route.strip_suffix(".html") {
            return vec![PathBuf::from(format!("{stem}.md"))];
        }

        let dir = Path::new(route);
        std::iter::once(PathBuf::from(format!("{route}.md")))
            .chain(INDEX_FILES.iter().map(|index| dir.join(index)))
            .collect()
    }

    /// Reject paths that escape the root.
    fn is_contained(path: &Path) -> bool {
        path.components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
    }
}

impl ContentSource for FsContent {
    fn contains(&self, route: &str) -> bool {
        Self::candidates(route)
            .into_iter()
            .filter(|candidate| Self::is_contained(candidate))
            .any(|candidate| self.root.join(candidate).is_file())
    }
}

/// In-memory content source holding normalized routes.
///
/// Routes are stored exactly as given; use it with resolved routes.
#[derive(Debug, Clone, Default)]
pub struct RouteSet {
    routes: HashSet<String>,
}

impl RouteSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a route.
    #[must_use]
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.routes.insert(route.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for RouteSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            routes: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl ContentSource for RouteSet {
    fn contains(&self, route: &str) -> bool {
        self.routes.contains(route)
    }
}
