//! Site configuration model for navcheck.
//!
//! This crate describes the declarative configuration of a documentation site
//! (title, head tags, theme, navbar, per-section sidebar) and turns
//! configuration files into that model.
//!
//! # Architecture
//!
//! - [`SiteConfig`] and friends are plain immutable values; nothing here
//!   reads global state.
//! - [`SiteDocument`] loads JSON, YAML or TOML files into an ordered
//!   [`serde_json::Value`] tree.
//! - [`SiteConfig::from_document`] builds the model leniently: shape problems
//!   become [`Finding`]s instead of errors, and only a document that is not a
//!   mapping at all is rejected with a [`StructuralError`].
//! - [`route`] holds the path rules shared by validation and diffing.
//!
//! # Example
//!
//! ```ignore
//! use navcheck_site::{SiteConfig, SiteDocument};
//!
//! let document = SiteDocument::load("docs/.vuepress/config.json".as_ref())?;
//! let shaped = SiteConfig::from_document(document.value())?;
//! for finding in &shaped.findings {
//!     eprintln!("{finding}");
//! }
//! ```

mod document;
mod finding;
mod model;
pub mod route;
mod shape;
mod theme;

pub use document::{DocumentFormat, SiteDocument, StructuralError};
pub use finding::{Finding, FindingKind, Location};
pub use model::{
    HeadEntry, MarkdownOptions, NavRoot, NavTarget, NavbarEntry, SidebarGroup, SidebarRoute,
    SidebarSection, SiteConfig,
};
pub use shape::Shaped;
pub use theme::{LayoutSlot, LayoutSource, ResolvedTheme, ThemeDescriptor, UnknownSlot};
