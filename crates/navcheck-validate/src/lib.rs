//! Navigation configuration validation.
//!
//! Checks a [`SiteConfig`](navcheck_site::SiteConfig) for internal
//! consistency before it is handed to a site generator:
//!
//! - sidebar routes are unique within their section
//! - internal navbar links point at a sidebar section
//! - external navbar links are absolute URLs
//! - head entries only use allowed tags
//! - optionally, sidebar routes point at existing content
//!
//! Validation never stops at the first problem and never mutates its input.
//! Whether findings fail a build is the caller's decision.
//!
//! # Example
//!
//! ```ignore
//! use navcheck_validate::{CheckOutcome, Validator, check_file};
//!
//! match check_file("docs/.vuepress/config.json".as_ref(), &Validator::new()) {
//!     CheckOutcome::Accepted(summary) => println!("{} routes ok", summary.routes),
//!     CheckOutcome::Rejected(findings) => findings.iter().for_each(|f| eprintln!("{f}")),
//!     CheckOutcome::Malformed(err) => eprintln!("{err}"),
//! }
//! ```

mod check;
mod content;
mod diff;
mod validator;

pub use check::{CheckOutcome, check, check_file};
pub use content::{ContentSource, FsContent, RouteSet};
pub use diff::{ChangeKind, RouteChange, diff_routes};
pub use validator::{Accepted, DEFAULT_HEAD_TAGS, Validator, validate};
