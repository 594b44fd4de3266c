//! Validation findings and their locations.
//!
//! A [`Finding`] is one configuration inconsistency. Findings are collected,
//! never raised: a single run reports every problem it sees.

use std::fmt;

use serde::{Serialize, Serializer};
use serde_json::Value;

/// Path to a node in the configuration tree.
///
/// Rendered like `themeConfig.sidebar["/basement/"][0].children[3]`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location(Vec<Segment>);

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
enum Segment {
    Key(String),
    Index(usize),
}

impl Location {
    /// The document root.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Location of a mapping key below this one.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut next = self.clone();
        next.0.push(Segment::Key(key.into()));
        next
    }

    /// Location of a list element below this one.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        let mut next = self.clone();
        next.0.push(Segment::Index(index));
        next
    }

    /// True for the document root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Top-level key this location lives under, e.g. `theme`.
    #[must_use]
    pub fn top_key(&self) -> Option<&str> {
        match self.0.first()? {
            Segment::Key(key) => Some(key.as_str()),
            Segment::Index(_) => None,
        }
    }

    /// True if `prefix` is this location or one of its ancestors.
    #[must_use]
    pub fn starts_with(&self, prefix: &Location) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Where this location sits in `document`, one index per segment.
    ///
    /// Mapping keys count in document order. Comparing positions orders
    /// locations the way their nodes appear in the document; a segment that
    /// does not exist sorts after its siblings.
    #[must_use]
    pub fn position(&self, document: &Value) -> Vec<usize> {
        let mut node = Some(document);
        self.0
            .iter()
            .map(|segment| {
                let (index, next) = match (segment, node) {
                    (Segment::Key(key), Some(Value::Object(map))) => {
                        (map.keys().position(|k| k == key), map.get(key))
                    }
                    (Segment::Index(i), Some(Value::Array(items))) => {
                        let next = items.get(*i);
                        (next.map(|_| *i), next)
                    }
                    _ => (None, None),
                };
                node = next;
                index.unwrap_or(usize::MAX)
            })
            .collect()
    }
}

/// Keys that can be written with dot notation.
fn is_identifier(key: &str) -> bool {
    let mut chars = key.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("<root>");
        }
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                Segment::Key(key) if is_identifier(key) => {
                    if i > 0 {
                        f.write_str(".")?;
                    }
                    f.write_str(key)?;
                }
                Segment::Key(key) => write!(f, "[{key:?}]")?,
                Segment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Kind of configuration inconsistency, with the offending values.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum FindingKind {
    /// The same route appears twice within one sidebar section.
    DuplicateRoute {
        /// Section key.
        section: String,
        /// Route as written at the duplicate occurrence.
        path: String,
    },
    /// An internal navbar link does not match any sidebar section.
    UnresolvedNavTarget {
        /// Navbar entry text.
        text: String,
        /// Link as written.
        target: String,
    },
    /// An external navbar link is not an absolute URL with a host.
    MalformedExternalUrl {
        /// Navbar entry text.
        text: String,
        /// Link as written.
        url: String,
    },
    /// A head entry uses a tag outside the allow-list.
    DisallowedHeadTag {
        /// Tag name as written.
        tag: String,
    },
    /// A required field is absent or has the wrong type.
    MissingField {
        /// Field name.
        field: String,
    },
    /// A sidebar route does not point to any content file.
    ContentNotFound {
        /// Section key.
        section: String,
        /// Route as written.
        path: String,
    },
    /// A theme overrides a layout slot the base theme does not have.
    UnknownLayoutSlot {
        /// Slot name as written.
        slot: String,
    },
    /// The base path does not start and end with `/`.
    InvalidBasePath {
        /// Base path as written.
        base: String,
    },
}

impl FindingKind {
    /// Stable kebab-case identifier, e.g. `duplicate-route`.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::DuplicateRoute { .. } => "duplicate-route",
            Self::UnresolvedNavTarget { .. } => "unresolved-nav-target",
            Self::MalformedExternalUrl { .. } => "malformed-external-url",
            Self::DisallowedHeadTag { .. } => "disallowed-head-tag",
            Self::MissingField { .. } => "missing-field",
            Self::ContentNotFound { .. } => "content-not-found",
            Self::UnknownLayoutSlot { .. } => "unknown-layout-slot",
            Self::InvalidBasePath { .. } => "invalid-base-path",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateRoute { section, path } => {
                write!(f, "route {path:?} is listed more than once in section {section:?}")
            }
            Self::UnresolvedNavTarget { text, target } => {
                write!(f, "navbar entry {text:?} links to {target:?}, which is not a sidebar section")
            }
            Self::MalformedExternalUrl { text, url } => {
                write!(f, "navbar entry {text:?} has malformed external URL {url:?}")
            }
            Self::DisallowedHeadTag { tag } => write!(f, "head tag {tag:?} is not allowed"),
            Self::MissingField { field } => write!(f, "missing required field `{field}`"),
            Self::ContentNotFound { section, path } => {
                write!(f, "route {path:?} in section {section:?} has no content file")
            }
            Self::UnknownLayoutSlot { slot } => write!(f, "unknown layout slot {slot:?}"),
            Self::InvalidBasePath { base } => {
                write!(f, "base path {base:?} must start and end with \"/\"")
            }
        }
    }
}

/// A single validation diagnostic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// What is wrong.
    #[serde(flatten)]
    pub kind: FindingKind,
    /// Where in the configuration tree.
    pub location: Location,
    /// Human-readable description.
    pub message: String,
}

impl Finding {
    /// Create a finding with the default message for its kind.
    #[must_use]
    pub fn new(kind: FindingKind, location: Location) -> Self {
        let message = kind.to_string();
        Self {
            kind,
            location,
            message,
        }
    }

    /// Create a finding with a custom message.
    #[must_use]
    pub fn with_message(kind: FindingKind, location: Location, message: impl Into<String>) -> Self {
        Self {
            kind,
            location,
            message: message.into(),
        }
    }

    /// Shorthand for a [`FindingKind::MissingField`] finding.
    #[must_use]
    pub fn missing(field: &str, location: Location) -> Self {
        Self::new(
            FindingKind::MissingField {
                field: field.to_owned(),
            },
            location,
        )
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.location, self.message, self.kind.code())
    }
}
