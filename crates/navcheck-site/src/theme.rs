//! Theme declaration and layout slot resolution.
//!
//! A theme extends a base theme and may replace some of its layout
//! components. Slots form a closed set ([`LayoutSlot`]); overrides are
//! resolved once, when the configuration is loaded, into a
//! [`ResolvedTheme`] that answers which component renders each slot.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Layout slots a base theme exposes for replacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum LayoutSlot {
    /// Root page layout.
    Layout,
    /// Page shown for unknown routes.
    NotFound,
}

impl LayoutSlot {
    /// Every slot, in rendering order.
    pub const ALL: [LayoutSlot; 2] = [LayoutSlot::Layout, LayoutSlot::NotFound];

    /// Slot name as written in configuration.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Layout => "Layout",
            Self::NotFound => "NotFound",
        }
    }
}

impl fmt::Display for LayoutSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a slot name outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown layout slot: {0}")]
pub struct UnknownSlot(pub String);

impl FromStr for LayoutSlot {
    type Err = UnknownSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|slot| slot.as_str() == s)
            .ok_or_else(|| UnknownSlot(s.to_owned()))
    }
}

/// Declaration of the base theme and its overridden layouts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ThemeDescriptor {
    /// Name of the derived theme, if it has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Local theme directory, when the configuration names one instead of
    /// declaring the theme inline. Its `extends` and `layouts` live in that
    /// directory and are left empty here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Base theme identifier, e.g. `@vuepress/theme-default`.
    pub extends: String,
    /// Replacement component per slot.
    pub layouts: BTreeMap<LayoutSlot, String>,
}

impl ThemeDescriptor {
    /// A theme that uses `base` unchanged.
    #[must_use]
    pub fn extending(base: impl Into<String>) -> Self {
        Self {
            extends: base.into(),
            ..Self::default()
        }
    }

    /// A theme declared in a local directory.
    #[must_use]
    pub fn from_dir(source: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            ..Self::default()
        }
    }

    /// True when the theme lives in a directory that was not loaded.
    #[must_use]
    pub fn is_external(&self) -> bool {
        self.source.is_some() && self.extends.is_empty()
    }

    /// Override one slot.
    #[must_use]
    pub fn with_layout(mut self, slot: LayoutSlot, component: impl Into<String>) -> Self {
        self.layouts.insert(slot, component.into());
        self
    }

    /// Resolve every slot to the component that renders it.
    #[must_use]
    pub fn resolve(&self) -> ResolvedTheme {
        let slots = LayoutSlot::ALL
            .into_iter()
            .map(|slot| {
                let source = match self.layouts.get(&slot) {
                    Some(component) => LayoutSource::Override(component.clone()),
                    None => LayoutSource::Inherited(self.extends.clone()),
                };
                (slot, source)
            })
            .collect();

        ResolvedTheme {
            name: self.name.clone(),
            source: self.source.clone(),
            base: self.extends.clone(),
            slots,
        }
    }
}

/// Component that renders a layout slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "component", rename_all = "lowercase")]
pub enum LayoutSource {
    /// Provided by the named base theme.
    Inherited(String),
    /// Replaced by the given component reference.
    Override(String),
}

/// Theme with every slot bound to a component.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedTheme {
    /// Name of the derived theme.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Local theme directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Base theme identifier.
    pub base: String,
    /// Slot bindings in [`LayoutSlot::ALL`] order.
    pub slots: Vec<(LayoutSlot, LayoutSource)>,
}

impl ResolvedTheme {
    /// Component bound to `slot`.
    #[must_use]
    pub fn layout(&self, slot: LayoutSlot) -> Option<&LayoutSource> {
        self.slots
            .iter()
            .find_map(|(s, source)| (*s == slot).then_some(source))
    }

    /// Slots whose component was replaced.
    pub fn overrides(&self) -> impl Iterator<Item = (LayoutSlot, &str)> {
        self.slots.iter().filter_map(|(slot, source)| match source {
            LayoutSource::Override(component) => Some((*slot, component.as_str())),
            LayoutSource::Inherited(_) => None,
        })
    }
}
