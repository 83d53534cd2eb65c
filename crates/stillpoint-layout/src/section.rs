#![forbid(unsafe_code)]

//! Section identifiers, ordering, and vertical extents.
//!
//! A page is composed of a fixed, hand-authored list of sections. Each one is
//! known to the layout core only as an identifier plus its position in that
//! list; its vertical extent ([`SectionBounds`]) is measured from the live
//! layout whenever a classification pass needs it.
//!
//! # Invariants
//!
//! 1. Identifiers in a [`SectionList`] are unique and non-empty.
//! 2. `Section::order` equals the section's index in its list.
//! 3. `SectionBounds::height` is finite and `>= 0`.
//! 4. `SectionBounds::contains` is half-open: `[top, top + height)`.

use std::borrow::Borrow;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Stable identifier of a page section (the anchor id in the rendered page).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SectionId(String);

impl SectionId {
    /// Wrap an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SectionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SectionId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for SectionId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl PartialEq<str> for SectionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for SectionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// A trackable section and its position in the page.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Section {
    pub id: SectionId,
    /// Position in the registry. Lower order wins overlap tie-breaks and
    /// comes first in menus.
    pub order: usize,
}

/// Vertical extent of a rendered section, in page-space layout pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SectionBounds {
    /// Distance from the page top to the section's top edge.
    pub top: f64,
    /// Rendered height. Never negative.
    pub height: f64,
}

impl SectionBounds {
    /// Build bounds from a measurement, rejecting negative or non-finite values.
    pub fn new(top: f64, height: f64) -> Result<Self, BoundsError> {
        if !top.is_finite() {
            return Err(BoundsError::NonFiniteTop(top));
        }
        if !height.is_finite() || height < 0.0 {
            return Err(BoundsError::InvalidHeight(height));
        }
        Ok(Self { top, height })
    }

    /// Exclusive bottom edge.
    #[inline]
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Half-open containment test. Zero-height bounds contain nothing.
    #[inline]
    #[must_use]
    pub fn contains(&self, offset: f64) -> bool {
        offset >= self.top && offset < self.bottom()
    }
}

/// Rejected section measurement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsError {
    /// Top offset was NaN or infinite.
    NonFiniteTop(f64),
    /// Height was negative, NaN, or infinite.
    InvalidHeight(f64),
}

impl fmt::Display for BoundsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFiniteTop(top) => write!(f, "section top must be finite, got {top}"),
            Self::InvalidHeight(height) => {
                write!(f, "section height must be finite and >= 0, got {height}")
            }
        }
    }
}

impl std::error::Error for BoundsError {}

/// Ordered, duplicate-free list of sections, fixed at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionList {
    sections: Vec<Section>,
}

impl SectionList {
    /// Build the list from identifiers in page order.
    pub fn new<I, S>(ids: I) -> Result<Self, SectionListError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SectionId>,
    {
        let mut sections: Vec<Section> = Vec::new();
        for (order, id) in ids.into_iter().enumerate() {
            let id = id.into();
            if id.as_str().is_empty() {
                return Err(SectionListError::EmptyId { order });
            }
            if sections.iter().any(|s| s.id == id) {
                return Err(SectionListError::Duplicate(id));
            }
            sections.push(Section { id, order });
        }
        Ok(Self { sections })
    }

    /// Sections in registry order.
    #[must_use]
    pub fn as_slice(&self) -> &[Section] {
        &self.sections
    }

    /// Iterate identifiers in registry order.
    pub fn ids(&self) -> impl Iterator<Item = &SectionId> + '_ {
        self.sections.iter().map(|s| &s.id)
    }

    /// Look up a section by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

/// Rejected section list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionListError {
    /// The same identifier was declared twice.
    Duplicate(SectionId),
    /// An identifier was the empty string.
    EmptyId { order: usize },
}

impl fmt::Display for SectionListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Duplicate(id) => write!(f, "section `{id}` declared more than once"),
            Self::EmptyId { order } => write!(f, "section at position {order} has an empty id"),
        }
    }
}

impl std::error::Error for SectionListError {}
