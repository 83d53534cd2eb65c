#![forbid(unsafe_code)]

//! Scroll-position classifier ("scroll spy").
//!
//! Maps a biased scroll offset plus the current section bounds to the section
//! the reader is looking at.
//!
//! # Algorithm
//!
//! Sections are visited in registry order. A section matches when the offset
//! lies in `[top, top + height)`. Under [`MatchPolicy::FirstDeclared`] the
//! earliest-declared match wins, so overlapping bounds during a reflow resolve
//! to the section declared first. When nothing matches (above the first
//! section, past the last one, or every candidate unmounted) the previous
//! result is returned unchanged, which keeps the highlight stable during
//! momentum scrolling.
//!
//! # Invariants
//!
//! 1. Once `Known`, the result never goes back to `Unset`.
//! 2. The result is either `previous` or an identifier present in `order`.
//! 3. Work is O(`order.len()`).

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::registry::BoundsSnapshot;
use crate::section::SectionId;

/// Offset added to the raw scroll distance so a section turns active slightly
/// before its top edge slides under the fixed navigation bar.
pub const DEFAULT_LOOKAHEAD_BIAS: f64 = 100.0;

/// Biased scroll position used for classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollState {
    pub offset: f64,
}

impl ScrollState {
    /// A state whose offset is already biased.
    #[must_use]
    pub const fn new(offset: f64) -> Self {
        Self { offset }
    }

    /// Sample from a raw viewport scroll distance.
    #[must_use]
    pub fn biased(raw_scroll: f64, bias: f64) -> Self {
        Self {
            offset: raw_scroll + bias,
        }
    }
}

/// Section currently judged to be in focus.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ActiveSection {
    /// No classification has matched yet.
    #[default]
    Unset,
    Known(SectionId),
}

impl ActiveSection {
    #[must_use]
    pub fn id(&self) -> Option<&SectionId> {
        match self {
            Self::Unset => None,
            Self::Known(id) => Some(id),
        }
    }

    /// True when this is `Known(id)` for the given identifier.
    #[must_use]
    pub fn is(&self, id: &str) -> bool {
        matches!(self, Self::Known(known) if known == id)
    }
}

/// Which match wins when several sections contain the offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MatchPolicy {
    /// Lowest order wins.
    #[default]
    FirstDeclared,
    /// Highest order wins.
    LastDeclared,
}

/// Stateless classifier configured with a tie-break policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActiveSectionClassifier {
    policy: MatchPolicy,
}

impl ActiveSectionClassifier {
    #[must_use]
    pub const fn new(policy: MatchPolicy) -> Self {
        Self { policy }
    }

    #[must_use]
    pub const fn policy(&self) -> MatchPolicy {
        self.policy
    }

    /// Resolve the active section for one sample.
    ///
    /// `order` gives registry order; identifiers missing from `bounds` are
    /// treated as unmounted and skipped.
    #[must_use]
    pub fn classify(
        &self,
        scroll: ScrollState,
        bounds: &BoundsSnapshot,
        order: &[SectionId],
        previous: &ActiveSection,
    ) -> ActiveSection {
        let contains =
            |id: &&SectionId| bounds.get(*id).is_some_and(|b| b.contains(scroll.offset));
        let hit = match self.policy {
            MatchPolicy::FirstDeclared => order.iter().find(contains),
            MatchPolicy::LastDeclared => order.iter().rev().find(contains),
        };
        match hit {
            Some(id) => ActiveSection::Known(id.clone()),
            None => previous.clone(),
        }
    }
}
