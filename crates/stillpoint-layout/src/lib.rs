#![forbid(unsafe_code)]

//! Stillpoint layout core.
//!
//! The page is a stack of full-viewport sections under a fixed navigation
//! bar. This crate knows each section only as an identifier plus a vertical
//! extent, and answers one question: given the current scroll position, which
//! section is in focus?
//!
//! # Key Components
//!
//! - [`SectionList`] - the fixed, ordered list of trackable sections
//! - [`SectionRegistry`] - sections plus a live [`LayoutProbe`] for their bounds
//! - [`MeasuredLayout`] - host-fed probe storing the latest measurements
//! - [`ActiveSectionClassifier`] - scroll offset to [`ActiveSection`]
//!
//! # Role in Stillpoint
//! `stillpoint-runtime` drives the classifier from scroll events and owns the
//! published state; `stillpoint-web` feeds measurements in from the browser.

pub mod classifier;
pub mod registry;
pub mod section;

pub use classifier::{
    ActiveSection, ActiveSectionClassifier, DEFAULT_LOOKAHEAD_BIAS, MatchPolicy, ScrollState,
};
pub use registry::{BoundsSnapshot, LayoutProbe, MeasuredLayout, RegistryError, SectionRegistry};
pub use section::{BoundsError, Section, SectionBounds, SectionId, SectionList, SectionListError};
