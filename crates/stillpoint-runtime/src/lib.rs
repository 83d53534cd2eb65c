#![forbid(unsafe_code)]

//! Stillpoint runtime.
//!
//! Single-threaded state and commands that sit between the browser page and
//! the layout core.
//!
//! # Key Components
//!
//! - [`ScrollHub`] - host-driven scroll event source with scoped [`ScrollSubscription`]s
//! - [`ScrollObserver`] - classifies each scroll sample and publishes the active section
//! - [`NavigationController`] - menu state plus the smooth "jump to section" command
//! - [`Observable`] / [`ReadSignal`] - change-only published state
//! - [`ScrollSpyConfig`] - lookahead bias and tie-break policy as data
//!
//! # How it fits in the system
//! Scroll samples flow hub → observer → classifier → published state → nav
//! bar. Navigation commands flow the other way, out to a [`ScrollDriver`],
//! and are never fed back into the classifier.

pub mod cancellation;
pub mod config;
pub mod navigation;
pub mod observer;
pub mod reactive;
pub mod scroll_source;

pub use cancellation::{CancellationSource, CancellationToken};
pub use config::{ConfigError, ScrollSpyConfig};
pub use navigation::{
    MenuState, NavigateOutcome, NavigationController, QueuedScrollDriver, ScrollBehavior,
    ScrollDriver, ScrollRequest,
};
pub use observer::ScrollObserver;
pub use reactive::{Observable, ReadSignal, Subscription};
pub use scroll_source::{ListenerId, ScrollHub, ScrollSubscription};
