#![forbid(unsafe_code)]

//! Scroll observer: keeps the published active section in step with the
//! viewport.
//!
//! # How it works
//!
//! 1. [`ScrollObserver::mount`] attaches one listener to the [`ScrollHub`].
//! 2. Each scroll sample is biased by the configured lookahead, the registry
//!    re-measures every section, and the classifier picks the active one.
//! 3. The result is written to an [`Observable`], which only notifies when
//!    the value actually changed.
//! 4. [`ScrollObserver::unmount`] (or drop) releases the listener exactly
//!    once; nothing is published afterwards.
//!
//! Work per event is one measurement and one containment test per section.
//! There is no throttling.

use std::cell::Cell;
use std::rc::Rc;

use stillpoint_layout::{
    ActiveSection, ActiveSectionClassifier, LayoutProbe, ScrollState, SectionId, SectionRegistry,
};
use tracing::debug;

use crate::config::{ConfigError, ScrollSpyConfig};
use crate::reactive::{Observable, ReadSignal, Subscription};
use crate::scroll_source::{ScrollHub, ScrollSubscription};

/// Mounted scroll spy for one page view.
#[derive(Debug)]
pub struct ScrollObserver {
    active: Observable<ActiveSection>,
    samples: Rc<Cell<u64>>,
    subscription: ScrollSubscription,
}

impl ScrollObserver {
    /// Attach to `hub` and start classifying scroll samples.
    ///
    /// The active section stays `Unset` until the first sample that lands
    /// inside a mounted section. A config that fails validation is rejected
    /// before anything is attached.
    pub fn mount<P>(
        hub: &ScrollHub,
        registry: Rc<SectionRegistry<P>>,
        config: &ScrollSpyConfig,
    ) -> Result<Self, ConfigError>
    where
        P: LayoutProbe + 'static,
    {
        let errors = config.validate();
        if !errors.is_empty() {
            return Err(ConfigError::Validation(errors));
        }
        let active = Observable::new(ActiveSection::Unset);
        let samples = Rc::new(Cell::new(0u64));
        let classifier = ActiveSectionClassifier::new(config.match_policy);
        let bias = config.lookahead_bias;
        let order: Vec<SectionId> = registry
            .list_sections()
            .iter()
            .map(|section| section.id.clone())
            .collect();

        let published = active.clone();
        let counter = Rc::clone(&samples);
        let subscription = hub.subscribe(move |raw_scroll| {
            counter.set(counter.get() + 1);
            let scroll = ScrollState::biased(raw_scroll, bias);
            let bounds = registry.snapshot_bounds();
            let next =
                published.with(|previous| classifier.classify(scroll, &bounds, &order, previous));
            if published.set(next.clone()) {
                debug!(section = ?next.id(), offset = scroll.offset, "active section changed");
            }
        });
        debug!(
            listener_id = subscription.id(),
            lookahead_bias = bias,
            "scroll observer mounted"
        );

        Ok(Self {
            active,
            samples,
            subscription,
        })
    }

    /// Most recently published active section.
    #[must_use]
    pub fn active(&self) -> ActiveSection {
        self.active.get()
    }

    /// Read-only handle for consumers (nav bar, navigation controller).
    #[must_use]
    pub fn active_signal(&self) -> ReadSignal<ActiveSection> {
        self.active.read_only()
    }

    /// Watch published changes. Redundant samples never reach the callback.
    pub fn subscribe(&self, callback: impl Fn(&ActiveSection) + 'static) -> Subscription {
        self.active.subscribe(callback)
    }

    /// Number of scroll samples processed so far.
    #[must_use]
    pub fn samples(&self) -> u64 {
        self.samples.get()
    }

    /// Number of distinct values published so far.
    #[must_use]
    pub fn publications(&self) -> u64 {
        self.active.version()
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.subscription.is_active()
    }

    /// Release the scroll listener. Safe to call any number of times; returns
    /// `true` only for the call that released it.
    pub fn unmount(&self) -> bool {
        let released = self.subscription.unsubscribe();
        if released {
            debug!(
                samples = self.samples.get(),
                publications = self.active.version(),
                "scroll observer unmounted"
            );
        }
        released
    }
}
