#![forbid(unsafe_code)]

//! Viewport scroll event source with scoped subscriptions.
//!
//! [`ScrollHub`] stands in for the page's native scroll notification: the
//! host calls [`ScrollHub::emit`] with the raw vertical scroll distance every
//! time the browser fires a scroll event, as often as it likes.
//!
//! Listeners are registered through [`ScrollHub::subscribe`], which returns a
//! [`ScrollSubscription`] guard. Releasing the guard (explicitly with
//! [`ScrollSubscription::unsubscribe`], or by dropping it) removes the
//! listener exactly once; repeated releases are no-ops.
//!
//! # Invariants
//!
//! 1. A listener never runs after its subscription was released, even when
//!    the release happens mid-dispatch from an earlier listener.
//! 2. Listeners run in registration order.
//! 3. Non-finite scroll samples are dropped before dispatch.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::cancellation::{CancellationSource, CancellationToken};

/// Identifier of one registered listener.
pub type ListenerId = u64;

type Listener = Rc<dyn Fn(f64)>;

struct Registered {
    id: ListenerId,
    token: CancellationToken,
    listener: Listener,
}

#[derive(Default)]
struct HubInner {
    next_id: ListenerId,
    listeners: Vec<Registered>,
}

/// Host-driven scroll event source.
///
/// Clones share the same listener list.
#[derive(Clone, Default)]
pub struct ScrollHub {
    inner: Rc<RefCell<HubInner>>,
}

impl std::fmt::Debug for ScrollHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScrollHub")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl ScrollHub {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for raw scroll samples.
    pub fn subscribe(&self, listener: impl Fn(f64) + 'static) -> ScrollSubscription {
        let cancel = CancellationSource::new();
        let id = {
            let mut inner = self.inner.borrow_mut();
            let id = inner.next_id;
            inner.next_id += 1;
            inner.listeners.push(Registered {
                id,
                token: cancel.token(),
                listener: Rc::new(listener),
            });
            id
        };
        debug!(listener_id = id, "scroll listener attached");
        ScrollSubscription {
            id,
            hub: Rc::downgrade(&self.inner),
            cancel,
        }
    }

    /// Deliver one scroll sample to every live listener. Returns how many
    /// listeners ran.
    pub fn emit(&self, raw_scroll: f64) -> usize {
        if !raw_scroll.is_finite() {
            trace!(raw_scroll, "dropping non-finite scroll sample");
            return 0;
        }
        let snapshot: Vec<(CancellationToken, Listener)> = {
            let mut inner = self.inner.borrow_mut();
            inner.listeners.retain(|r| !r.token.is_cancelled());
            inner
                .listeners
                .iter()
                .map(|r| (r.token.clone(), Rc::clone(&r.listener)))
                .collect()
        };

        let mut delivered = 0;
        for (token, listener) in snapshot {
            if token.is_cancelled() {
                continue;
            }
            listener(raw_scroll);
            delivered += 1;
        }
        delivered
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.borrow().listeners.len()
    }
}

/// Scoped registration of one scroll listener.
///
/// Released on [`unsubscribe`](Self::unsubscribe) or drop, whichever comes
/// first.
#[derive(Debug)]
pub struct ScrollSubscription {
    id: ListenerId,
    hub: Weak<RefCell<HubInner>>,
    cancel: CancellationSource,
}

impl ScrollSubscription {
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.cancel.is_cancelled()
    }

    /// Detach the listener. Returns `true` only for the call that actually
    /// released it.
    pub fn unsubscribe(&self) -> bool {
        if !self.cancel.cancel() {
            return false;
        }
        if let Some(hub) = self.hub.upgrade() {
            // If the list is borrowed, the next emit prunes the entry; the
            // cancelled token keeps it silent until then.
            if let Ok(mut inner) = hub.try_borrow_mut() {
                inner.listeners.retain(|r| r.id != self.id);
            }
        }
        debug!(listener_id = self.id, "scroll listener detached");
        true
    }
}

impl Drop for ScrollSubscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}
