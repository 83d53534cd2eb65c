#![forbid(unsafe_code)]

//! Published UI state with change-only notification.
//!
//! The active section and the menu state are both held in an
//! [`Observable`]. Writers call [`Observable::set`]; a value equal to the one
//! already held is discarded, so a burst of scroll samples inside one section
//! reaches the nav bar as a single publication.
//!
//! Listeners are held weakly. The [`Subscription`] returned by
//! [`Observable::subscribe`] owns the callback, and dropping it is the only
//! way to stop notifications. Dead entries are swept on the next publication.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use tracing::{debug, info_span};
use web_time::Instant;

type Listener<T> = Rc<dyn Fn(&T)>;

struct Shared<T> {
    current: T,
    /// Bumped once per published change.
    revision: u64,
    listeners: Vec<Weak<dyn Fn(&T)>>,
}

/// Shared value cell that tells its listeners when it changes.
///
/// Every clone reads and writes the same cell. Listeners run in the order
/// they subscribed and always see the value that was just stored.
pub struct Observable<T> {
    shared: Rc<RefCell<Shared<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        let shared = Rc::clone(&self.shared);
        Self { shared }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let shared = self.shared.borrow();
        f.debug_struct("Observable")
            .field("current", &shared.current)
            .field("revision", &shared.revision)
            .finish_non_exhaustive()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    #[must_use]
    pub fn new(initial: T) -> Self {
        let shared = Shared {
            current: initial,
            revision: 0,
            listeners: Vec::new(),
        };
        Self {
            shared: Rc::new(RefCell::new(shared)),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        self.with(T::clone)
    }

    /// Run `f` against the held value.
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        let shared = self.shared.borrow();
        f(&shared.current)
    }

    /// Replace the held value. Returns `false`, and notifies nobody, when
    /// `next` equals what is already there.
    ///
    /// Listeners may read or write this observable while being notified.
    pub fn set(&self, next: T) -> bool {
        let changed = {
            let mut shared = self.shared.borrow_mut();
            let changed = shared.current != next;
            if changed {
                shared.current = next;
                shared.revision += 1;
            }
            changed
        };
        self.publish_if(changed)
    }

    /// Edit the held value in place. Publishes only when the edit left it
    /// different from before.
    pub fn update(&self, edit: impl FnOnce(&mut T)) -> bool {
        let changed = {
            let mut shared = self.shared.borrow_mut();
            let snapshot = shared.current.clone();
            edit(&mut shared.current);
            let changed = shared.current != snapshot;
            if changed {
                shared.revision += 1;
            }
            changed
        };
        self.publish_if(changed)
    }

    /// Watch for changes until the returned guard is dropped.
    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let listener: Listener<T> = Rc::new(callback);
        let weak = Rc::downgrade(&listener);
        self.shared.borrow_mut().listeners.push(weak);
        Subscription {
            _listener: Box::new(listener),
        }
    }

    /// Number of changes published so far.
    #[must_use]
    pub fn version(&self) -> u64 {
        self.shared.borrow().revision
    }

    /// Listener slots, counting dropped ones that have not been swept yet.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.shared.borrow().listeners.len()
    }

    fn publish_if(&self, changed: bool) -> bool {
        if changed {
            self.publish();
        }
        changed
    }

    fn publish(&self) {
        // The borrow ends before any listener runs.
        let (live, value, version) = {
            let mut shared = self.shared.borrow_mut();
            let mut live: Vec<Listener<T>> = Vec::with_capacity(shared.listeners.len());
            shared.listeners.retain(|weak| match weak.upgrade() {
                Some(listener) => {
                    live.push(listener);
                    true
                }
                None => false,
            });
            (live, shared.current.clone(), shared.revision)
        };
        if live.is_empty() {
            return;
        }

        let subscribers_notified = live.len() as u64;
        let started = Instant::now();
        let span = info_span!(
            "scrollspy.publish",
            version,
            subscribers_notified,
            duration_us = tracing::field::Empty
        );
        let _guard = span.enter();
        live.iter().for_each(|listener| listener(&value));
        let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        span.record("duration_us", duration_us);
        debug!(version, subscribers_notified, duration_us, "published change");
    }
}

/// Keeps one listener alive. Drop it to unsubscribe.
pub struct Subscription {
    _listener: Box<dyn std::any::Any>,
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Subscription")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn set_bumps_version_only_on_change() {
        let obs = Observable::new(1);
        assert!(!obs.set(1));
        assert_eq!(obs.version(), 0);
        assert!(obs.set(2));
        assert_eq!(obs.get(), 2);
        assert_eq!(obs.version(), 1);
    }

    #[test]
    fn equal_writes_do_not_notify() {
        let obs = Observable::new(String::from("hero"));
        let hits = Rc::new(Cell::new(0u32));
        let hits_clone = Rc::clone(&hits);
        let _sub = obs.subscribe(move |_| hits_clone.set(hits_clone.get() + 1));

        obs.set("about".into());
        obs.set("about".into());
        obs.set("contact".into());
        assert_eq!(hits.get(), 2);
    }

    #[test]
    fn dropped_guard_stops_callbacks() {
        let obs = Observable::new(0);
        let seen = Rc::new(Cell::new(0));
        let seen_clone = Rc::clone(&seen);
        let sub = obs.subscribe(move |v| seen_clone.set(*v));
        obs.set(5);
        drop(sub);
        obs.set(9);
        assert_eq!(seen.get(), 5);
        assert_eq!(obs.listener_count(), 0, "dead subscriber pruned on notify");
    }

    #[test]
    fn update_reports_change() {
        let obs = Observable::new(vec![1]);
        assert!(obs.update(|v| v.push(2)));
        assert!(!obs.update(|v| v[0] = 1));
        assert_eq!(obs.with(Vec::len), 2);
    }

    #[test]
    fn reentrant_read_from_callback() {
        let obs = Observable::new(0);
        let mirror = Rc::new(Cell::new(0));
        let (obs_clone, mirror_clone) = (obs.clone(), Rc::clone(&mirror));
        let _sub = obs.subscribe(move |_| mirror_clone.set(obs_clone.get()));
        obs.set(3);
        assert_eq!(mirror.get(), 3);
    }

    #[test]
    fn subscribers_called_in_registration_order() {
        let obs = Observable::new(0);
        let log = Rc::new(RefCell::new(Vec::new()));
        let (a, b) = (Rc::clone(&log), Rc::clone(&log));
        let _first = obs.subscribe(move |_| a.borrow_mut().push("first"));
        let _second = obs.subscribe(move |_| b.borrow_mut().push("second"));
        obs.set(1);
        assert_eq!(*log.borrow(), vec!["first", "second"]);
    }
}
