#![forbid(unsafe_code)]

//! Read-only view of an [`Observable`] owned elsewhere.

use super::observable::{Observable, Subscription};

/// Handle that can read and watch a value but never write it.
///
/// Publishers keep the [`Observable`]; consumers get a `ReadSignal`.
pub struct ReadSignal<T> {
    source: Observable<T>,
}

impl<T> Clone for ReadSignal<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for ReadSignal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ReadSignal").field(&self.source).finish()
    }
}

impl<T: Clone + PartialEq + 'static> ReadSignal<T> {
    #[must_use]
    pub fn get(&self) -> T {
        self.source.get()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.source.with(f)
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        self.source.subscribe(callback)
    }

    #[must_use]
    pub fn version(&self) -> u64 {
        self.source.version()
    }
}

impl<T: Clone + PartialEq + 'static> Observable<T> {
    /// Hand out a read-only view of this value.
    #[must_use]
    pub fn read_only(&self) -> ReadSignal<T> {
        ReadSignal {
            source: self.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_tracks_source() {
        let obs = Observable::new(1);
        let view = obs.read_only();
        obs.set(4);
        assert_eq!(view.get(), 4);
        assert_eq!(view.version(), 1);
    }
}
