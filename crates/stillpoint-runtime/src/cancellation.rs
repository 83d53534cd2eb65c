#![forbid(unsafe_code)]

//! Cancellation tokens for scoped subscriptions.
//!
//! A [`CancellationSource`] is the control side; [`CancellationToken`]s are
//! cheap clones handed to callbacks so they can check whether their owner has
//! been torn down. Cancellation is one-way and idempotent: the first
//! [`cancel`](CancellationSource::cancel) reports `true`, later calls report
//! `false` and change nothing.
//!
//! Dropping the source does **not** cancel; owners cancel explicitly (usually
//! from their own `Drop`).

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Observer side of a cancellation signal.
#[derive(Debug, Clone)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    #[inline]
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

/// Control side of a cancellation signal.
#[derive(Debug, Default)]
pub struct CancellationSource {
    cancelled: Arc<AtomicBool>,
}

impl CancellationSource {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn token(&self) -> CancellationToken {
        CancellationToken {
            cancelled: Arc::clone(&self.cancelled),
        }
    }

    /// Request cancellation. Returns `true` only for the call that flipped
    /// the state.
    pub fn cancel(&self) -> bool {
        !self.cancelled.swap(true, Ordering::AcqRel)
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}
