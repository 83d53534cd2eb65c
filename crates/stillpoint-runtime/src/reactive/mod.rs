#![forbid(unsafe_code)]

//! Published state cells consumed by the navigation bar.

pub mod observable;
pub mod read_only;

pub use observable::{Observable, Subscription};
pub use read_only::ReadSignal;
