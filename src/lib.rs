//! CSP-style typed channels with a multi-way `select!`.
//!
//! This crate provides blocking FIFO channels in two flavors behind a single
//! façade, plus a [`select!`] macro for waiting on several channels at once
//! and dispatching the first that becomes readable.
//!
//! # Key Features
//!
//! - **Two flavors, one handle**: a capacity of `0` builds a rendezvous
//!   channel, any other capacity a bounded buffer. Both are used through
//!   [`Chan`].
//! - **Rendezvous hand-off**: on a capacity-0 channel, `send` returns only
//!   after a receiver has taken the value. A ticket protocol distinguishes
//!   "my value was taken" from "the slot was reused by a later sender".
//! - **Graceful closure**: `close` is idempotent, wakes every parked party,
//!   and leaves already-buffered values receivable.
//! - **Multi-way select**: a `select!` macro (and a slice-based [`select`]
//!   function underneath) that polls cases in declaration order and parks on
//!   a notification channel instead of spinning.
//!
//! # Channel Flavors
//!
//! - [`bounded()`]: a channel with a buffer of fixed capacity. It blocks on
//!   send when full and on receive when empty.
//! - [`rendezvous()`]: a capacity-0 channel. Send and receive meet
//!   synchronously; neither returns without the other.
//!
//! # Example
//!
//! ```rust
//! use oluk::{bounded, rendezvous, select};
//! use std::thread;
//!
//! let numbers = bounded::<i32>(4);
//! let words = rendezvous::<String>();
//!
//! let tx = numbers.clone();
//! thread::spawn(move || {
//!     tx.send(10).unwrap();
//! });
//!
//! select! {
//!     n = numbers => assert_eq!(n, 10),
//!     w = words => panic!("nobody sends words: {}", w),
//! };
//! ```
//!
//! [`select`]: select::select

#![warn(missing_docs)]

/// Unified channel façade and subscriber plumbing.
pub mod chan;
/// Error types surfaced by channel operations.
pub mod error;
/// Channel flavors (bounded, rendezvous).
pub mod flavors;
/// Fixed-capacity ring buffer backing the bounded flavor.
pub mod ring;
/// Multi-way select over channels.
pub mod select;

pub use chan::Chan;
pub use error::{RecvError, SendError};

/// Creates a channel of the given capacity.
///
/// A capacity of `0` yields a rendezvous channel, any other capacity a
/// bounded one.
pub fn channel<T>(capacity: usize) -> Chan<T> {
    Chan::new(capacity)
}

/// Creates a channel with a buffer of fixed capacity.
///
/// # Panics
///
/// Panics if `capacity` is zero; use [`rendezvous()`] for that.
pub fn bounded<T>(capacity: usize) -> Chan<T> {
    assert!(capacity > 0, "bounded channel capacity must be at least 1");
    Chan::new(capacity)
}

/// Creates a rendezvous channel: every send waits for its receive.
pub fn rendezvous<T>() -> Chan<T> {
    Chan::new(0)
}
