use std::sync::{Arc, Mutex};

use crossbeam_utils::CachePadded;

use crate::error::{RecvError, SendError};
use crate::flavors::{bounded, rendezvous};

enum Flavor<T> {
    Bounded(bounded::Channel<T>),
    Rendezvous(rendezvous::Channel<T>),
}

/// A one-shot wake-up handle registered by a selecting waiter.
struct Subscriber {
    notify: Arc<bounded::Channel<usize>>,
    tag: usize,
}

struct Shared<T> {
    flavor: Flavor<T>,
    // Padded so subscriber traffic stays off the channel lock's cache line.
    subscribers: CachePadded<Mutex<Vec<Subscriber>>>,
}

/// A typed FIFO channel shared between producers and consumers.
///
/// Cloning a `Chan` yields another handle to the same channel; any handle
/// may send, receive, or close.
///
/// # Example
///
/// ```rust
/// use oluk::Chan;
///
/// let ch = Chan::new(2);
/// ch.send(1).unwrap();
/// assert_eq!(ch.recv(), Some(1));
/// ch.close();
/// assert_eq!(ch.recv(), None);
/// ```
pub struct Chan<T> {
    inner: Arc<Shared<T>>,
}

impl<T> Clone for Chan<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Chan<T> {
    /// Creates a channel. A capacity of `0` selects the rendezvous flavor,
    /// anything else a bounded buffer of that capacity.
    pub fn new(capacity: usize) -> Chan<T> {
        let flavor = if capacity == 0 {
            Flavor::Rendezvous(rendezvous::Channel::new())
        } else {
            Flavor::Bounded(bounded::Channel::new(capacity))
        };
        Chan {
            inner: Arc::new(Shared {
                flavor,
                subscribers: CachePadded::new(Mutex::new(Vec::new())),
            }),
        }
    }

    /// Sends a value, blocking until it is buffered (bounded) or taken by a
    /// receiver (rendezvous).
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => {
                ch.send(value)?;
                self.notify_subscribers();
                Ok(())
            }
            Flavor::Rendezvous(ch) => {
                // Subscribers must be woken after the value is visible in
                // the slot but before this sender parks on delivery: a
                // selecting receiver is the one expected to complete the
                // hand-off.
                let ticket = ch.deposit(value)?;
                self.notify_subscribers();
                ch.await_ticket(ticket)
            }
        }
    }

    /// Attempts to send without blocking, handing the value back on failure.
    ///
    /// A rendezvous channel always refuses: accepting would mean returning
    /// before a receiver has taken the value.
    pub fn try_send(&self, value: T) -> Result<(), T> {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => {
                ch.try_send(value)?;
                self.notify_subscribers();
                Ok(())
            }
            Flavor::Rendezvous(_) => Err(value),
        }
    }

    /// Receives a value, blocking while the channel is open and empty.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub fn recv(&self) -> Option<T> {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => ch.recv(),
            Flavor::Rendezvous(ch) => ch.recv(),
        }
    }

    /// Receives a value, failing with [`RecvError`] once the channel is
    /// closed and drained.
    pub fn recv_value(&self) -> Result<T, RecvError> {
        self.recv().ok_or(RecvError)
    }

    /// Attempts to receive without blocking.
    pub fn try_recv(&self) -> Option<T> {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => ch.try_recv(),
            Flavor::Rendezvous(ch) => ch.try_recv(),
        }
    }

    /// Closes the channel and wakes every parked party, including selecting
    /// waiters. Idempotent. Buffered values remain receivable.
    pub fn close(&self) {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => ch.close(),
            Flavor::Rendezvous(ch) => ch.close(),
        }
        // Selecting waiters re-poll and observe the channel is gone.
        self.notify_subscribers();
    }

    /// Returns `true` while the channel can still produce values: it is
    /// open, or closed with undrained values.
    pub fn is_live(&self) -> bool {
        match &self.inner.flavor {
            Flavor::Bounded(ch) => ch.is_live(),
            Flavor::Rendezvous(ch) => ch.is_live(),
        }
    }

    /// Registers a one-shot wake-up: the next delivery (or closure) pushes
    /// `tag` into `notify`.
    ///
    /// Subscriptions are consumed in bulk on every successful delivery;
    /// waiters that want further wake-ups register again.
    pub fn subscribe(&self, notify: Arc<bounded::Channel<usize>>, tag: usize) {
        let mut subs = self.inner.subscribers.lock().unwrap();
        subs.push(Subscriber { notify, tag });
    }

    /// Pushes each subscriber's tag into its notification channel, most
    /// recently registered first, then clears the list.
    ///
    /// Only the subscriber mutex is held here, and the pushes are
    /// non-blocking: a notification must never park a sender on an
    /// unrelated consumer, and the channel lock is never nested inside.
    fn notify_subscribers(&self) {
        let mut subs = self.inner.subscribers.lock().unwrap();
        for sub in subs.iter().rev() {
            let _ = sub.notify.try_send(sub.tag);
        }
        subs.clear();
    }
}
