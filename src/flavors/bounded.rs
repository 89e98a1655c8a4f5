use std::sync::{Condvar, Mutex};

use crate::error::SendError;
use crate::ring::RingBuffer;

struct Inner<T> {
    ring: RingBuffer<T>,
    closed: bool,
}

/// A channel with a fixed-capacity buffer, synchronized by a mutex and two
/// condition variables.
///
/// Sends block while the buffer is full, receives while it is empty. Closure
/// never discards buffered values; a closed channel drains in FIFO order
/// before reporting absence.
pub struct Channel<T> {
    inner: Mutex<Inner<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

impl<T> Channel<T> {
    /// Creates a bounded channel with the given capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero; that is the rendezvous flavor's job.
    pub fn new(capacity: usize) -> Channel<T> {
        Channel {
            inner: Mutex::new(Inner {
                ring: RingBuffer::new(capacity),
                closed: false,
            }),
            not_full: Condvar::new(),
            not_empty: Condvar::new(),
        }
    }

    /// Sends a value, blocking while the buffer is full.
    ///
    /// Fails only when the channel is observed closed, handing the value
    /// back inside the error.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if inner.closed {
                return Err(SendError(value));
            }
            if !inner.ring.is_full() {
                inner.ring.push(value);
                drop(inner);
                self.not_empty.notify_one();
                return Ok(());
            }
            inner = self.not_full.wait(inner).unwrap();
        }
    }

    /// Attempts to send without blocking.
    ///
    /// Hands the value back when the channel is closed or the buffer is
    /// full.
    pub fn try_send(&self, value: T) -> Result<(), T> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed || inner.ring.is_full() {
            return Err(value);
        }
        inner.ring.push(value);
        drop(inner);
        self.not_empty.notify_one();
        Ok(())
    }

    /// Receives a value, blocking while the channel is open and empty.
    ///
    /// Returns `None` once the channel is closed and drained.
    pub fn recv(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(value) = inner.ring.try_pop() {
                drop(inner);
                self.not_full.notify_one();
                return Some(value);
            }
            if inner.closed {
                return None;
            }
            inner = self.not_empty.wait(inner).unwrap();
        }
    }

    /// Attempts to receive without blocking. Does not consult the closed
    /// flag.
    pub fn try_recv(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        let value = inner.ring.try_pop()?;
        drop(inner);
        self.not_full.notify_one();
        Some(value)
    }

    /// Closes the channel. Idempotent.
    ///
    /// Both condition variables are broadcast since either side may be
    /// parked. Buffered values remain receivable.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        drop(inner);
        self.not_full.notify_all();
        self.not_empty.notify_all();
    }

    /// Returns `true` while the channel can still produce values, i.e. it
    /// is open or holds undrained values.
    pub fn is_live(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        !(inner.closed && inner.ring.is_empty())
    }

    /// Returns `true` if no values are buffered.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().unwrap().ring.is_empty()
    }

    /// Returns the buffer capacity.
    pub fn capacity(&self) -> usize {
        self.inner.lock().unwrap().ring.capacity()
    }
}
