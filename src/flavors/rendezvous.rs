use std::sync::{Condvar, Mutex};

use crate::error::SendError;

struct Inner<T> {
    slot: Option<T>,
    ticket: u64,
    closed: bool,
}

/// A zero-capacity hand-off channel: a send returns only after a receiver
/// has taken the value.
///
/// Each deposit is stamped with a monotonically increasing ticket. A sender
/// parked on delivery wakes delivered iff the slot is empty or the ticket
/// has moved past its own; the ticket is what tells "my value was taken"
/// apart from "the slot was reused by a later sender". Only senders advance
/// the ticket, so advancement past `t` implies the deposit stamped `t` was
/// consumed first.
pub struct Channel<T> {
    inner: Mutex<Inner<T>>,
    slot_free: Condvar,
    slot_filled: Condvar,
    ticket_advanced: Condvar,
}

impl<T> Channel<T> {
    /// Creates a rendezvous channel.
    pub fn new() -> Channel<T> {
        Channel {
            inner: Mutex::new(Inner {
                slot: None,
                ticket: 0,
                closed: false,
            }),
            slot_free: Condvar::new(),
            slot_filled: Condvar::new(),
            ticket_advanced: Condvar::new(),
        }
    }

    /// Sends a value, returning once a receiver has taken it.
    ///
    /// Fails with the value handed back when the channel is closed at entry
    /// or closes while the value is still undelivered.
    pub fn send(&self, value: T) -> Result<(), SendError<T>> {
        let ticket = self.deposit(value)?;
        self.await_ticket(ticket)
    }

    /// Deposits `value` in the slot and returns the stamped ticket without
    /// waiting for delivery. Pair with [`await_ticket`](Self::await_ticket);
    /// the façade notifies its subscribers in between.
    pub(crate) fn deposit(&self, value: T) -> Result<u64, SendError<T>> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if inner.closed {
                return Err(SendError(value));
            }
            if inner.slot.is_none() {
                inner.slot = Some(value);
                inner.ticket += 1;
                let ticket = inner.ticket;
                drop(inner);
                self.slot_filled.notify_one();
                return Ok(ticket);
            }
            inner = self.slot_free.wait(inner).unwrap();
        }
    }

    /// Blocks until the deposit stamped `ticket` has been taken.
    ///
    /// If the channel closed with the value still in the slot, the value is
    /// reclaimed and handed back: a failed send never leaves its value
    /// deliverable.
    pub(crate) fn await_ticket(&self, ticket: u64) -> Result<(), SendError<T>> {
        let mut inner = self.inner.lock().unwrap();
        while !inner.closed && inner.slot.is_some() && inner.ticket == ticket {
            inner = self.ticket_advanced.wait(inner).unwrap();
        }
        // The slot can only still hold our value if no later sender has
        // deposited over it.
        if inner.ticket == ticket {
            if let Some(value) = inner.slot.take() {
                return Err(SendError(value));
            }
        }
        Ok(())
    }

    /// Receives a value, blocking while the channel is open and the slot is
    /// empty.
    ///
    /// Returns `None` once the channel is closed with nothing deposited.
    pub fn recv(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        loop {
            if let Some(value) = inner.slot.take() {
                drop(inner);
                self.ticket_advanced.notify_one();
                self.slot_free.notify_one();
                return Some(value);
            }
            if inner.closed {
                return None;
            }
            inner = self.slot_filled.wait(inner).unwrap();
        }
    }

    /// Attempts to take a deposited value without blocking.
    pub fn try_recv(&self) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();
        let value = inner.slot.take()?;
        drop(inner);
        self.ticket_advanced.notify_one();
        self.slot_free.notify_one();
        Some(value)
    }

    /// Closes the channel. Idempotent.
    ///
    /// All three condition variables are broadcast: parked depositors must
    /// observe closure, and a sender parked on delivery must re-check the
    /// slot and its ticket to learn whether its value was taken in time.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        drop(inner);
        self.slot_free.notify_all();
        self.slot_filled.notify_all();
        self.ticket_advanced.notify_all();
    }

    /// Returns `true` while the channel can still produce a value.
    pub fn is_live(&self) -> bool {
        let inner = self.inner.lock().unwrap();
        !(inner.closed && inner.slot.is_none())
    }
}

impl<T> Default for Channel<T> {
    fn default() -> Channel<T> {
        Channel::new()
    }
}
