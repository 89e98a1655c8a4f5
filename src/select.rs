use std::sync::Arc;

use crate::chan::Chan;
use crate::flavors::bounded;

/// One arm of a [`select`] call: a channel paired with the handler to run on
/// its value.
pub struct Case<'a, T, F: FnMut(T)> {
    chan: &'a Chan<T>,
    handler: F,
}

impl<'a, T, F: FnMut(T)> Case<'a, T, F> {
    /// Binds `handler` to `chan`.
    pub fn new(chan: &'a Chan<T>, handler: F) -> Case<'a, T, F> {
        Case { chan, handler }
    }
}

/// Object-safe view of a case, so arms with different element types can
/// share one dispatch loop.
pub trait SelectCase {
    /// Whether the case's channel can still produce a value.
    fn is_live(&self) -> bool;
    /// Registers a one-shot wake-up tagged with the case index.
    fn subscribe(&self, notify: &Arc<bounded::Channel<usize>>, tag: usize);
    /// Polls the channel; on a value, runs the handler and reports `true`.
    fn poll(&mut self) -> bool;
}

impl<T, F: FnMut(T)> SelectCase for Case<'_, T, F> {
    fn is_live(&self) -> bool {
        self.chan.is_live()
    }

    fn subscribe(&self, notify: &Arc<bounded::Channel<usize>>, tag: usize) {
        self.chan.subscribe(notify.clone(), tag);
    }

    fn poll(&mut self) -> bool {
        match self.chan.try_recv() {
            Some(value) => {
                (self.handler)(value);
                true
            }
            None => false,
        }
    }
}

/// Waits on every case at once and dispatches the first that becomes ready.
///
/// Cases are polled in declaration order, so when several channels are
/// ready the lowest-index case wins. At most one handler runs per call.
/// Returns `true` if a handler ran, and `false` once every case's channel
/// is closed and drained.
///
/// Prefer the [`select!`](crate::select!) macro, which builds the case
/// slice from `pat = chan => body` arms.
///
/// # Panics
///
/// Panics when called with no cases.
pub fn select(cases: &mut [&mut dyn SelectCase]) -> bool {
    assert!(!cases.is_empty(), "select requires at least one case");

    let notify = Arc::new(bounded::Channel::new(cases.len()));
    for (tag, case) in cases.iter().enumerate() {
        if case.is_live() {
            case.subscribe(&notify, tag);
        }
    }

    loop {
        for case in cases.iter_mut() {
            if case.poll() {
                return true;
            }
        }

        if !cases.iter().any(|case| case.is_live()) {
            return false;
        }

        // The tag says which channel fired, but a concurrent consumer may
        // already have taken its value; treat the wake-up as bare and
        // re-poll everything in priority order.
        let _ = notify.recv();

        // Subscriptions are consumed on every delivery; re-arm before the
        // next poll so a later delivery is not missed.
        for (tag, case) in cases.iter().enumerate() {
            if case.is_live() {
                case.subscribe(&notify, tag);
            }
        }
    }
}

/// Waits on multiple channels and dispatches the first ready case.
///
/// Each arm reads `pat = channel => body`. Arms are polled in declaration
/// order; at most one body runs per invocation. The macro evaluates to
/// `true` if a body ran and `false` once every channel is closed and
/// drained.
///
/// # Examples
///
/// ```rust
/// use oluk::{bounded, select};
///
/// let a = bounded::<i32>(1);
/// let b = bounded::<i32>(1);
///
/// b.send(20).unwrap();
///
/// let fired = select! {
///     v = a => panic!("a is empty: {}", v),
///     v = b => assert_eq!(v, 20),
/// };
/// assert!(fired);
/// ```
#[macro_export]
macro_rules! select {
    ($($name:pat = $ch:expr => $body:expr),+ $(,)?) => {
        $crate::select::select(&mut [
            $(&mut $crate::select::Case::new(&$ch, |$name| { $body; })
                as &mut dyn $crate::select::SelectCase),+
        ])
    };
}
