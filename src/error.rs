use std::fmt;

/// Error returned by a send on a closed channel.
///
/// The undelivered value is handed back inside the error.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct SendError<T>(pub T);

impl<T> SendError<T> {
    /// Consumes the error, yielding the value that failed to send.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> fmt::Debug for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SendError(..)")
    }
}

impl<T> fmt::Display for SendError<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sending on a closed channel")
    }
}

impl<T> std::error::Error for SendError<T> {}

/// Error returned when a mandatory receive finds the channel closed and
/// drained.
///
/// The blocking [`recv`](crate::Chan::recv) itself never fails; it reports
/// absence as `None`. This type exists for
/// [`recv_value`](crate::Chan::recv_value), which composes a receive with a
/// sink that requires a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecvError;

impl fmt::Display for RecvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "receiving on a closed and drained channel")
    }
}

impl std::error::Error for RecvError {}
