//! Error types for queue operations.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

/// Queue operation error.
///
/// Returned by `push` once the queue has been closed. Closure comes in two
/// flavors: plain closure of the write side, and closure with an attached
/// error carrying the reason the other stage went away.
#[derive(Debug, Clone)]
pub enum QueueError {
    /// Queue has been closed (write side).
    Closed,
    /// Queue has been closed with an associated error.
    ClosedWithError(Arc<dyn Error + Send + Sync>),
}

impl fmt::Display for QueueError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueueError::Closed => write!(f, "queue: closed"),
            QueueError::ClosedWithError(e) => write!(f, "queue: closed with error: {}", e),
        }
    }
}

impl Error for QueueError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            QueueError::ClosedWithError(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

/// Consumer completion marker.
///
/// Returned by `pop` when the queue has been closed for writing and every
/// remaining item has been consumed. It signals the end of the stream,
/// similar to `io::EOF` but for the iterator pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Done;

impl fmt::Display for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue drained")
    }
}

impl Error for Done {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_queue_error_display() {
        let err = QueueError::Closed;
        assert_eq!(format!("{}", err), "queue: closed");

        let io_err: Arc<dyn Error + Send + Sync> =
            Arc::new(io::Error::new(io::ErrorKind::BrokenPipe, "sink gone"));
        let err = QueueError::ClosedWithError(io_err);
        assert!(format!("{}", err).contains("sink gone"));
    }

    #[test]
    fn test_done_display() {
        assert_eq!(format!("{}", Done), "queue drained");
    }

    #[test]
    fn test_done_equality() {
        assert_eq!(Done, Done);
    }
}
