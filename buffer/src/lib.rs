//! Bounded blocking hand-off queue.
//!
//! This crate provides [`HandoffQueue<T>`], a thread-safe FIFO mailbox with a
//! fixed capacity, used to decouple a producer stage from a consumer stage
//! running on separate threads:
//!
//! - `push` blocks while the queue is full, giving the producer natural
//!   backpressure from the consumer's pace
//! - `pop` blocks while the queue is empty
//! - items are moved in and moved out, never cloned: the producer hands
//!   ownership of each item to the consumer
//!
//! # Closing
//!
//! Two modes of shutdown are supported:
//!
//! - `close_write()`: no new pushes; the consumer drains remaining items and
//!   then observes [`Done`]
//! - `close_with_error()`: immediately unblocks both ends and surfaces the
//!   error to the producer
//!
//! # Example
//!
//! ```
//! use opuscast_buffer::HandoffQueue;
//! use std::thread;
//!
//! let queue = HandoffQueue::<i32>::new(4);
//! let tx = queue.clone();
//!
//! let producer = thread::spawn(move || {
//!     for i in 0..10 {
//!         tx.push(i).unwrap();
//!     }
//!     tx.close_write();
//! });
//!
//! let mut items = Vec::new();
//! while let Ok(item) = queue.pop() {
//!     items.push(item);
//! }
//!
//! producer.join().unwrap();
//! assert_eq!(items, (0..10).collect::<Vec<_>>());
//! ```

mod error;
mod handoff;

pub use error::{Done, QueueError};
pub use handoff::HandoffQueue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<HandoffQueue<i32>>();
    }

    #[test]
    fn test_queue_is_clone() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<HandoffQueue<i32>>();
    }
}
