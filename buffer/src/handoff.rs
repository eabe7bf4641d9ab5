//! Fixed-capacity blocking FIFO with ownership transfer.

use std::error::Error;
use std::sync::{Arc, Condvar, Mutex};

use crate::error::{Done, QueueError};

/// A thread-safe bounded hand-off queue.
///
/// `HandoffQueue<T>` is a circular buffer with a fixed capacity. `push`
/// blocks when the queue is full and `pop` blocks when it is empty, so the
/// producer can never run more than `capacity` items ahead of the consumer.
/// Items are moved through the queue: once pushed, an item belongs to the
/// queue until the consumer pops it, and it is never observed partially
/// written or mutated in place.
///
/// # Semantics
///
/// - **pop**: blocks while empty; after `close_write`, drains remaining
///   items and then returns [`Done`]
/// - **push**: blocks while full; fails once the queue is closed
/// - **close_with_error**: unblocks both ends immediately
///
/// Cloning shares the same underlying queue, which is how the two stages of
/// a pipeline each get a handle.
pub struct HandoffQueue<T> {
    inner: Arc<QueueInner<T>>,
}

struct QueueInner<T> {
    state: Mutex<QueueState<T>>,
    not_full: Condvar,
    not_empty: Condvar,
}

struct QueueState<T> {
    slots: Vec<Option<T>>,
    head: usize,  // read position
    tail: usize,  // write position
    count: usize, // occupied slots
    close_write: bool,
    close_err: Option<Arc<dyn Error + Send + Sync>>,
}

impl<T> Clone for HandoffQueue<T> {
    fn clone(&self) -> Self {
        HandoffQueue {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> HandoffQueue<T> {
    /// Creates a new queue with the specified capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be greater than 0");
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);

        HandoffQueue {
            inner: Arc::new(QueueInner {
                state: Mutex::new(QueueState {
                    slots,
                    head: 0,
                    tail: 0,
                    count: 0,
                    close_write: false,
                    close_err: None,
                }),
                not_full: Condvar::new(),
                not_empty: Condvar::new(),
            }),
        }
    }

    /// Returns the number of items currently queued.
    pub fn len(&self) -> usize {
        let state = self.inner.state.lock().unwrap();
        state.count
    }

    /// Returns the queue capacity.
    pub fn capacity(&self) -> usize {
        let state = self.inner.state.lock().unwrap();
        state.slots.len()
    }

    /// Returns true if the queue is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns true if the queue is full.
    pub fn is_full(&self) -> bool {
        let state = self.inner.state.lock().unwrap();
        state.count == state.slots.len()
    }

    /// Returns the error that closed the queue, if any.
    pub fn error(&self) -> Option<Arc<dyn Error + Send + Sync>> {
        let state = self.inner.state.lock().unwrap();
        state.close_err.clone()
    }

    /// Closes the write side of the queue.
    ///
    /// No further pushes are accepted; the consumer drains any remaining
    /// items and then observes [`Done`]. Closing twice is a no-op.
    pub fn close_write(&self) {
        let mut state = self.inner.state.lock().unwrap();
        if state.close_write {
            return;
        }
        state.close_write = true;
        self.inner.not_empty.notify_all();
        self.inner.not_full.notify_all();
    }

    /// Closes the queue with the specified error.
    ///
    /// Both ends are unblocked immediately: blocked pushes fail with the
    /// error, blocked pops return [`Done`] without draining. The first
    /// error wins; later calls are no-ops.
    pub fn close_with_error<E>(&self, err: E)
    where
        E: Error + Send + Sync + 'static,
    {
        let mut state = self.inner.state.lock().unwrap();
        if state.close_err.is_some() {
            return;
        }
        state.close_err = Some(Arc::new(err));
        state.close_write = true;
        self.inner.not_empty.notify_all();
        self.inner.not_full.notify_all();
    }

    /// Pushes an item onto the queue, transferring ownership.
    ///
    /// Blocks while the queue is full until the consumer makes space.
    /// Preserves FIFO order across all pushes.
    pub fn push(&self, item: T) -> Result<(), QueueError> {
        let mut state = self.inner.state.lock().unwrap();

        loop {
            if let Some(ref err) = state.close_err {
                return Err(QueueError::ClosedWithError(Arc::clone(err)));
            }
            if state.close_write {
                return Err(QueueError::Closed);
            }
            if state.count < state.slots.len() {
                break;
            }
            state = self.inner.not_full.wait(state).unwrap();
        }

        let tail = state.tail;
        let capacity = state.slots.len();
        state.slots[tail] = Some(item);
        state.tail = (tail + 1) % capacity;
        state.count += 1;

        self.inner.not_empty.notify_one();
        Ok(())
    }

    /// Pops the next item from the queue, in push order.
    ///
    /// Blocks while the queue is empty until an item arrives. Returns
    /// `Err(Done)` once the queue is closed for writing and drained, or
    /// immediately after `close_with_error`.
    pub fn pop(&self) -> Result<T, Done> {
        let mut state = self.inner.state.lock().unwrap();

        loop {
            if state.close_err.is_some() {
                return Err(Done);
            }
            if state.count > 0 {
                break;
            }
            if state.close_write {
                return Err(Done);
            }
            state = self.inner.not_empty.wait(state).unwrap();
        }

        let head = state.head;
        let capacity = state.slots.len();
        let item = state.slots[head].take().unwrap();
        state.head = (head + 1) % capacity;
        state.count -= 1;

        self.inner.not_full.notify_one();
        Ok(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_push_pop_order() {
        let queue = HandoffQueue::<i32>::new(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        assert_eq!(queue.pop().unwrap(), 1);
        assert_eq!(queue.pop().unwrap(), 2);
        assert_eq!(queue.pop().unwrap(), 3);
    }

    #[test]
    fn test_capacity_and_len() {
        let queue = HandoffQueue::<i32>::new(4);
        assert_eq!(queue.capacity(), 4);
        assert_eq!(queue.len(), 0);
        assert!(queue.is_empty());
        assert!(!queue.is_full());

        for i in 0..4 {
            queue.push(i).unwrap();
        }
        assert_eq!(queue.len(), 4);
        assert!(queue.is_full());
    }

    #[test]
    fn test_close_write_drains() {
        let queue = HandoffQueue::<i32>::new(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.close_write();

        // Remaining items still come out in order
        assert_eq!(queue.pop().unwrap(), 1);
        assert_eq!(queue.pop().unwrap(), 2);

        // Then the consumer sees end of stream
        assert_eq!(queue.pop(), Err(Done));

        // And the producer cannot push
        assert!(matches!(queue.push(3), Err(QueueError::Closed)));
    }

    #[test]
    fn test_blocking_push() {
        let queue = HandoffQueue::<i32>::new(2);
        let tx = queue.clone();

        let producer = thread::spawn(move || {
            tx.push(1).unwrap();
            tx.push(2).unwrap();
            // Third push blocks until the consumer pops
            tx.push(3).unwrap();
        });

        // Give the producer time to fill the queue and block
        thread::sleep(Duration::from_millis(50));
        assert_eq!(queue.len(), 2);

        assert_eq!(queue.pop().unwrap(), 1);
        producer.join().unwrap();

        assert_eq!(queue.pop().unwrap(), 2);
        assert_eq!(queue.pop().unwrap(), 3);
    }

    #[test]
    fn test_blocking_pop() {
        let queue = HandoffQueue::<i32>::new(4);
        let rx = queue.clone();

        let consumer = thread::spawn(move || rx.pop().unwrap());

        // Give the consumer time to block
        thread::sleep(Duration::from_millis(10));
        queue.push(42).unwrap();

        assert_eq!(consumer.join().unwrap(), 42);
    }

    #[test]
    fn test_never_exceeds_capacity() {
        let queue = HandoffQueue::<i32>::new(3);
        let tx = queue.clone();

        let producer = thread::spawn(move || {
            for i in 0..50 {
                tx.push(i).unwrap();
            }
            tx.close_write();
        });

        // Slow consumer: the producer converges to our pace once the
        // queue fills, and the occupancy bound holds throughout.
        let mut collected = Vec::new();
        loop {
            assert!(queue.len() <= queue.capacity());
            match queue.pop() {
                Ok(item) => collected.push(item),
                Err(Done) => break,
            }
            thread::sleep(Duration::from_micros(200));
        }

        producer.join().unwrap();
        assert_eq!(collected, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_fifo_across_threads() {
        let queue = HandoffQueue::<i32>::new(4);
        let tx = queue.clone();

        let producer = thread::spawn(move || {
            for i in 0..100 {
                tx.push(i).unwrap();
            }
            tx.close_write();
        });

        let mut collected = Vec::new();
        while let Ok(item) = queue.pop() {
            collected.push(item);
        }

        producer.join().unwrap();
        assert_eq!(collected.len(), 100);
        for (i, &item) in collected.iter().enumerate() {
            assert_eq!(item, i as i32);
        }
    }

    #[test]
    fn test_wrap_around() {
        let queue = HandoffQueue::<i32>::new(3);
        queue.push(1).unwrap();
        queue.push(2).unwrap();
        queue.push(3).unwrap();

        assert_eq!(queue.pop().unwrap(), 1);
        assert_eq!(queue.pop().unwrap(), 2);

        queue.push(4).unwrap();
        queue.push(5).unwrap();

        assert_eq!(queue.pop().unwrap(), 3);
        assert_eq!(queue.pop().unwrap(), 4);
        assert_eq!(queue.pop().unwrap(), 5);
    }

    #[test]
    fn test_ownership_transfer() {
        // Non-Clone payloads move through the queue intact.
        struct Payload(Vec<u8>);

        let queue = HandoffQueue::<Payload>::new(2);
        queue.push(Payload(vec![1, 2, 3])).unwrap();

        let item = queue.pop().unwrap();
        assert_eq!(item.0, vec![1, 2, 3]);
    }

    #[test]
    fn test_close_with_error_unblocks_producer() {
        let queue = HandoffQueue::<i32>::new(1);
        queue.push(1).unwrap();

        let tx = queue.clone();
        let producer = thread::spawn(move || {
            // Queue is full; this blocks until the poison lands
            tx.push(2)
        });

        thread::sleep(Duration::from_millis(20));
        queue.close_with_error(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "sink write failed",
        ));

        let result = producer.join().unwrap();
        assert!(matches!(result, Err(QueueError::ClosedWithError(_))));
        assert!(queue.error().is_some());
    }

    #[test]
    fn test_close_with_error_unblocks_consumer() {
        let queue = HandoffQueue::<i32>::new(2);
        let rx = queue.clone();

        let consumer = thread::spawn(move || rx.pop());

        thread::sleep(Duration::from_millis(20));
        queue.close_with_error(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "peer gone",
        ));

        assert_eq!(consumer.join().unwrap(), Err(Done));
    }

    #[test]
    fn test_close_with_error_skips_drain() {
        let queue = HandoffQueue::<i32>::new(4);
        queue.push(1).unwrap();
        queue.push(2).unwrap();

        queue.close_with_error(std::io::Error::new(
            std::io::ErrorKind::BrokenPipe,
            "fatal",
        ));

        // Poison drops queued items on the floor: the consumer stops now.
        assert_eq!(queue.pop(), Err(Done));
    }

    #[test]
    fn test_first_error_wins() {
        let queue = HandoffQueue::<i32>::new(1);
        queue.close_with_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "first"));
        queue.close_with_error(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "second"));

        let err = queue.error().unwrap();
        assert!(err.to_string().contains("first"));
    }
}
