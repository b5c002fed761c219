//! Work queue and completion signal shared by all workers.

use crate::pipeline::types::DecodedMessage;
use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Result of one bounded-wait dequeue.
#[derive(Debug, PartialEq)]
pub enum Poll {
    Message(DecodedMessage),
    /// Nothing arrived within the timeout. Not an error.
    Empty,
    /// Every sender is gone and the queue is drained.
    Disconnected,
}

/// Unbounded multi-producer multi-consumer FIFO of decoded recordings.
///
/// Each message is delivered to at most one consumer.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    tx: Sender<DecodedMessage>,
    rx: Receiver<DecodedMessage>,
}

impl WorkQueue {
    pub fn new() -> Self {
        let (tx, rx) = unbounded();
        Self { tx, rx }
    }

    /// Splits into the producer and consumer ends.
    pub fn split(self) -> (Sender<DecodedMessage>, Receiver<DecodedMessage>) {
        (self.tx, self.rx)
    }
}

impl Default for WorkQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Waits up to `timeout` for the next message.
pub fn poll(rx: &Receiver<DecodedMessage>, timeout: Duration) -> Poll {
    match rx.recv_timeout(timeout) {
        Ok(message) => Poll::Message(message),
        Err(RecvTimeoutError::Timeout) => Poll::Empty,
        Err(RecvTimeoutError::Disconnected) => Poll::Disconnected,
    }
}

/// Broadcast "done" flag. Setting it more than once has no further effect.
#[derive(Debug, Clone, Default)]
pub struct CompletionSignal {
    done: Arc<AtomicBool>,
}

impl CompletionSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the flag. Returns `true` only for the call that changed it.
    pub fn set(&self) -> bool {
        !self.done.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.done.load(Ordering::SeqCst)
    }
}
