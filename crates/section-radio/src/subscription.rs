//! Receiving end of a topic subscription

use serde_json::Value;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// Handle returned by [`Channel::subscribe`](crate::Channel::subscribe)
///
/// Payloads are buffered until read. Dropping the subscription unsubscribes;
/// the channel prunes it on the next trigger of the topic.
#[derive(Debug)]
pub struct Subscription {
    topic: String,
    rx: Receiver<Value>,
}

impl Subscription {
    pub(crate) fn new(topic: &str, rx: Receiver<Value>) -> Self {
        Self {
            topic: topic.to_string(),
            rx,
        }
    }

    /// Topic this subscription listens to
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Take the next buffered payload without waiting
    pub fn try_recv(&self) -> Option<Value> {
        self.rx.try_recv().ok()
    }

    /// Wait up to `timeout` for the next payload
    pub fn recv_timeout(&self, timeout: Duration) -> Option<Value> {
        self.rx.recv_timeout(timeout).ok()
    }

    /// Take every buffered payload, oldest first
    pub fn drain(&self) -> Vec<Value> {
        self.rx.try_iter().collect()
    }
}
