//! Named channel with request/reply and publish/subscribe

use crate::{RadioError, Subscription};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Function answering a request on a channel
pub type Responder = Arc<dyn Fn(Value) -> Value + Send + Sync>;

#[derive(Default)]
struct ChannelInner {
    responders: HashMap<String, Responder>,
    subscribers: HashMap<String, Vec<Sender<Value>>>,
}

/// A named channel
///
/// Cheap to clone; clones share responders and subscribers.
#[derive(Clone)]
pub struct Channel {
    name: String,
    inner: Arc<Mutex<ChannelInner>>,
}

impl Channel {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            inner: Arc::new(Mutex::new(ChannelInner::default())),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn inner(&self) -> MutexGuard<'_, ChannelInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register the responder for `request`
    ///
    /// A channel has at most one responder per request name; registering a
    /// second one replaces the first.
    pub fn reply<F>(&self, request: &str, responder: F)
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        let previous = self
            .inner()
            .responders
            .insert(request.to_string(), Arc::new(responder));

        if previous.is_some() {
            log::debug!(
                "Channel '{}': replaced responder for '{}'",
                self.name,
                request
            );
        }
    }

    /// Whether a responder is registered for `request`
    pub fn has_responder(&self, request: &str) -> bool {
        self.inner().responders.contains_key(request)
    }

    /// Send a request and return the responder's answer
    ///
    /// The responder runs without the channel lock held, so it may itself
    /// trigger topics or issue requests on this channel.
    pub fn request(&self, request: &str, arg: Value) -> Result<Value, RadioError> {
        let responder = self
            .inner()
            .responders
            .get(request)
            .cloned()
            .ok_or_else(|| RadioError::NoResponder {
                channel: self.name.clone(),
                request: request.to_string(),
            })?;

        Ok(responder(arg))
    }

    /// Subscribe to `topic`
    pub fn subscribe(&self, topic: &str) -> Subscription {
        let (tx, rx) = mpsc::channel();
        self.inner()
            .subscribers
            .entry(topic.to_string())
            .or_default()
            .push(tx);
        Subscription::new(topic, rx)
    }

    /// Publish `payload` to every live subscriber of `topic`
    ///
    /// Returns the number of subscribers that received it.
    pub fn trigger(&self, topic: &str, payload: Value) -> usize {
        let mut inner = self.inner();
        let Some(senders) = inner.subscribers.get_mut(topic) else {
            return 0;
        };

        senders.retain(|tx| tx.send(payload.clone()).is_ok());
        let delivered = senders.len();
        if senders.is_empty() {
            inner.subscribers.remove(topic);
        }

        log::trace!(
            "Channel '{}': '{}' delivered to {} subscriber(s)",
            self.name,
            topic,
            delivered
        );
        delivered
    }

    /// Number of subscribers currently registered for `topic`
    ///
    /// Dropped subscriptions are only noticed on the next trigger.
    pub fn subscriber_count(&self, topic: &str) -> usize {
        self.inner().subscribers.get(topic).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner();
        let mut requests: Vec<&String> = inner.responders.keys().collect();
        requests.sort();
        f.debug_struct("Channel")
            .field("name", &self.name)
            .field("responders", &requests)
            .field("topics", &inner.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_request_without_responder() {
        let channel = Channel::new("store");
        let err = channel.request("GET", json!(null)).unwrap_err();
        assert_eq!(
            err,
            RadioError::NoResponder {
                channel: "store".to_string(),
                request: "GET".to_string(),
            }
        );
    }

    #[test]
    fn test_request_passes_argument() {
        let channel = Channel::new("store");
        channel.reply("ECHO", |arg| json!({ "echo": arg }));

        let answer = channel.request("ECHO", json!("first")).unwrap();
        assert_eq!(answer, json!({ "echo": "first" }));
    }

    #[test]
    fn test_reply_replaces_previous_responder() {
        let channel = Channel::new("store");
        channel.reply("GET", |_| json!(1));
        channel.reply("GET", |_| json!(2));

        assert_eq!(channel.request("GET", json!(null)).unwrap(), json!(2));
    }

    #[test]
    fn test_responder_can_trigger_on_same_channel() {
        let channel = Channel::new("store");
        let updates = channel.subscribe("counter:update");
        let inner = channel.clone();
        channel.reply("UPDATE", move |arg| {
            inner.trigger("counter:update", arg);
            Value::Null
        });

        channel.request("UPDATE", json!("ADD_LIKE")).unwrap();
        assert_eq!(updates.try_recv(), Some(json!("ADD_LIKE")));
    }

    #[test]
    fn test_trigger_reaches_all_subscribers_in_order() {
        let channel = Channel::new("store");
        let first = channel.subscribe("counter:update");
        let second = channel.subscribe("counter:update");

        assert_eq!(channel.trigger("counter:update", json!(1)), 2);
        assert_eq!(channel.trigger("counter:update", json!(2)), 2);

        assert_eq!(first.drain(), vec![json!(1), json!(2)]);
        assert_eq!(second.drain(), vec![json!(1), json!(2)]);
    }

    #[test]
    fn test_trigger_without_subscribers() {
        let channel = Channel::new("store");
        assert_eq!(channel.trigger("nobody:update", json!(1)), 0);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let channel = Channel::new("store");
        let kept = channel.subscribe("counter:update");
        drop(channel.subscribe("counter:update"));
        assert_eq!(channel.subscriber_count("counter:update"), 2);

        assert_eq!(channel.trigger("counter:update", json!(1)), 1);
        assert_eq!(channel.subscriber_count("counter:update"), 1);
        assert_eq!(kept.topic(), "counter:update");
    }

    #[test]
    fn test_topics_are_isolated() {
        let channel = Channel::new("store");
        let counter = channel.subscribe("counter:update");
        channel.trigger("other:update", json!(1));

        assert_eq!(counter.try_recv(), None);
    }
}
