//! In-memory radio for talking to a state container
//!
//! A [`Radio`] hands out named [`Channel`]s. Every channel offers two styles
//! of communication:
//!
//! - **request/reply**: one responder per request name, answering with a value
//! - **publish/subscribe**: any number of subscribers per topic
//!
//! ```text
//!  caller ── request("GET") ──►┌─────────┐── responder ──► value
//!                              │ Channel │
//!  store ─── trigger(topic) ──►└─────────┘── Subscription(s)
//! ```
//!
//! All payloads are `serde_json::Value`, so the channel is agnostic of what
//! the participants exchange.
//!
//! # Example
//!
//! ```rust
//! use section_radio::Radio;
//! use serde_json::json;
//!
//! let radio = Radio::new();
//! let channel = radio.channel("store");
//!
//! channel.reply("GET", |_| json!({ "counter": { "likes": 0 } }));
//! let state = channel.request("GET", json!(null))?;
//! assert_eq!(state["counter"]["likes"], 0);
//!
//! let updates = channel.subscribe("counter:update");
//! channel.trigger("counter:update", json!({ "likes": 1 }));
//! assert_eq!(updates.try_recv(), Some(json!({ "likes": 1 })));
//! # Ok::<(), section_radio::RadioError>(())
//! ```

mod channel;
mod error;
mod subscription;

pub use channel::{Channel, Responder};
pub use error::RadioError;
pub use subscription::Subscription;

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Registry of named channels
///
/// Cloning a `Radio` yields another handle onto the same registry, so every
/// clone sees the same channels.
#[derive(Clone, Default)]
pub struct Radio {
    channels: Arc<Mutex<HashMap<String, Channel>>>,
}

impl Radio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the channel with the given name, creating it on first use
    pub fn channel(&self, name: &str) -> Channel {
        let mut channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        channels
            .entry(name.to_string())
            .or_insert_with(|| {
                log::debug!("Radio: opening channel '{}'", name);
                Channel::new(name)
            })
            .clone()
    }

    /// Names of all channels opened so far
    pub fn channel_names(&self) -> Vec<String> {
        let channels = self
            .channels
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<String> = channels.keys().cloned().collect();
        names.sort();
        names
    }
}

impl std::fmt::Debug for Radio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Radio")
            .field("channels", &self.channel_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_is_shared_by_name() {
        let radio = Radio::new();
        radio.channel("store").reply("PING", |_| json!("pong"));

        let answer = radio.channel("store").request("PING", json!(null)).unwrap();
        assert_eq!(answer, json!("pong"));
    }

    #[test]
    fn test_cloned_radio_sees_same_channels() {
        let radio = Radio::new();
        let clone = radio.clone();
        clone.channel("store").reply("PING", |_| json!("pong"));

        assert!(radio.channel("store").has_responder("PING"));
        assert_eq!(radio.channel_names(), vec!["store".to_string()]);
    }

    #[test]
    fn test_channels_are_isolated() {
        let radio = Radio::new();
        radio.channel("store").reply("PING", |_| json!("pong"));

        assert!(!radio.channel("other").has_responder("PING"));
    }
}
