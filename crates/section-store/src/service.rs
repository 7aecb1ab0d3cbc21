//! Binding a store onto a radio channel
//!
//! ```text
//!  request("GET", null)        ──► full state
//!  request("GET", "counter")   ──► value of "counter" (null if absent)
//!  request("UPDATE", action)   ──► dispatch, null or { "error": ... }
//!
//!  after each section update   ──► trigger("<section>:update", full state)
//! ```
//!
//! The store is shared as `Arc<Mutex<Store<V>>>`, so requests coming from
//! several flows are applied one dispatch at a time.

use crate::notifier::Notifier;
use crate::{State, Store};
use anyhow::Context;
use section_radio::Channel;
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Request name for reading state or a single section
pub const GET: &str = "GET";

/// Request name for dispatching an action
pub const UPDATE: &str = "UPDATE";

/// A store shared between the owner and the channel responders
pub type SharedStore<V = Value> = Arc<Mutex<Store<V>>>;

/// Topic triggered after `section` was updated
pub fn update_topic(section: &str) -> String {
    format!("{}:update", section)
}

fn lock<V>(store: &SharedStore<V>) -> MutexGuard<'_, Store<V>> {
    store.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Publishes `<section>:update` with the full state on a channel
#[derive(Debug, Clone)]
pub struct RadioNotifier {
    channel: Channel,
}

impl RadioNotifier {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

impl<V: Serialize> Notifier<V> for RadioNotifier {
    fn notify(&self, section: &str, state: &State<V>) -> anyhow::Result<()> {
        let payload = serde_json::to_value(state)
            .with_context(|| format!("Failed to serialize state after '{}' update", section))?;
        self.channel.trigger(&update_topic(section), payload);
        Ok(())
    }
}

/// A store answering `GET` and `UPDATE` on a channel
///
/// ```rust
/// use section_radio::Radio;
/// use section_store::{Section, Store, StoreService};
/// use serde_json::json;
///
/// let radio = Radio::new();
/// let service = StoreService::bind(Store::shared(), radio.channel("store"));
/// service
///     .register_section(Section::passive("first", json!({ "one": 1 })))
///     .unwrap();
///
/// let channel = radio.channel("store");
/// assert_eq!(channel.request("GET", json!("first"))?, json!({ "one": 1 }));
/// assert_eq!(channel.request("GET", json!(null))?, json!({ "first": { "one": 1 } }));
/// # Ok::<(), section_radio::RadioError>(())
/// ```
pub struct StoreService<V = Value> {
    store: SharedStore<V>,
    channel: Channel,
}

impl<V> StoreService<V>
where
    V: Serialize + Send + 'static,
{
    /// Install the responders on `channel` and route notifications to it
    ///
    /// Replaces the store's notifier with a [`RadioNotifier`] for `channel`.
    pub fn bind(store: SharedStore<V>, channel: Channel) -> Self {
        lock(&store).set_notifier(RadioNotifier::new(channel.clone()));

        let reader = Arc::clone(&store);
        channel.reply(GET, move |arg| read(&lock(&reader), &arg));

        let writer = Arc::clone(&store);
        channel.reply(UPDATE, move |arg| update(&mut lock(&writer), arg));

        log::debug!("Store bound to channel '{}'", channel.name());
        Self { store, channel }
    }

    /// Register a section on the shared store
    pub fn register_section(&self, section: crate::Section<V>) -> Result<(), crate::StoreError> {
        lock(&self.store).register_section(section)
    }

    pub fn store(&self) -> &SharedStore<V> {
        &self.store
    }

    pub fn channel(&self) -> &Channel {
        &self.channel
    }
}

impl<V> Store<V> {
    /// New empty store wrapped for sharing
    pub fn shared() -> SharedStore<V> {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Wrap this store for sharing
    pub fn into_shared(self) -> SharedStore<V> {
        Arc::new(Mutex::new(self))
    }
}

/// Answer a `GET`: whole state for `null` or `""`, one section for a name
fn read<V: Serialize>(store: &Store<V>, arg: &Value) -> Value {
    let result = match arg {
        Value::Null => serde_json::to_value(store.state()),
        Value::String(name) if name.is_empty() => serde_json::to_value(store.state()),
        Value::String(name) => match store.section(name) {
            Some(value) => serde_json::to_value(value),
            None => return Value::Null,
        },
        other => {
            log::warn!("GET with unsupported argument: {}", other);
            return Value::Null;
        }
    };

    result.unwrap_or_else(|e| {
        log::error!("Failed to serialize state: {}", e);
        Value::Null
    })
}

/// Answer an `UPDATE` by dispatching the argument as an action
fn update<V>(store: &mut Store<V>, arg: Value) -> Value {
    match store.dispatch(arg) {
        Ok(_) => Value::Null,
        Err(e) => json!({ "error": format!("{:#}", anyhow::Error::from(e)) }),
    }
}
