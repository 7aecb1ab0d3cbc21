//! Section-partitioned state container
//!
//! State is split into named **sections**. Each section declares the actions
//! it listens to and a pure update function. Dispatching an action runs the
//! update function of every listening section, in registration order, and
//! notifies after each update.
//!
//! ```text
//!  dispatch(action)
//!       │
//!       ▼
//!  routing key ──► RoutingTable ──► [section 1, section 2, ...]
//!                                         │
//!                     for each: handler(action, value) -> value'
//!                               state[section] = value'
//!                               notifier.notify(section, state)
//! ```
//!
//! # Example
//!
//! ```rust
//! use section_store::{Section, Store};
//! use serde_json::json;
//!
//! let mut store: Store = Store::new();
//! store.register_section(
//!     Section::infallible("counter", json!({ "likes": 0, "dislikes": 0 }), |action, counter| {
//!         let mut next = counter.clone();
//!         match action.routing_key() {
//!             Some("ADD_LIKE") => next["likes"] = json!(counter["likes"].as_i64().unwrap_or(0) + 1),
//!             Some("ADD_DISLIKE") => {
//!                 next["dislikes"] = json!(counter["dislikes"].as_i64().unwrap_or(0) + 1)
//!             }
//!             _ => {}
//!         }
//!         next
//!     })
//!     .listen_to(["ADD_LIKE", "ADD_DISLIKE"]),
//! )?;
//!
//! store.dispatch("ADD_LIKE")?;
//! store.dispatch(json!({ "type": "ADD_DISLIKE" }))?;
//! store.dispatch("WOLOLO")?;
//!
//! assert_eq!(store.section("counter"), Some(&json!({ "likes": 1, "dislikes": 1 })));
//! # Ok::<(), section_store::StoreError>(())
//! ```
//!
//! To expose a store over a [`section_radio::Channel`] see [`StoreService`].

mod action;
mod error;
mod notifier;
mod routing;
mod section;
mod store;

pub mod service;

use std::collections::BTreeMap;

pub use action::Action;
pub use error::StoreError;
pub use notifier::{NoopNotifier, NotificationQueue, Notifier};
pub use routing::RoutingTable;
pub use section::{ActionHandler, Section};
pub use service::{RadioNotifier, SharedStore, StoreService};
pub use store::{Dispatched, Store};

// Re-export config types so consumers don't need the config crate directly
pub use section_store_config::{DuplicatePolicy, StoreConfig};

/// The state mapping: section name -> current value, ordered by name
pub type State<V> = BTreeMap<String, V>;
