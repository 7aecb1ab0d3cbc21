use crate::notifier::{NoopNotifier, Notifier};
use crate::routing::RoutingTable;
use crate::section::ActionHandler;
use crate::{Action, Section, State, StoreError};
use section_store_config::{DuplicatePolicy, StoreConfig};
use serde_json::Value;
use std::collections::HashMap;

/// Outcome of a successful [`Store::dispatch`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dispatched {
    /// Routing key of the action, `None` when it was unroutable
    pub action: Option<String>,
    /// Sections that were updated, in update order
    pub updated: Vec<String>,
}

impl Dispatched {
    /// Whether the dispatch reached no section at all
    pub fn is_noop(&self) -> bool {
        self.updated.is_empty()
    }
}

/// Store - holds the sections and routes actions to them
///
/// Every section owns one slot of the state mapping, an update function and
/// a list of action identifiers it listens to. Dispatching an action runs the
/// update function of each listening section in registration order and
/// replaces the section's value with the result.
pub struct Store<V = Value> {
    state: State<V>,
    handlers: HashMap<String, ActionHandler<V>>,
    routes: RoutingTable,
    notifier: Box<dyn Notifier<V> + Send>,
    duplicates: DuplicatePolicy,
}

impl<V> Store<V> {
    pub fn new() -> Self {
        Self {
            state: State::new(),
            handlers: HashMap::new(),
            routes: RoutingTable::new(),
            notifier: Box::new(NoopNotifier),
            duplicates: DuplicatePolicy::default(),
        }
    }

    /// Store set up according to `config`
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new().with_duplicate_policy(config.duplicate_sections)
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    /// Replace the notifier called after each section update
    pub fn set_notifier<N>(&mut self, notifier: N)
    where
        N: Notifier<V> + Send + 'static,
    {
        self.notifier = Box::new(notifier);
    }

    /// Register a section
    ///
    /// Stores the initial value and handler under the section's name and
    /// appends the name to the routing entry of every action it listens to.
    ///
    /// Registering a name that already exists depends on the duplicate
    /// policy: `Replace` drops the old section's value, handler and routing
    /// entries before adding the new ones (the section moves to the end of
    /// the update order for its actions); `Reject` fails with
    /// [`StoreError::DuplicateSection`] and leaves the store untouched.
    pub fn register_section(&mut self, section: Section<V>) -> Result<(), StoreError> {
        let Section {
            name,
            initial,
            listen_to,
            handler,
        } = section;

        if name.is_empty() {
            return Err(StoreError::EmptySectionName);
        }

        if self.handlers.contains_key(&name) {
            match self.duplicates {
                DuplicatePolicy::Reject => return Err(StoreError::DuplicateSection(name)),
                DuplicatePolicy::Replace => {
                    let dropped = self.routes.remove_section(&name);
                    log::debug!(
                        "Replacing section '{}' ({} routing entries dropped)",
                        name,
                        dropped
                    );
                }
            }
        }

        for action in &listen_to {
            self.routes.add(action, &name);
        }
        log::debug!("Registered section '{}' listening to {:?}", name, listen_to);

        self.state.insert(name.clone(), initial);
        self.handlers.insert(name, handler);
        Ok(())
    }

    /// Current value of a section, `None` if it was never registered
    pub fn section(&self, name: &str) -> Option<&V> {
        self.state.get(name)
    }

    /// The full state mapping, section name -> current value
    pub fn state(&self) -> &State<V> {
        &self.state
    }

    pub fn contains_section(&self, name: &str) -> bool {
        self.state.contains_key(name)
    }

    /// Registered section names, sorted
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.state.keys().map(String::as_str)
    }

    /// Sections listening to `action`, in update order
    pub fn listeners(&self, action: &str) -> &[String] {
        self.routes.listeners(action)
    }

    pub fn len(&self) -> usize {
        self.state.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.is_empty()
    }

    /// Route an action to its listening sections
    ///
    /// For each listening section, in registration order, the handler is
    /// called with the action and the section's current value, the result
    /// replaces the value, and then the notifier is told about the section.
    /// Actions nobody listens to, and unroutable input, change nothing.
    ///
    /// # Errors
    ///
    /// A failing handler stops the dispatch. Sections updated before it keep
    /// their new values and have been notified; the failing section and all
    /// sections after it keep their old values. The error lists the sections
    /// that were already updated.
    ///
    /// A failing notifier stops the dispatch the same way, right after the
    /// section it was notifying about was updated.
    pub fn dispatch(&mut self, action: impl Into<Action>) -> Result<Dispatched, StoreError> {
        let action = action.into();
        let Some(key) = action.routing_key() else {
            log::trace!("Ignoring unroutable action: {:?}", action);
            return Ok(Dispatched::default());
        };

        let listeners = self.routes.listeners(key).to_vec();
        if listeners.is_empty() {
            log::trace!("No section listens to '{}'", key);
            return Ok(Dispatched {
                action: Some(key.to_string()),
                updated: Vec::new(),
            });
        }

        log::debug!("Action: {:?} -> {:?}", action, listeners);

        let mut updated = Vec::with_capacity(listeners.len());
        for name in listeners {
            let next = match self.apply(&name, &action) {
                Some(Ok(next)) => next,
                Some(Err(source)) => {
                    log::warn!("Section '{}' failed to handle '{}': {:#}", name, key, source);
                    return Err(StoreError::Handler {
                        section: name,
                        action: key.to_string(),
                        updated,
                        source,
                    });
                }
                None => continue,
            };

            self.state.insert(name.clone(), next);
            updated.push(name.clone());
            if let Err(source) = self.notifier.notify(&name, &self.state) {
                log::error!("Failed to notify about '{}' update: {:#}", name, source);
                return Err(StoreError::Notification {
                    section: name,
                    action: key.to_string(),
                    updated,
                    source,
                });
            }
        }

        Ok(Dispatched {
            action: Some(key.to_string()),
            updated,
        })
    }

    /// Run the handler of `name` against its current value
    fn apply(&self, name: &str, action: &Action) -> Option<anyhow::Result<V>> {
        let (Some(handler), Some(current)) = (self.handlers.get(name), self.state.get(name))
        else {
            log::error!("Routing entry for unknown section '{}'", name);
            return None;
        };
        Some(handler(action, current))
    }
}

impl<V> Default for Store<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Store<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &self.state)
            .field("routes", &self.routes)
            .field("duplicates", &self.duplicates)
            .finish_non_exhaustive()
    }
}
