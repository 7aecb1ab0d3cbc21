//! Post-update notifications
//!
//! After the store replaces a section's value it calls
//! [`Notifier::notify`] with the section name and the full state. The store
//! always mutates first and notifies second, one section at a time, so a
//! notifier observes every intermediate state of a dispatch.
//!
//! A notifier is free to deliver later: [`NotificationQueue`] only records
//! which sections changed and leaves delivery to whoever drains it.
//!
//! A notifier that cannot deliver returns an error. The store reports it as
//! [`StoreError::Notification`](crate::StoreError::Notification) and stops
//! the dispatch there.

use crate::State;
use std::sync::{Arc, Mutex, PoisonError};

/// Receives one call per updated section
pub trait Notifier<V> {
    /// `section` was just updated; `state` already contains its new value
    fn notify(&self, section: &str, state: &State<V>) -> anyhow::Result<()>;
}

/// Notifier that drops every notification
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotifier;

impl<V> Notifier<V> for NoopNotifier {
    fn notify(&self, _section: &str, _state: &State<V>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Records updated section names for deferred delivery
///
/// Clones share the same queue, so keep one handle and give the other to the
/// store:
///
/// ```rust
/// use section_store::{NotificationQueue, Section, Store};
///
/// let queue = NotificationQueue::new();
/// let mut store: Store<i64> = Store::new();
/// store.set_notifier(queue.clone());
/// store
///     .register_section(Section::infallible("count", 0, |_, n| n + 1).listen_to(["TICK"]))
///     .unwrap();
///
/// store.dispatch("TICK").unwrap();
/// store.dispatch("TICK").unwrap();
/// assert_eq!(queue.drain(), vec!["count", "count"]);
/// assert!(queue.is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    pending: Arc<Mutex<Vec<String>>>,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take all recorded section names, oldest first
    pub fn drain(&self) -> Vec<String> {
        std::mem::take(&mut *self.pending.lock().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<V> Notifier<V> for NotificationQueue {
    fn notify(&self, section: &str, _state: &State<V>) -> anyhow::Result<()> {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(section.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_drains_in_order() {
        let queue = NotificationQueue::new();
        let state: State<i32> = State::new();
        Notifier::<i32>::notify(&queue, "first", &state).unwrap();
        Notifier::<i32>::notify(&queue, "second", &state).unwrap();

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain(), vec!["first", "second"]);
        assert!(queue.drain().is_empty());
    }

    #[test]
    fn test_queue_clones_share_pending() {
        let queue = NotificationQueue::new();
        let handle = queue.clone();
        Notifier::<i32>::notify(&handle, "first", &State::new()).unwrap();

        assert_eq!(queue.drain(), vec!["first"]);
        assert!(handle.is_empty());
    }
}
