//! Section descriptions handed to [`Store::register_section`](crate::Store::register_section)

use crate::Action;

/// Update function of a section: `(action, current value) -> next value`
///
/// The returned value replaces the section wholesale. Returning an error
/// stops the dispatch that invoked the handler.
pub type ActionHandler<V> = Box<dyn Fn(&Action, &V) -> anyhow::Result<V> + Send>;

/// Everything the store needs to know about a section
///
/// ```rust
/// use section_store::Section;
///
/// let counter = Section::infallible("counter", 0_i64, |action, count| {
///     match action.routing_key() {
///         Some("INCREMENT") => count + 1,
///         Some("DECREMENT") => count - 1,
///         _ => *count,
///     }
/// })
/// .listen_to(["INCREMENT", "DECREMENT"]);
///
/// assert_eq!(counter.name(), "counter");
/// assert_eq!(counter.interests(), ["INCREMENT", "DECREMENT"]);
/// ```
pub struct Section<V> {
    pub(crate) name: String,
    pub(crate) initial: V,
    pub(crate) listen_to: Vec<String>,
    pub(crate) handler: ActionHandler<V>,
}

impl<V> Section<V> {
    /// Section with a fallible handler and no interests yet
    pub fn new<F>(name: impl Into<String>, initial: V, handler: F) -> Self
    where
        F: Fn(&Action, &V) -> anyhow::Result<V> + Send + 'static,
    {
        Self {
            name: name.into(),
            initial,
            listen_to: Vec::new(),
            handler: Box::new(handler),
        }
    }

    /// Section whose handler cannot fail
    pub fn infallible<F>(name: impl Into<String>, initial: V, handler: F) -> Self
    where
        F: Fn(&Action, &V) -> V + Send + 'static,
    {
        Self::new(name, initial, move |action, current| {
            Ok(handler(action, current))
        })
    }

    /// Add action identifiers this section reacts to
    ///
    /// Order is kept; an identifier listed more than once is only kept once.
    pub fn listen_to<I, S>(mut self, actions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for action in actions {
            let action = action.into();
            if !self.listen_to.contains(&action) {
                self.listen_to.push(action);
            }
        }
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn initial(&self) -> &V {
        &self.initial
    }

    /// Action identifiers this section listens to, in registration order
    pub fn interests(&self) -> &[String] {
        &self.listen_to
    }
}

impl<V: Clone + Send + 'static> Section<V> {
    /// Section that is only ever read, never updated by actions
    ///
    /// Its handler returns the current value unchanged, so even if interests
    /// are added later the value stays as registered.
    pub fn passive(name: impl Into<String>, initial: V) -> Self {
        Self::infallible(name, initial, |_, current| current.clone())
    }
}

impl<V: std::fmt::Debug> std::fmt::Debug for Section<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Section")
            .field("name", &self.name)
            .field("initial", &self.initial)
            .field("listen_to", &self.listen_to)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listen_to_keeps_order_and_drops_repeats() {
        let section = Section::passive("counter", 0)
            .listen_to(["ADD_LIKE", "ADD_DISLIKE"])
            .listen_to(vec!["ADD_LIKE".to_string(), "RESET".to_string()]);

        assert_eq!(section.interests(), ["ADD_LIKE", "ADD_DISLIKE", "RESET"]);
    }

    #[test]
    fn test_passive_handler_returns_current_value() {
        let section = Section::passive("first", vec![1, 2]);
        let next = (section.handler)(&Action::new("ANYTHING"), &vec![3]).unwrap();
        assert_eq!(next, vec![3]);
        assert_eq!(section.initial(), &vec![1, 2]);
    }

    #[test]
    fn test_fallible_handler_error_is_returned() {
        let section = Section::new("strict", 0, |_, _| anyhow::bail!("no"));
        let result = (section.handler)(&Action::new("ANY"), &0);
        assert_eq!(result.unwrap_err().to_string(), "no");
    }
}
