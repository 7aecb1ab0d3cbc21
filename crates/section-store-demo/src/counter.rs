//! The counter section: likes and dislikes

use anyhow::Context;
use section_store::{Action, Section};
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const NAME: &str = "counter";

pub const ADD_LIKE: &str = "ADD_LIKE";
pub const ADD_DISLIKE: &str = "ADD_DISLIKE";
/// Structured action; payload is the new number of likes
pub const SET_LIKES: &str = "SET_LIKES";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub likes: u64,
    pub dislikes: u64,
}

fn reduce(mut counter: Counter, action: &Action) -> anyhow::Result<Counter> {
    match action.routing_key() {
        Some(ADD_LIKE) => counter.likes += 1,
        Some(ADD_DISLIKE) => counter.dislikes += 1,
        Some(SET_LIKES) => {
            counter.likes = action
                .payload()
                .and_then(Value::as_u64)
                .context("SET_LIKES needs a non-negative number as payload")?;
        }
        _ => {}
    }
    Ok(counter)
}

/// Section description for the store
pub fn section() -> Section<Value> {
    let initial = serde_json::json!(Counter::default());

    Section::new(NAME, initial, |action, value| {
        let counter: Counter = serde_json::from_value(value.clone())
            .context("Counter section holds an invalid value")?;
        let next = reduce(counter, action)?;
        Ok(serde_json::to_value(next)?)
    })
    .listen_to([ADD_LIKE, ADD_DISLIKE, SET_LIKES])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use section_store::Store;
    use serde_json::json;

    #[test]
    fn test_reduce_counts_likes_and_dislikes() {
        let counter = reduce(Counter::default(), &Action::new(ADD_LIKE)).unwrap();
        let counter = reduce(counter, &Action::new(ADD_DISLIKE)).unwrap();
        let counter = reduce(counter, &Action::new("WOLOLO")).unwrap();

        assert_eq!(
            counter,
            Counter {
                likes: 1,
                dislikes: 1
            }
        );
    }

    #[test]
    fn test_set_likes_requires_payload() {
        let err = reduce(Counter::default(), &Action::new(SET_LIKES)).unwrap_err();
        assert!(err.to_string().contains("SET_LIKES"));

        let counter = reduce(
            Counter::default(),
            &Action::with_payload(SET_LIKES, json!(42)),
        )
        .unwrap();
        assert_eq!(counter.likes, 42);
    }

    #[test]
    fn test_section_in_store() {
        let mut store: Store = Store::new();
        store.register_section(section()).unwrap();

        store.dispatch(ADD_LIKE).unwrap();
        store
            .dispatch(json!({ "type": SET_LIKES, "payload": 7 }))
            .unwrap();
        store.dispatch(ADD_DISLIKE).unwrap();

        assert_eq!(
            store.section(NAME),
            Some(&json!({ "likes": 7, "dislikes": 1 }))
        );
    }
}
