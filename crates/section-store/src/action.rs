//! Actions and their routing key
//!
//! An action reaches the store in one of two shapes:
//!
//! - a bare identifier, e.g. `"ADD_LIKE"`
//! - a structured object, e.g. `{ "type": "ADD_LIKE", "payload": 3 }`
//!
//! Both shapes route by the same key. [`Action::routing_key`] is the single
//! place where that key is extracted.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// An event or command dispatched into the store
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Bare action identifier
    Type(String),
    /// Identifier with an optional payload
    ///
    /// Any other field of the incoming object (`meta`, `error`, ...) is kept
    /// in `extra` and reaches the handlers unchanged.
    Structured {
        kind: String,
        payload: Option<Value>,
        extra: Map<String, Value>,
    },
    /// Input without a usable identifier; routes nowhere
    Unroutable(Value),
}

impl Action {
    /// Bare action with the given identifier
    pub fn new(kind: impl Into<String>) -> Self {
        Self::Type(kind.into())
    }

    /// Structured action carrying `payload`
    pub fn with_payload(kind: impl Into<String>, payload: Value) -> Self {
        Self::Structured {
            kind: kind.into(),
            payload: Some(payload),
            extra: Map::new(),
        }
    }

    /// Same action with `field` set to `value`
    ///
    /// A bare action becomes structured. Setting `type` or `payload` is
    /// ignored; use [`Action::with_payload`] for the latter.
    pub fn with_field(self, field: impl Into<String>, value: Value) -> Self {
        let field = field.into();
        match self {
            Self::Type(kind) => Self::Structured {
                kind,
                payload: None,
                extra: Map::new(),
            }
            .with_field(field, value),
            Self::Structured {
                kind,
                payload,
                mut extra,
            } => {
                if field != "type" && field != "payload" {
                    extra.insert(field, value);
                }
                Self::Structured {
                    kind,
                    payload,
                    extra,
                }
            }
            unroutable @ Self::Unroutable(_) => unroutable,
        }
    }

    /// Key used to look up listening sections
    ///
    /// The bare identifier for [`Action::Type`], the `type` field for
    /// [`Action::Structured`], and `None` for unroutable input.
    pub fn routing_key(&self) -> Option<&str> {
        match self {
            Self::Type(kind) | Self::Structured { kind, .. } => Some(kind.as_str()),
            Self::Unroutable(_) => None,
        }
    }

    /// Payload of a structured action
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Structured { payload, .. } => payload.as_ref(),
            Self::Type(_) | Self::Unroutable(_) => None,
        }
    }

    /// Field of a structured action other than `type` and `payload`
    pub fn field(&self, name: &str) -> Option<&Value> {
        match self {
            Self::Structured { extra, .. } => extra.get(name),
            Self::Type(_) | Self::Unroutable(_) => None,
        }
    }

    pub fn is_routable(&self) -> bool {
        self.routing_key().is_some()
    }

    /// The action in its wire shape
    pub fn to_value(&self) -> Value {
        match self {
            Self::Type(kind) => Value::String(kind.clone()),
            Self::Structured {
                kind,
                payload,
                extra,
            } => {
                let mut map = extra.clone();
                map.insert("type".to_string(), Value::String(kind.clone()));
                if let Some(payload) = payload {
                    map.insert("payload".to_string(), payload.clone());
                }
                Value::Object(map)
            }
            Self::Unroutable(value) => value.clone(),
        }
    }
}

impl From<&str> for Action {
    fn from(kind: &str) -> Self {
        Self::Type(kind.to_string())
    }
}

impl From<String> for Action {
    fn from(kind: String) -> Self {
        Self::Type(kind)
    }
}

/// Normalise dynamic input into an action
///
/// - strings are bare identifiers
/// - numbers and booleans are bare identifiers in their textual form
/// - objects with a string `type` field are structured and keep all their
///   fields
/// - everything else (null, arrays, objects without a string `type`) is
///   unroutable
impl From<Value> for Action {
    fn from(value: Value) -> Self {
        match value {
            Value::String(kind) => Self::Type(kind),
            Value::Number(n) => Self::Type(n.to_string()),
            Value::Bool(b) => Self::Type(b.to_string()),
            Value::Object(mut map) => match map.remove("type") {
                Some(Value::String(kind)) => Self::Structured {
                    kind,
                    payload: map.remove("payload"),
                    extra: map,
                },
                Some(other) => {
                    map.insert("type".to_string(), other);
                    Self::Unroutable(Value::Object(map))
                }
                None => Self::Unroutable(Value::Object(map)),
            },
            other => Self::Unroutable(other),
        }
    }
}

impl Serialize for Action {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.to_value().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Action::from)
    }
}
