//! Inbound UI events raised by the browser shell.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Identifier of one browser connection, UUID v7 (time-sortable).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConnectionId(pub Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named event with its argument bag.
///
/// The shell sends `{"name": "launch", "args": {"api_key": "..."}}`. The
/// first frame of a connection is conventionally named `connect` with no
/// args, but any name works: the first event always initializes the page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiEvent {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub args: Map<String, Value>,
}

impl UiEvent {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            args: Map::new(),
        }
    }

    pub fn with_arg(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.args.insert(key.to_string(), value.into());
        self
    }

    /// String value of an argument, if present and a string.
    pub fn arg_str(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_with_missing_args() {
        let event: UiEvent = serde_json::from_str(r#"{"name":"connect"}"#).unwrap();
        assert_eq!(event.name, "connect");
        assert!(event.args.is_empty());
    }

    #[test]
    fn arg_str_ignores_non_strings() {
        let event = UiEvent::new("launch")
            .with_arg("api_key", "sk-1")
            .with_arg("launch", true);
        assert_eq!(event.arg_str("api_key"), Some("sk-1"));
        assert_eq!(event.arg_str("launch"), None);
        assert_eq!(event.arg_str("missing"), None);
    }
}
