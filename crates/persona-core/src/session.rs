//! Per-connection client state.
//!
//! One `ClientSession` exists per browser connection and is dropped on
//! disconnect. Nothing in it is shared across connections.

use std::sync::Arc;

use secrecy::SecretString;
use serde_json::{Map, Value};

use persona_types::event::UiEvent;
use persona_types::profile::Profile;
use persona_types::rag::{ChatSessionId, CollectionRef};

use crate::rag::BoxRagClient;

/// Progress of the current chat turn.
///
/// `Idle -> AwaitingAnswer -> Revealing -> Idle`. The `turn` number ties a
/// background answer to the turn that asked for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    AwaitingAnswer { turn: u64 },
    Revealing { turn: u64 },
}

/// Mutable state of one browser connection.
#[derive(Default)]
pub struct ClientSession {
    pub initialized: bool,
    /// Every argument seen so far, last value wins.
    pub args: Map<String, Value>,
    pub api_key: Option<SecretString>,
    pub rag: Option<Arc<BoxRagClient>>,
    pub collection: Option<CollectionRef>,
    /// At most one chat session; a new launch replaces it without closing it.
    pub chat_session_id: Option<ChatSessionId>,
    pub profile: Option<Profile>,
    pub turn: TurnState,
    turn_seq: u64,
}

impl ClientSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy event arguments onto the session.
    pub fn absorb(&mut self, event: &UiEvent) {
        for (key, value) in &event.args {
            self.args.insert(key.clone(), value.clone());
        }
        if let Some(key) = event.arg_str("api_key") {
            let key = key.trim();
            self.api_key = (!key.is_empty()).then(|| SecretString::from(key.to_string()));
        }
    }

    /// Whether launch has completed and questions can be asked.
    pub fn is_launched(&self) -> bool {
        self.rag.is_some() && self.chat_session_id.is_some()
    }

    /// Allocate the number of the next chat turn.
    pub fn next_turn(&mut self) -> u64 {
        self.turn_seq += 1;
        self.turn_seq
    }
}

impl std::fmt::Debug for ClientSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientSession")
            .field("initialized", &self.initialized)
            .field("has_api_key", &self.api_key.is_some())
            .field("collection", &self.collection)
            .field("chat_session_id", &self.chat_session_id)
            .field("profile", &self.profile)
            .field("turn", &self.turn)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn absorb_copies_args_and_key() {
        let mut session = ClientSession::new();
        session.absorb(
            &UiEvent::new("launch")
                .with_arg("api_key", " sk-1 ")
                .with_arg("launch", true),
        );

        assert_eq!(session.args.get("launch"), Some(&Value::Bool(true)));
        assert_eq!(session.api_key.as_ref().unwrap().expose_secret(), "sk-1");
    }

    #[test]
    fn blank_key_clears_credential() {
        let mut session = ClientSession::new();
        session.absorb(&UiEvent::new("launch").with_arg("api_key", "sk-1"));
        session.absorb(&UiEvent::new("launch").with_arg("api_key", "  "));
        assert!(session.api_key.is_none());
    }

    #[test]
    fn args_accumulate_across_events() {
        let mut session = ClientSession::new();
        session.absorb(&UiEvent::new("a").with_arg("x", 1));
        session.absorb(&UiEvent::new("b").with_arg("y", 2));
        assert_eq!(session.args.len(), 2);
    }

    #[test]
    fn turn_numbers_increase() {
        let mut session = ClientSession::new();
        assert_eq!(session.next_turn(), 1);
        assert_eq!(session.next_turn(), 2);
        assert_eq!(session.turn, TurnState::Idle);
        assert!(!session.is_launched());
    }

    #[test]
    fn debug_hides_key() {
        let mut session = ClientSession::new();
        session.absorb(&UiEvent::new("launch").with_arg("api_key", "sk-secret"));
        let debug = format!("{session:?}");
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("has_api_key: true"));
    }
}
