//! RAG service domain types: collections, chunks, extraction, chat sessions.
//!
//! Identifiers handed out by the RAG service are opaque strings. They are
//! wrapped in newtypes so a collection id can never be passed where a chat
//! session id is expected.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Opaque identifier of a server-side document collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollectionId(pub String);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CollectionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Opaque identifier of a server-side chat session bound to one collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatSessionId(pub String);

impl fmt::Display for ChatSessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChatSessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Positional chunk address within a collection. Chunk ids start at 1.
pub type ChunkId = u32;

/// A collection as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
}

/// The collection resolved for the current launch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionRef {
    pub id: CollectionId,
    pub name: String,
}

impl From<&Collection> for CollectionRef {
    fn from(c: &Collection) -> Self {
        Self {
            id: c.id.clone(),
            name: c.name.clone(),
        }
    }
}

/// A retrievable unit of text within a collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub text: String,
}

/// Input to an LLM-backed structured extraction call.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractRequest {
    /// Context passages the extraction runs over.
    pub texts: Vec<String>,
    pub system_prompt: String,
    /// The task prompt describing the JSON to return.
    pub extract_prompt: String,
}

/// Output of an extraction call. `content[0]` is expected to hold JSON text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    pub content: Vec<String>,
}

/// A question sent to a chat session.
#[derive(Debug, Clone)]
pub struct QueryRequest {
    pub question: String,
    /// Upper bound on how long the service may take to answer.
    pub timeout: Duration,
    pub system_prompt: String,
}

/// A complete (non-streamed) answer from a chat session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryReply {
    pub content: String,
}

/// Errors raised by any RAG adapter operation.
#[derive(Debug, Clone, Error)]
pub enum RagError {
    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out")]
    Timeout,

    #[error("service error (HTTP {status}): {message}")]
    Service { status: u16, message: String },

    #[error("deserialization error: {0}")]
    Deserialization(String),
}
