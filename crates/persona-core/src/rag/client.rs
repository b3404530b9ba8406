//! RagClient and RagConnector trait definitions.
//!
//! These are the ports the controller talks to. The h2oGPTe REST binding in
//! persona-infra implements them; tests implement them with in-memory mocks.

use std::future::Future;

use secrecy::SecretString;

use persona_types::rag::{
    ChatSessionId, Chunk, ChunkId, Collection, CollectionId, ExtractRequest, Extraction,
    QueryReply, QueryRequest, RagError,
};

use super::box_client::BoxRagClient;

/// An authenticated handle to the RAG service.
///
/// Uses native async fn in traits (RPITIT). Use [`BoxRagClient`] where a
/// trait object is needed.
pub trait RagClient: Send + Sync {
    /// List recently used collections visible to this credential.
    fn list_collections(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Collection>, RagError>> + Send;

    /// Fetch one chunk by its positional id.
    ///
    /// `Ok(None)` means the id is past the end of the collection; `Err` is a
    /// real failure (network, permissions, service error).
    fn get_chunk(
        &self,
        collection_id: &CollectionId,
        chunk_id: ChunkId,
    ) -> impl Future<Output = Result<Option<Chunk>, RagError>> + Send;

    /// Run an LLM-backed structured extraction over the given texts.
    fn extract(
        &self,
        request: &ExtractRequest,
    ) -> impl Future<Output = Result<Extraction, RagError>> + Send;

    /// Create a chat session grounded in a collection.
    fn create_chat_session(
        &self,
        collection_id: &CollectionId,
    ) -> impl Future<Output = Result<ChatSessionId, RagError>> + Send;

    /// Ask a question in a chat session and wait for the complete answer.
    fn query(
        &self,
        session_id: &ChatSessionId,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryReply, RagError>> + Send;
}

/// Factory that turns an API key into an authenticated client.
pub trait RagConnector: Send + Sync {
    fn connect(
        &self,
        api_key: &SecretString,
    ) -> impl Future<Output = Result<BoxRagClient, RagError>> + Send;
}
