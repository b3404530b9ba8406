//! BoxRagClient -- object-safe dynamic dispatch wrapper for RagClient.
//!
//! Blanket-impl pattern:
//! 1. Define an object-safe `RagClientDyn` trait with boxed futures
//! 2. Blanket-impl `RagClientDyn` for all `T: RagClient`
//! 3. `BoxRagClient` wraps `Box<dyn RagClientDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use persona_types::rag::{
    ChatSessionId, Chunk, ChunkId, Collection, CollectionId, ExtractRequest, Extraction,
    QueryReply, QueryRequest, RagError,
};

use super::client::RagClient;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Object-safe version of [`RagClient`] with boxed futures.
pub trait RagClientDyn: Send + Sync {
    fn list_collections_boxed(
        &self,
        offset: u32,
        limit: u32,
    ) -> BoxFuture<'_, Result<Vec<Collection>, RagError>>;

    fn get_chunk_boxed<'a>(
        &'a self,
        collection_id: &'a CollectionId,
        chunk_id: ChunkId,
    ) -> BoxFuture<'a, Result<Option<Chunk>, RagError>>;

    fn extract_boxed<'a>(
        &'a self,
        request: &'a ExtractRequest,
    ) -> BoxFuture<'a, Result<Extraction, RagError>>;

    fn create_chat_session_boxed<'a>(
        &'a self,
        collection_id: &'a CollectionId,
    ) -> BoxFuture<'a, Result<ChatSessionId, RagError>>;

    fn query_boxed<'a>(
        &'a self,
        session_id: &'a ChatSessionId,
        request: &'a QueryRequest,
    ) -> BoxFuture<'a, Result<QueryReply, RagError>>;
}

impl<T: RagClient> RagClientDyn for T {
    fn list_collections_boxed(
        &self,
        offset: u32,
        limit: u32,
    ) -> BoxFuture<'_, Result<Vec<Collection>, RagError>> {
        Box::pin(self.list_collections(offset, limit))
    }

    fn get_chunk_boxed<'a>(
        &'a self,
        collection_id: &'a CollectionId,
        chunk_id: ChunkId,
    ) -> BoxFuture<'a, Result<Option<Chunk>, RagError>> {
        Box::pin(self.get_chunk(collection_id, chunk_id))
    }

    fn extract_boxed<'a>(
        &'a self,
        request: &'a ExtractRequest,
    ) -> BoxFuture<'a, Result<Extraction, RagError>> {
        Box::pin(self.extract(request))
    }

    fn create_chat_session_boxed<'a>(
        &'a self,
        collection_id: &'a CollectionId,
    ) -> BoxFuture<'a, Result<ChatSessionId, RagError>> {
        Box::pin(self.create_chat_session(collection_id))
    }

    fn query_boxed<'a>(
        &'a self,
        session_id: &'a ChatSessionId,
        request: &'a QueryRequest,
    ) -> BoxFuture<'a, Result<QueryReply, RagError>> {
        Box::pin(self.query(session_id, request))
    }
}

/// Type-erased RAG client, held per browser connection.
pub struct BoxRagClient {
    inner: Box<dyn RagClientDyn + Send + Sync>,
}

impl BoxRagClient {
    pub fn new<T: RagClient + 'static>(client: T) -> Self {
        Self {
            inner: Box::new(client),
        }
    }

    pub async fn list_collections(
        &self,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<Collection>, RagError> {
        self.inner.list_collections_boxed(offset, limit).await
    }

    pub async fn get_chunk(
        &self,
        collection_id: &CollectionId,
        chunk_id: ChunkId,
    ) -> Result<Option<Chunk>, RagError> {
        self.inner.get_chunk_boxed(collection_id, chunk_id).await
    }

    pub async fn extract(&self, request: &ExtractRequest) -> Result<Extraction, RagError> {
        self.inner.extract_boxed(request).await
    }

    pub async fn create_chat_session(
        &self,
        collection_id: &CollectionId,
    ) -> Result<ChatSessionId, RagError> {
        self.inner.create_chat_session_boxed(collection_id).await
    }

    pub async fn query(
        &self,
        session_id: &ChatSessionId,
        request: &QueryRequest,
    ) -> Result<QueryReply, RagError> {
        self.inner.query_boxed(session_id, request).await
    }
}

impl std::fmt::Debug for BoxRagClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxRagClient").finish_non_exhaustive()
    }
}
