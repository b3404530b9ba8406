//! Scripted in-memory RAG service shared by the controller tests.

use std::collections::VecDeque;
use std::future::Future;
use std::sync::{Arc, Mutex};

use secrecy::{ExposeSecret, SecretString};

use persona_types::rag::{
    ChatSessionId, Chunk, ChunkId, Collection, CollectionId, ExtractRequest, Extraction,
    QueryReply, QueryRequest, RagError,
};

use super::box_client::BoxRagClient;
use super::client::{RagClient, RagConnector};

#[derive(Default)]
pub(crate) struct MockState {
    pub collections: Vec<Collection>,
    pub list_error: Option<RagError>,
    pub connect_error: Option<RagError>,
    pub chunks: Vec<String>,
    pub chunk_error_at: Option<ChunkId>,
    pub extractions: VecDeque<Result<Extraction, RagError>>,
    pub session_error: Option<RagError>,
    pub answer: Option<Result<QueryReply, RagError>>,
    pub connected_keys: Vec<String>,
    pub chunk_calls: Vec<ChunkId>,
    pub extract_requests: Vec<ExtractRequest>,
    pub sessions_created: u32,
    pub queries: Vec<(ChatSessionId, String)>,
}

#[derive(Clone, Default)]
pub(crate) struct MockRag {
    pub state: Arc<Mutex<MockState>>,
}

impl MockRag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collections(self, collections: &[(&str, &str)]) -> Self {
        self.state.lock().unwrap().collections = collections
            .iter()
            .map(|(id, name)| Collection {
                id: CollectionId::from(*id),
                name: name.to_string(),
            })
            .collect();
        self
    }

    pub fn with_chunks(self, count: usize) -> Self {
        self.state.lock().unwrap().chunks = (1..=count).map(|i| format!("chunk {i}")).collect();
        self
    }

    pub fn with_extraction(self, content: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .extractions
            .push_back(Ok(Extraction {
                content: vec![content.to_string()],
            }));
        self
    }

    pub fn with_extraction_error(self, err: RagError) -> Self {
        self.state.lock().unwrap().extractions.push_back(Err(err));
        self
    }

    pub fn with_answer(self, answer: &str) -> Self {
        self.state.lock().unwrap().answer = Some(Ok(QueryReply {
            content: answer.to_string(),
        }));
        self
    }

    pub fn with_answer_error(self, err: RagError) -> Self {
        self.state.lock().unwrap().answer = Some(Err(err));
        self
    }

    pub fn set(&self, f: impl FnOnce(&mut MockState)) {
        f(&mut self.state.lock().unwrap());
    }

    pub fn inspect<R>(&self, f: impl FnOnce(&MockState) -> R) -> R {
        f(&self.state.lock().unwrap())
    }
}

impl RagClient for MockRag {
    fn list_collections(
        &self,
        offset: u32,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Collection>, RagError>> + Send {
        let state = self.state.lock().unwrap();
        let result = match &state.list_error {
            Some(err) => Err(err.clone()),
            None => Ok(state
                .collections
                .iter()
                .skip(offset as usize)
                .take(limit as usize)
                .cloned()
                .collect()),
        };
        async move { result }
    }

    fn get_chunk(
        &self,
        _collection_id: &CollectionId,
        chunk_id: ChunkId,
    ) -> impl Future<Output = Result<Option<Chunk>, RagError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.chunk_calls.push(chunk_id);
        let result = if state.chunk_error_at == Some(chunk_id) {
            Err(RagError::Transport("connection reset".to_string()))
        } else {
            Ok(state
                .chunks
                .get(chunk_id as usize - 1)
                .map(|text| Chunk { text: text.clone() }))
        };
        async move { result }
    }

    fn extract(
        &self,
        request: &ExtractRequest,
    ) -> impl Future<Output = Result<Extraction, RagError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.extract_requests.push(request.clone());
        let result = state
            .extractions
            .pop_front()
            .unwrap_or_else(|| Err(RagError::Service {
                status: 500,
                message: "no scripted extraction".to_string(),
            }));
        async move { result }
    }

    fn create_chat_session(
        &self,
        collection_id: &CollectionId,
    ) -> impl Future<Output = Result<ChatSessionId, RagError>> + Send {
        let mut state = self.state.lock().unwrap();
        let result = match &state.session_error {
            Some(err) => Err(err.clone()),
            None => {
                state.sessions_created += 1;
                Ok(ChatSessionId(format!(
                    "chat-{}-{}",
                    collection_id, state.sessions_created
                )))
            }
        };
        async move { result }
    }

    fn query(
        &self,
        session_id: &ChatSessionId,
        request: &QueryRequest,
    ) -> impl Future<Output = Result<QueryReply, RagError>> + Send {
        let mut state = self.state.lock().unwrap();
        state
            .queries
            .push((session_id.clone(), request.question.clone()));
        let result = state.answer.clone().unwrap_or_else(|| {
            Ok(QueryReply {
                content: format!("echo: {}", request.question),
            })
        });
        async move { result }
    }
}

impl RagConnector for MockRag {
    fn connect(
        &self,
        api_key: &SecretString,
    ) -> impl Future<Output = Result<BoxRagClient, RagError>> + Send {
        let mut state = self.state.lock().unwrap();
        state.connected_keys.push(api_key.expose_secret().to_string());
        let result = match &state.connect_error {
            Some(err) => Err(err.clone()),
            None => Ok(BoxRagClient::new(self.clone())),
        };
        async move { result }
    }
}
