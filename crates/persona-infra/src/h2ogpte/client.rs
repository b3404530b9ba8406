//! H2oGpteClient -- concrete [`RagClient`] implementation over the h2oGPTe
//! REST API.
//!
//! Every request carries the API key as a bearer token. The key is wrapped
//! in [`secrecy::SecretString`] and is only exposed when building the
//! `Authorization` header.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use persona_core::rag::{BoxRagClient, RagClient, RagConnector};
use persona_types::config::RagConfig;
use persona_types::rag::{
    ChatSessionId, Chunk, ChunkId, Collection, CollectionId, ExtractRequest, Extraction,
    QueryReply, QueryRequest, RagError,
};

use super::types::{
    WireChatSession, WireChunk, WireCollection, WireCompletion, WireCompletionRequest, WireError,
    WireExtraction, WireExtractionRequest,
};

/// Authenticated h2oGPTe client.
///
/// Intentionally does NOT derive Debug; the key must never be printed.
pub struct H2oGpteClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl H2oGpteClient {
    /// Create a client for `endpoint` (e.g. `https://h2ogpte.example.com`).
    pub fn new(
        endpoint: &str,
        api_key: SecretString,
        request_timeout: Duration,
    ) -> Result<Self, RagError> {
        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| RagError::Transport(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            base_url: format!("{}/api/v1", endpoint.trim_end_matches('/')),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .get(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
    }

    fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.client
            .post(self.url(path))
            .bearer_auth(self.api_key.expose_secret())
    }

    /// Send and decode a JSON response, mapping HTTP failures to [`RagError`].
    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
    ) -> Result<T, RagError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error(status.as_u16(), &body));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| RagError::Deserialization(format!("failed to parse response: {e}")))
    }
}

fn transport_error(err: reqwest::Error) -> RagError {
    if err.is_timeout() {
        RagError::Timeout
    } else {
        RagError::Transport(err.to_string())
    }
}

/// Map a non-2xx status and its body to an error.
pub(crate) fn status_error(status: u16, body: &str) -> RagError {
    match status {
        401 | 403 => RagError::AuthenticationFailed,
        408 | 504 => RagError::Timeout,
        _ => {
            let message = serde_json::from_str::<WireError>(body)
                .ok()
                .and_then(|e| e.message.or(e.detail))
                .unwrap_or_else(|| body.to_string());
            RagError::Service { status, message }
        }
    }
}

impl RagClient for H2oGpteClient {
    async fn list_collections(&self, offset: u32, limit: u32) -> Result<Vec<Collection>, RagError> {
        let request = self
            .get("/collections")
            .query(&[("offset", offset), ("limit", limit)]);
        let collections: Vec<WireCollection> = Self::send_json(request).await?;

        Ok(collections
            .into_iter()
            .map(|c| Collection {
                id: CollectionId(c.id),
                name: c.name,
            })
            .collect())
    }

    async fn get_chunk(
        &self,
        collection_id: &CollectionId,
        chunk_id: ChunkId,
    ) -> Result<Option<Chunk>, RagError> {
        let request = self.get(&format!("/collections/{collection_id}/chunks/{chunk_id}"));
        match Self::send_json::<Vec<WireChunk>>(request).await {
            Ok(chunks) => Ok(chunks.into_iter().next().map(|c| Chunk { text: c.text })),
            // Past the last chunk.
            Err(RagError::Service { status: 404, .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    async fn extract(&self, request: &ExtractRequest) -> Result<Extraction, RagError> {
        let body = WireExtractionRequest {
            text_context_list: &request.texts,
            system_prompt: &request.system_prompt,
            prompt_extract: &request.extract_prompt,
        };
        let extraction: WireExtraction = Self::send_json(self.post("/extractions").json(&body)).await?;

        Ok(Extraction {
            content: extraction.content,
        })
    }

    async fn create_chat_session(
        &self,
        collection_id: &CollectionId,
    ) -> Result<ChatSessionId, RagError> {
        let request = self.post(&format!("/collections/{collection_id}/chats"));
        let session: WireChatSession = Self::send_json(request).await?;
        Ok(ChatSessionId(session.id))
    }

    async fn query(
        &self,
        session_id: &ChatSessionId,
        request: &QueryRequest,
    ) -> Result<QueryReply, RagError> {
        let body = WireCompletionRequest {
            message: &request.question,
            system_prompt: &request.system_prompt,
            timeout: request.timeout.as_secs(),
        };
        // The service-side budget applies to the HTTP call as well.
        let http = self
            .post(&format!("/chats/{session_id}/completions"))
            .timeout(request.timeout)
            .json(&body);
        let completion: WireCompletion = Self::send_json(http).await?;

        Ok(QueryReply {
            content: completion.body,
        })
    }
}

/// Builds an [`H2oGpteClient`] per API key.
#[derive(Debug, Clone)]
pub struct H2oGpteConnector {
    endpoint: String,
    request_timeout: Duration,
}

impl H2oGpteConnector {
    pub fn new(config: &RagConfig) -> Self {
        Self {
            endpoint: config.endpoint.clone(),
            request_timeout: Duration::from_secs(config.request_timeout_secs),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl RagConnector for H2oGpteConnector {
    async fn connect(&self, api_key: &SecretString) -> Result<BoxRagClient, RagError> {
        let key = SecretString::from(api_key.expose_secret().to_string());
        let client = H2oGpteClient::new(&self.endpoint, key, self.request_timeout)?;
        tracing::debug!(endpoint = %self.endpoint, "Connected to h2oGPTe");
        Ok(BoxRagClient::new(client))
    }
}
