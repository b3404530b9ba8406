//! Wire types for the h2oGPTe REST API (`/api/v1`).

use serde::{Deserialize, Serialize};

/// Element of `GET /collections`.
#[derive(Debug, Deserialize)]
pub struct WireCollection {
    pub id: String,
    pub name: String,
}

/// Element of `GET /collections/{id}/chunks/{chunk_id}`.
#[derive(Debug, Deserialize)]
pub struct WireChunk {
    pub text: String,
}

/// Body of `POST /extractions`.
#[derive(Debug, Serialize)]
pub struct WireExtractionRequest<'a> {
    pub text_context_list: &'a [String],
    pub system_prompt: &'a str,
    pub prompt_extract: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct WireExtraction {
    #[serde(default)]
    pub content: Vec<String>,
}

/// Response of `POST /collections/{id}/chats`.
#[derive(Debug, Deserialize)]
pub struct WireChatSession {
    pub id: String,
}

/// Body of `POST /chats/{id}/completions`.
#[derive(Debug, Serialize)]
pub struct WireCompletionRequest<'a> {
    pub message: &'a str,
    pub system_prompt: &'a str,
    /// Seconds the service may spend answering.
    pub timeout: u64,
}

#[derive(Debug, Deserialize)]
pub struct WireCompletion {
    pub body: String,
}

/// Error payload returned with non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct WireError {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collections_ignore_extra_fields() {
        let json = r#"[{"id":"a","name":"Other","document_count":3},{"id":"b","name":"MyProfile"}]"#;
        let parsed: Vec<WireCollection> = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[1].name, "MyProfile");
    }

    #[test]
    fn extraction_request_field_names() {
        let texts = vec!["chunk".to_string()];
        let body = WireExtractionRequest {
            text_context_list: &texts,
            system_prompt: "sys",
            prompt_extract: "task",
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["text_context_list"][0], "chunk");
        assert_eq!(json["prompt_extract"], "task");
    }

    #[test]
    fn extraction_without_content_is_empty() {
        let parsed: WireExtraction = serde_json::from_str("{}").unwrap();
        assert!(parsed.content.is_empty());
    }

    #[test]
    fn completion_request_carries_timeout() {
        let body = WireCompletionRequest {
            message: "hi",
            system_prompt: "be nice",
            timeout: 10_600,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["timeout"], 10_600);
        assert_eq!(json["message"], "hi");
    }
}
