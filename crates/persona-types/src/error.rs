use thiserror::Error;

use crate::rag::RagError;

/// Errors while extracting the persona from collection text.
///
/// Never shown to the user: any of these falls back to the configured profile.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extraction call failed: {0}")]
    Rag(#[from] RagError),

    #[error("extraction returned no content")]
    EmptyContent,

    #[error("extraction content is not valid JSON: {0}")]
    Json(String),

    #[error("field '{0}' missing or not a string")]
    MissingField(&'static str),
}

/// Errors that abort the launch flow.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("an API key is required")]
    MissingApiKey,

    #[error("could not connect to the RAG service: {0}")]
    Connect(RagError),

    #[error("could not list collections: {0}")]
    ListCollections(RagError),

    #[error("no collection named '{0}' was found")]
    CollectionNotFound(String),

    #[error("could not create a chat session: {0}")]
    CreateSession(RagError),
}

/// Errors in the chat turn flow.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("launch the assistant before asking questions")]
    NotLaunched,

    #[error("a question is already being answered")]
    TurnInProgress,

    #[error("question is empty")]
    EmptyQuestion,

    #[error("query failed: {0}")]
    Query(RagError),
}

/// Failure to push an update to the browser (the connection is gone).
#[derive(Debug, Error)]
#[error("client disconnected")]
pub struct SinkClosed;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_error_display() {
        let err = LaunchError::CollectionNotFound("MyProfile".to_string());
        assert_eq!(err.to_string(), "no collection named 'MyProfile' was found");
    }

    #[test]
    fn test_extract_error_from_rag() {
        let err: ExtractError = RagError::Timeout.into();
        assert!(matches!(err, ExtractError::Rag(RagError::Timeout)));
        assert_eq!(err.to_string(), "extraction call failed: request timed out");
    }

    #[test]
    fn test_chat_error_wraps_query_failure() {
        let err = ChatError::Query(RagError::AuthenticationFailed);
        assert_eq!(err.to_string(), "query failed: authentication failed");
    }
}
