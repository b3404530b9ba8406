//! Chunk enumeration.
//!
//! The service has no chunk-count query, so enumeration probes ids 1, 2, ...
//! until the service reports the id as absent. A real error also ends the
//! walk, but is logged so it can be told apart from end-of-collection.

use persona_types::rag::{ChunkId, CollectionId};

use super::box_client::BoxRagClient;

/// Collect the text of chunks `1..=max_chunks`, stopping at the first gap.
pub async fn collect_chunks(
    client: &BoxRagClient,
    collection_id: &CollectionId,
    max_chunks: ChunkId,
) -> Vec<String> {
    let mut texts = Vec::new();

    for chunk_id in 1..=max_chunks {
        match client.get_chunk(collection_id, chunk_id).await {
            Ok(Some(chunk)) => texts.push(chunk.text),
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(
                    collection = %collection_id,
                    chunk_id,
                    error = %err,
                    "Chunk retrieval failed, using the chunks collected so far"
                );
                break;
            }
        }
    }

    tracing::debug!(collection = %collection_id, count = texts.len(), "Collected chunks");
    texts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rag::mock::MockRag;

    fn client(mock: &MockRag) -> BoxRagClient {
        BoxRagClient::new(mock.clone())
    }

    #[tokio::test]
    async fn collects_exactly_k_chunks() {
        let mock = MockRag::new().with_chunks(5);
        let texts = collect_chunks(&client(&mock), &CollectionId::from("b"), 99).await;

        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "chunk 1");
        assert_eq!(texts[4], "chunk 5");
        // Five hits plus the probe that found the end.
        assert_eq!(mock.inspect(|s| s.chunk_calls.clone()), vec![1, 2, 3, 4, 5, 6]);
    }

    #[tokio::test]
    async fn stops_at_max_chunks() {
        let mock = MockRag::new().with_chunks(150);
        let texts = collect_chunks(&client(&mock), &CollectionId::from("b"), 99).await;

        assert_eq!(texts.len(), 99);
        assert_eq!(mock.inspect(|s| s.chunk_calls.len()), 99);
    }

    #[tokio::test]
    async fn empty_collection_yields_nothing() {
        let mock = MockRag::new();
        let texts = collect_chunks(&client(&mock), &CollectionId::from("b"), 99).await;
        assert!(texts.is_empty());
    }

    #[tokio::test]
    async fn real_error_keeps_prefix() {
        let mock = MockRag::new().with_chunks(10);
        mock.set(|s| s.chunk_error_at = Some(4));

        let texts = collect_chunks(&client(&mock), &CollectionId::from("b"), 99).await;

        assert_eq!(texts, vec!["chunk 1", "chunk 2", "chunk 3"]);
        assert_eq!(mock.inspect(|s| s.chunk_calls.len()), 4);
    }
}
