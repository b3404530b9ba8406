//! Launch: authenticate, find the profile collection, extract the persona,
//! open a chat session.

use std::sync::Arc;

use persona_types::error::LaunchError;
use persona_types::rag::{Collection, CollectionRef};

use crate::page::Page;
use crate::rag::chunks::collect_chunks;
use crate::rag::profile::extract_profile;
use crate::rag::RagConnector;
use crate::session::{ClientSession, TurnState};

use super::views;
use super::Controller;

/// First collection whose name matches exactly.
pub fn select_collection<'a>(collections: &'a [Collection], name: &str) -> Option<&'a Collection> {
    collections.iter().find(|c| c.name == name)
}

impl<C: RagConnector> Controller<C> {
    pub(super) async fn launch(
        &self,
        session: &mut ClientSession,
        page: &mut Page,
    ) -> Result<(), LaunchError> {
        let config = self.config();
        let api_key = session.api_key.as_ref().ok_or(LaunchError::MissingApiKey)?;

        let client = self
            .connector
            .connect(api_key)
            .await
            .map_err(LaunchError::Connect)?;
        let client = Arc::new(client);

        let collections = client
            .list_collections(0, config.profile.collection_scan_limit)
            .await
            .map_err(LaunchError::ListCollections)?;
        let collection = select_collection(&collections, &config.profile.collection_name)
            .map(CollectionRef::from)
            .ok_or_else(|| LaunchError::CollectionNotFound(config.profile.collection_name.clone()))?;
        tracing::info!(
            collection = %collection.id,
            scanned = collections.len(),
            "Resolved profile collection"
        );

        let texts = collect_chunks(&client, &collection.id, config.profile.max_chunks).await;
        tracing::info!(chunks = texts.len(), "Collected profile chunks");

        let profile = extract_profile(&client, &texts, &config.profile).await;

        let chat_session_id = client
            .create_chat_session(&collection.id)
            .await
            .map_err(LaunchError::CreateSession)?;
        tracing::info!(chat_session = %chat_session_id, "Chat session created");

        // Nothing is committed until every step succeeded; a failed relaunch
        // leaves the previous launch untouched.
        page.put(views::HEADER, views::header_card(&config.page, &profile));
        page.delete(views::NOTICE);
        page.put(views::CHATBOT, views::chatbot_card(&collection.name));

        session.rag = Some(client);
        session.collection = Some(collection);
        session.profile = Some(profile);
        session.chat_session_id = Some(chat_session_id);
        session.turn = TurnState::Idle;
        Ok(())
    }
}
