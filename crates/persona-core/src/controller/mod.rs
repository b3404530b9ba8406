//! Application controller: routes UI events to handlers and applies
//! background results.
//!
//! Every inbound item ends with exactly one flush of whatever the handler
//! left pending. The chat turn flushes additionally while it runs so the
//! browser sees each step before the next, slower one starts.
//!
//! Handler failures never reach the host. They are logged and rendered as an
//! inline error card; only a closed sink (the browser is gone) propagates.

mod chat;
mod init;
mod launch;
pub mod views;

use std::sync::Arc;

use thiserror::Error;

use persona_types::config::AppConfig;
use persona_types::error::{ChatError, LaunchError, SinkClosed};
use persona_types::event::UiEvent;
use persona_types::page::Card;

use crate::connection::{AnswerReady, Inbox};
use crate::page::{PageError, Surface, UpdateSink};
use crate::rag::RagConnector;
use crate::session::ClientSession;

pub use chat::reveal_frames;
pub use launch::select_collection;

pub const HOME: &str = "home";
pub const LAUNCH: &str = "launch";
pub const CHATBOT: &str = views::CHATBOT;

/// Handlers reachable by event name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Launch,
    Chatbot,
}

impl Route {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            HOME => Some(Route::Home),
            LAUNCH => Some(Route::Launch),
            CHATBOT => Some(Route::Chatbot),
            _ => None,
        }
    }
}

/// Anything a handler can fail with.
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Launch(#[from] LaunchError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error(transparent)]
    Page(#[from] PageError),

    #[error(transparent)]
    Sink(#[from] SinkClosed),
}

/// Stateless orchestration shared by all connections.
pub struct Controller<C> {
    connector: C,
    config: Arc<AppConfig>,
}

impl<C: RagConnector> Controller<C> {
    pub fn new(connector: C, config: Arc<AppConfig>) -> Self {
        Self { connector, config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Handle one UI event from the browser.
    pub async fn handle_event<S: UpdateSink>(
        &self,
        session: &mut ClientSession,
        surface: &mut Surface<S>,
        inbox: &Inbox,
        event: UiEvent,
    ) -> Result<(), SinkClosed> {
        session.absorb(&event);

        if !session.initialized {
            tracing::debug!(event = %event.name, "Initializing page");
            self.initialize(surface.page_mut());
            session.initialized = true;
        } else {
            let result = match Route::from_name(&event.name) {
                Some(Route::Home) => {
                    self.home(surface.page_mut());
                    Ok(())
                }
                Some(Route::Launch) => self
                    .launch(session, surface.page_mut())
                    .await
                    .map_err(HandlerError::from),
                Some(Route::Chatbot) => {
                    self.submit_question(session, surface, inbox, event.arg_str(CHATBOT))
                        .await
                }
                None => {
                    tracing::debug!(event = %event.name, "No handler, resetting scratch card");
                    surface.page_mut().put(views::SCRATCH, Card::Empty);
                    Ok(())
                }
            };
            self.report(surface, result)?;
        }

        surface.flush().await
    }

    /// Apply the result of a background query.
    pub async fn handle_answer<S: UpdateSink>(
        &self,
        session: &mut ClientSession,
        surface: &mut Surface<S>,
        answer: AnswerReady,
    ) -> Result<(), SinkClosed> {
        let result = self.finish_turn(session, surface, answer).await;
        self.report(surface, result)?;
        surface.flush().await
    }

    fn report<S: UpdateSink>(
        &self,
        surface: &mut Surface<S>,
        result: Result<(), HandlerError>,
    ) -> Result<(), SinkClosed> {
        match result {
            Ok(()) => Ok(()),
            Err(HandlerError::Sink(closed)) => Err(closed),
            Err(err) => {
                tracing::warn!(error = %err, "Handler failed");
                surface
                    .page_mut()
                    .put(views::NOTICE, views::error_card(&err.to_string()));
                Ok(())
            }
        }
    }
}
