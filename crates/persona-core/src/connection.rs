//! Per-connection serialized event loop.
//!
//! Everything that can change a connection's state arrives through its
//! [`Inbox`]: UI events from the socket reader, answers from background
//! queries, and the disconnect signal. Items are handled one at a time, so a
//! background answer is applied between handlers, never in the middle of one.

use std::sync::Arc;

use tokio::sync::mpsc;

use persona_types::event::{ConnectionId, UiEvent};
use persona_types::rag::{QueryReply, RagError};

use crate::controller::Controller;
use crate::page::{Surface, UpdateSink};
use crate::rag::RagConnector;
use crate::session::ClientSession;

/// Result of a background chat query, tagged with its turn number.
#[derive(Debug)]
pub struct AnswerReady {
    pub turn: u64,
    pub result: Result<QueryReply, RagError>,
}

/// One item of a connection's inbox.
#[derive(Debug)]
pub enum Inbound {
    Event(UiEvent),
    Answer(AnswerReady),
    Disconnected,
}

/// Cloneable handle for posting into a connection's inbox.
#[derive(Debug, Clone)]
pub struct Inbox {
    tx: mpsc::UnboundedSender<Inbound>,
}

impl Inbox {
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Inbound>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Post an item. Returns false if the connection loop has ended.
    pub fn deliver(&self, inbound: Inbound) -> bool {
        self.tx.send(inbound).is_ok()
    }
}

/// State and loop of one browser connection.
pub struct Connection<C, S> {
    id: ConnectionId,
    controller: Arc<Controller<C>>,
    session: ClientSession,
    surface: Surface<S>,
    inbox: Inbox,
    rx: mpsc::UnboundedReceiver<Inbound>,
}

impl<C: RagConnector, S: UpdateSink> Connection<C, S> {
    pub fn new(id: ConnectionId, controller: Arc<Controller<C>>, sink: S) -> Self {
        let (inbox, rx) = Inbox::channel();
        Self {
            id,
            controller,
            session: ClientSession::new(),
            surface: Surface::new(sink),
            inbox,
            rx,
        }
    }

    /// Handle for the socket reader to post events with.
    pub fn inbox(&self) -> Inbox {
        self.inbox.clone()
    }

    /// Process inbox items until disconnect or until the browser stops
    /// accepting updates.
    pub async fn run(mut self) {
        tracing::info!(connection = %self.id, "Connection opened");

        while let Some(inbound) = self.rx.recv().await {
            let result = match inbound {
                Inbound::Event(event) => {
                    self.controller
                        .handle_event(&mut self.session, &mut self.surface, &self.inbox, event)
                        .await
                }
                Inbound::Answer(answer) => {
                    self.controller
                        .handle_answer(&mut self.session, &mut self.surface, answer)
                        .await
                }
                Inbound::Disconnected => break,
            };

            if let Err(err) = result {
                tracing::debug!(connection = %self.id, error = %err, "Update sink closed");
                break;
            }
        }

        tracing::info!(
            connection = %self.id,
            updates = self.surface.flushes(),
            "Connection closed"
        );
    }
}
