//! WebSocket bridge between a browser shell and its [`Connection`].
//!
//! The `/ws` endpoint upgrades to a WebSocket. Each socket gets its own
//! connection loop:
//!
//! - **Inbound:** text frames are parsed as [`UiEvent`] (`{"name", "args"}`)
//!   and posted to the connection inbox. Malformed frames are logged and
//!   ignored.
//! - **Outbound:** every flushed [`PageUpdate`] is written as one JSON text
//!   frame by a dedicated writer task.
//!
//! Closing the socket posts `Disconnected`; the session dies with the loop.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::Utc;
use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;

use persona_core::connection::{Connection, Inbound};
use persona_types::event::{ConnectionId, UiEvent};
use persona_types::page::PageUpdate;

use crate::state::{AppState, ConnectionInfo};

/// Updates buffered between the connection loop and the socket writer.
const UPDATE_BUFFER: usize = 64;

/// Upgrade an HTTP request to a page-update WebSocket.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws_connection(socket, state))
}

async fn handle_ws_connection(socket: WebSocket, state: AppState) {
    let id = ConnectionId::new();
    state.connections.insert(
        id,
        ConnectionInfo {
            connected_at: Utc::now(),
        },
    );

    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (update_tx, mut update_rx) = mpsc::channel::<PageUpdate>(UPDATE_BUFFER);

    let connection = Connection::new(id, state.controller.clone(), update_tx);
    let inbox = connection.inbox();
    let loop_task = tokio::spawn(connection.run());

    let writer = tokio::spawn(async move {
        while let Some(update) = update_rx.recv().await {
            match serde_json::to_string(&update) {
                Ok(json) => {
                    if ws_sender.send(Message::Text(json.into())).await.is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!(connection = %id, "Failed to serialize page update: {err}");
                }
            }
        }
        let _ = ws_sender.close().await;
    });

    while let Some(msg_result) = ws_receiver.next().await {
        match msg_result {
            Ok(Message::Text(text)) => {
                let Some(event) = parse_event(text.as_str()) else {
                    continue;
                };
                if !inbox.deliver(Inbound::Event(event)) {
                    // Loop already ended (browser stopped reading updates).
                    break;
                }
            }
            Ok(Message::Close(_)) => break,
            Err(err) => {
                tracing::debug!(connection = %id, "WebSocket receive error: {err}");
                break;
            }
            // Binary, ping and pong frames are handled by axum.
            Ok(_) => {}
        }
    }

    inbox.deliver(Inbound::Disconnected);
    if let Err(err) = loop_task.await {
        tracing::warn!(connection = %id, "Connection loop panicked: {err}");
    }
    let _ = writer.await;

    if let Some((_, info)) = state.connections.remove(&id) {
        let seconds = (Utc::now() - info.connected_at).num_seconds();
        tracing::debug!(connection = %id, seconds, "WebSocket connection closed");
    }
}

/// Parse one inbound text frame. Returns `None` for anything that is not a
/// named UI event.
fn parse_event(text: &str) -> Option<UiEvent> {
    match serde_json::from_str::<UiEvent>(text) {
        Ok(event) if !event.name.is_empty() => Some(event),
        Ok(_) => {
            tracing::warn!("Ignoring UI event without a name");
            None
        }
        Err(err) => {
            tracing::warn!("Ignoring malformed WebSocket frame: {err}");
            None
        }
    }
}
