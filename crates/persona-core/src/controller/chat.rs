//! Chat turn: show the question and a typing indicator, ask the service in
//! the background, then reveal the answer piece by piece.

use std::sync::Arc;
use std::time::Duration;

use persona_types::error::ChatError;
use persona_types::page::ChatRow;
use persona_types::rag::QueryRequest;

use crate::connection::{AnswerReady, Inbound, Inbox};
use crate::page::{Surface, UpdateSink};
use crate::rag::RagConnector;
use crate::session::{ClientSession, TurnState};

use super::views::{self, CHATBOT};
use super::{Controller, HandlerError};

/// Successive texts of the last transcript row during the reveal.
///
/// The answer gets a trailing line break and is split on `delimiter`; each
/// frame is the previous frame plus the next piece and a space.
pub fn reveal_frames(answer: &str, delimiter: &str) -> Vec<String> {
    let full = format!("{answer} <br/>");
    let pieces: Vec<&str> = if delimiter.is_empty() {
        vec![full.as_str()]
    } else {
        full.split(delimiter).collect()
    };

    let mut frames = Vec::with_capacity(pieces.len());
    let mut stream = String::new();
    for piece in pieces {
        stream.push_str(piece);
        stream.push(' ');
        frames.push(stream.clone());
    }
    frames
}

impl<C: RagConnector> Controller<C> {
    /// Handle a submitted question. Returns once the query is in flight.
    pub(super) async fn submit_question<S: UpdateSink>(
        &self,
        session: &mut ClientSession,
        surface: &mut Surface<S>,
        inbox: &Inbox,
        question: Option<&str>,
    ) -> Result<(), HandlerError> {
        let (Some(client), Some(chat_session_id)) =
            (session.rag.as_ref(), session.chat_session_id.as_ref())
        else {
            return Err(ChatError::NotLaunched.into());
        };
        if session.turn != TurnState::Idle {
            return Err(ChatError::TurnInProgress.into());
        }
        let question = question.unwrap_or_default();
        if question.trim().is_empty() {
            return Err(ChatError::EmptyQuestion.into());
        }

        let client = Arc::clone(client);
        let chat_session_id = chat_session_id.clone();
        let config = &self.config().chat;

        surface
            .page_mut()
            .append_row(CHATBOT, ChatRow::user(question))?;
        surface.flush().await?;
        surface.page_mut().append_row(
            CHATBOT,
            ChatRow::assistant(views::typing_indicator(&config.typing_indicator_url)),
        )?;
        surface.flush().await?;

        let turn = session.next_turn();
        session.turn = TurnState::AwaitingAnswer { turn };

        let request = QueryRequest {
            question: question.to_string(),
            timeout: Duration::from_secs(config.query_timeout_secs),
            system_prompt: config.system_prompt.clone(),
        };
        let inbox = inbox.clone();
        tokio::spawn(async move {
            let result = client.query(&chat_session_id, &request).await;
            if !inbox.deliver(Inbound::Answer(AnswerReady { turn, result })) {
                tracing::debug!(turn, "Answer arrived after the connection closed");
            }
        });

        tracing::debug!(turn, "Question submitted");
        Ok(())
    }

    /// Apply a background answer to the transcript.
    pub(super) async fn finish_turn<S: UpdateSink>(
        &self,
        session: &mut ClientSession,
        surface: &mut Surface<S>,
        answer: AnswerReady,
    ) -> Result<(), HandlerError> {
        let turn = match session.turn {
            TurnState::AwaitingAnswer { turn } if turn == answer.turn => turn,
            _ => {
                tracing::debug!(turn = answer.turn, "Dropping answer for a superseded turn");
                return Ok(());
            }
        };

        let reply = match answer.result {
            Ok(reply) => reply,
            Err(err) => {
                session.turn = TurnState::Idle;
                surface.page_mut().set_last_row(
                    CHATBOT,
                    ChatRow::assistant(format!("Sorry, I could not get an answer: {err}")),
                )?;
                return Err(ChatError::Query(err).into());
            }
        };

        session.turn = TurnState::Revealing { turn };
        let config = &self.config().chat;
        let delay = Duration::from_millis(config.reveal_delay_ms);

        surface
            .page_mut()
            .set_last_row(CHATBOT, ChatRow::assistant(""))?;
        for frame in reveal_frames(&reply.content, &config.reveal_delimiter) {
            tokio::time::sleep(delay).await;
            surface
                .page_mut()
                .set_last_row(CHATBOT, ChatRow::assistant(frame))?;
            surface.flush().await?;
        }

        session.turn = TurnState::Idle;
        tracing::debug!(turn, "Answer revealed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_delimiter_reveals_in_one_frame() {
        let frames = reveal_frames("Line one\nLine two", "/n");
        assert_eq!(frames, vec!["Line one\nLine two <br/> "]);
    }

    #[test]
    fn frames_grow_cumulatively() {
        let frames = reveal_frames("a/nb/nc", "/n");
        assert_eq!(frames, vec!["a ", "a b ", "a b c <br/> "]);
    }

    #[test]
    fn newline_delimiter_reveals_per_line() {
        let frames = reveal_frames("one\ntwo", "\n");
        assert_eq!(frames, vec!["one ", "one two <br/> "]);
    }

    #[test]
    fn empty_delimiter_is_single_frame() {
        assert_eq!(reveal_frames("hi", ""), vec!["hi <br/> "]);
    }
}
