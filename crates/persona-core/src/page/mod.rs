//! Server-side render state.
//!
//! [`Page`] keeps the current card map plus a queue of ops recorded since the
//! last flush. Mutations update both; [`Page::flush`] drains the queue into a
//! single [`PageUpdate`]. The browser applies updates in the order they are
//! flushed, so its mirror always matches the card map after the last frame.

pub mod sink;

use std::collections::BTreeMap;

use thiserror::Error;

use persona_types::page::{Card, ChatRow, PageOp, PageUpdate};

pub use sink::{Surface, UpdateSink};

/// Errors from row-level mutations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PageError {
    #[error("no card named '{0}'")]
    NoSuchCard(String),

    #[error("card '{0}' has no transcript rows")]
    NotAChatbot(String),

    #[error("card '{card}' has no row {index}")]
    RowOutOfRange { card: String, index: usize },
}

/// Card map plus pending ops.
#[derive(Debug, Default)]
pub struct Page {
    cards: BTreeMap<String, Card>,
    pending: Vec<PageOp>,
}

impl Page {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare or replace a card.
    pub fn put(&mut self, name: &str, card: Card) {
        self.cards.insert(name.to_string(), card.clone());
        self.pending.push(PageOp::Put {
            name: name.to_string(),
            card,
        });
    }

    /// Remove a card. No-op if it does not exist.
    pub fn delete(&mut self, name: &str) {
        if self.cards.remove(name).is_some() {
            self.pending.push(PageOp::Delete {
                name: name.to_string(),
            });
        }
    }

    pub fn card(&self, name: &str) -> Option<&Card> {
        self.cards.get(name)
    }

    /// Transcript rows of a chatbot card.
    pub fn rows(&self, name: &str) -> Option<&[ChatRow]> {
        self.cards.get(name).and_then(Card::rows)
    }

    pub fn append_row(&mut self, card: &str, row: ChatRow) -> Result<(), PageError> {
        self.rows_mut(card)?.push(row.clone());
        self.pending.push(PageOp::AppendRow {
            card: card.to_string(),
            row,
        });
        Ok(())
    }

    pub fn set_row(&mut self, card: &str, index: usize, row: ChatRow) -> Result<(), PageError> {
        let rows = self.rows_mut(card)?;
        let slot = rows.get_mut(index).ok_or_else(|| PageError::RowOutOfRange {
            card: card.to_string(),
            index,
        })?;
        *slot = row.clone();
        self.pending.push(PageOp::SetRow {
            card: card.to_string(),
            index,
            row,
        });
        Ok(())
    }

    /// Overwrite the final transcript row.
    pub fn set_last_row(&mut self, card: &str, row: ChatRow) -> Result<(), PageError> {
        let len = self.rows_mut(card)?.len();
        let index = len.checked_sub(1).ok_or_else(|| PageError::RowOutOfRange {
            card: card.to_string(),
            index: 0,
        })?;
        self.set_row(card, index, row)
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Drain pending ops into one update. `None` when nothing changed.
    pub fn flush(&mut self) -> Option<PageUpdate> {
        if self.pending.is_empty() {
            return None;
        }
        Some(PageUpdate {
            ops: std::mem::take(&mut self.pending),
        })
    }

    fn rows_mut(&mut self, card: &str) -> Result<&mut Vec<ChatRow>, PageError> {
        self.cards
            .get_mut(card)
            .ok_or_else(|| PageError::NoSuchCard(card.to_string()))?
            .rows_mut()
            .ok_or_else(|| PageError::NotAChatbot(card.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chatbot(rows: Vec<ChatRow>) -> Card {
        Card::Chatbot {
            zone: "horizontal".to_string(),
            name: "chatbot".to_string(),
            rows,
        }
    }

    #[test]
    fn put_records_op_and_state() {
        let mut page = Page::new();
        page.put("scratch", Card::Empty);

        assert_eq!(page.card("scratch"), Some(&Card::Empty));
        let update = page.flush().unwrap();
        assert_eq!(update.ops.len(), 1);
        assert!(matches!(&update.ops[0], PageOp::Put { name, .. } if name == "scratch"));
    }

    #[test]
    fn flush_drains_pending() {
        let mut page = Page::new();
        assert!(page.flush().is_none());

        page.put("a", Card::Empty);
        page.put("b", Card::Empty);
        assert!(page.has_pending());
        assert_eq!(page.flush().unwrap().ops.len(), 2);
        assert!(!page.has_pending());
        assert!(page.flush().is_none());
    }

    #[test]
    fn delete_missing_card_is_silent() {
        let mut page = Page::new();
        page.delete("nothing");
        assert!(page.flush().is_none());

        page.put("notice", Card::Empty);
        page.delete("notice");
        let ops = page.flush().unwrap().ops;
        assert_eq!(ops.len(), 2);
        assert!(page.card("notice").is_none());
    }

    #[test]
    fn append_and_replace_last_row() {
        let mut page = Page::new();
        page.put("chatbot", chatbot(vec![ChatRow::assistant("Welcome!")]));
        page.append_row("chatbot", ChatRow::user("hi")).unwrap();
        page.append_row("chatbot", ChatRow::assistant("...")).unwrap();
        page.set_last_row("chatbot", ChatRow::assistant("hello"))
            .unwrap();

        assert_eq!(
            page.rows("chatbot").unwrap(),
            &[
                ChatRow::assistant("Welcome!"),
                ChatRow::user("hi"),
                ChatRow::assistant("hello"),
            ]
        );

        let ops = page.flush().unwrap().ops;
        assert!(matches!(&ops[3], PageOp::SetRow { index: 2, .. }));
    }

    #[test]
    fn row_ops_on_wrong_cards_fail() {
        let mut page = Page::new();
        assert_eq!(
            page.append_row("chatbot", ChatRow::user("hi")),
            Err(PageError::NoSuchCard("chatbot".to_string()))
        );

        page.put("footer", Card::Empty);
        assert_eq!(
            page.append_row("footer", ChatRow::user("hi")),
            Err(PageError::NotAChatbot("footer".to_string()))
        );

        page.put("chatbot", chatbot(Vec::new()));
        assert!(matches!(
            page.set_last_row("chatbot", ChatRow::user("hi")),
            Err(PageError::RowOutOfRange { index: 0, .. })
        ));
    }
}
