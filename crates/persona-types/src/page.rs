//! Page model: cards, layout zones, and the update messages pushed to the browser.
//!
//! The browser shell keeps a mirror of the card map. Every change the server
//! makes is expressed as a [`PageOp`]; a batch of ops is shipped as one
//! [`PageUpdate`] frame.

use serde::{Deserialize, Serialize};

/// Layout direction of a zone's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneDirection {
    Row,
    Column,
}

/// A named layout region. Cards are placed into zones by name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ZoneDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wrap: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub justify: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub zones: Vec<Zone>,
}

impl Zone {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            size: None,
            direction: None,
            wrap: None,
            justify: None,
            zones: Vec::new(),
        }
    }

    pub fn size(mut self, size: &str) -> Self {
        self.size = Some(size.to_string());
        self
    }

    pub fn direction(mut self, direction: ZoneDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn wrap(mut self, wrap: &str) -> Self {
        self.wrap = Some(wrap.to_string());
        self
    }

    pub fn justify(mut self, justify: &str) -> Self {
        self.justify = Some(justify.to_string());
        self
    }

    pub fn zones(mut self, zones: Vec<Zone>) -> Self {
        self.zones = zones;
        self
    }
}

/// Persona badge rendered inside the header card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    pub name: String,
    pub title: String,
    pub caption: String,
    pub image: String,
}

/// Form controls. Submitting a control raises an event named after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "control", rename_all = "snake_case")]
pub enum FormItem {
    Textbox {
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        value: Option<String>,
        placeholder: String,
        width: String,
    },
    Button {
        name: String,
        label: String,
        primary: bool,
        width: String,
    },
}

/// One transcript row of the chatbot card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRow {
    pub text: String,
    pub from_user: bool,
}

impl ChatRow {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: true,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            from_user: false,
        }
    }
}

/// A card description. `zone` is the layout zone the card is placed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Card {
    /// Page-level metadata and layout. Not placed in a zone.
    Meta {
        title: String,
        theme: String,
        layout: Vec<Zone>,
    },
    Header {
        zone: String,
        title: String,
        subtitle: String,
        image: String,
        persona: Persona,
    },
    Footer {
        zone: String,
        caption: String,
    },
    TallInfo {
        zone: String,
        name: String,
        caption: String,
        image: String,
        image_height: String,
    },
    Form {
        zone: String,
        items: Vec<FormItem>,
    },
    Chatbot {
        zone: String,
        name: String,
        rows: Vec<ChatRow>,
    },
    /// Inline error report.
    Notice {
        zone: String,
        text: String,
    },
    /// Placeholder with no visual content.
    Empty,
}

impl Card {
    /// Transcript rows when this is a chatbot card.
    pub fn rows(&self) -> Option<&[ChatRow]> {
        match self {
            Card::Chatbot { rows, .. } => Some(rows),
            _ => None,
        }
    }

    pub fn rows_mut(&mut self) -> Option<&mut Vec<ChatRow>> {
        match self {
            Card::Chatbot { rows, .. } => Some(rows),
            _ => None,
        }
    }
}

/// A single mutation of the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum PageOp {
    /// Declare or replace a card.
    Put { name: String, card: Card },
    Delete { name: String },
    /// Append a row to a chatbot card's transcript.
    AppendRow { card: String, row: ChatRow },
    /// Overwrite a transcript row in place.
    SetRow { card: String, index: usize, row: ChatRow },
}

/// One batch of ops shipped to the browser in a single frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename = "update")]
pub struct PageUpdate {
    pub ops: Vec<PageOp>,
}
