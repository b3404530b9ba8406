//! Card builders for every region of the page.

use persona_types::config::PageConfig;
use persona_types::page::{Card, ChatRow, FormItem, Persona, Zone, ZoneDirection};
use persona_types::profile::Profile;

pub const META: &str = "meta";
pub const HEADER: &str = "header";
pub const FOOTER: &str = "footer";
pub const IMAGE: &str = "image";
pub const LOGIN: &str = "find_collection";
pub const CHATBOT: &str = "chatbot";
pub const NOTICE: &str = "notice";
pub const SCRATCH: &str = "scratch";

pub fn meta_card(page: &PageConfig) -> Card {
    Card::Meta {
        title: page.title.clone(),
        theme: page.theme.clone(),
        layout: vec![
            Zone::new("header"),
            Zone::new("content").size("0").zones(vec![
                Zone::new("vertical")
                    .size("1")
                    .direction(ZoneDirection::Column),
                Zone::new("collection_zone")
                    .size("1")
                    .direction(ZoneDirection::Row),
                Zone::new("horizontal")
                    .size("1")
                    .direction(ZoneDirection::Row),
                Zone::new("grid")
                    .direction(ZoneDirection::Row)
                    .wrap("stretch")
                    .justify("center"),
            ]),
            Zone::new("footer"),
        ],
    }
}

pub fn header_card(page: &PageConfig, profile: &Profile) -> Card {
    Card::Header {
        zone: "header".to_string(),
        title: page.header_title.clone(),
        subtitle: String::new(),
        image: page.header_image.clone(),
        persona: Persona {
            name: profile.name.clone(),
            title: profile.title.clone(),
            caption: "Online".to_string(),
            image: page.persona_image.clone(),
        },
    }
}

pub fn footer_card(page: &PageConfig) -> Card {
    Card::Footer {
        zone: "footer".to_string(),
        caption: page.footer_caption.clone(),
    }
}

pub fn info_card(page: &PageConfig) -> Card {
    Card::TallInfo {
        zone: "vertical".to_string(),
        name: "image_card".to_string(),
        caption: page.info_caption.clone(),
        image: page.info_image.clone(),
        image_height: "600px".to_string(),
    }
}

/// API key field plus the launch button.
pub fn login_form(default_key: Option<&str>) -> Card {
    Card::Form {
        zone: "collection_zone".to_string(),
        items: vec![
            FormItem::Textbox {
                name: "api_key".to_string(),
                value: default_key.map(str::to_string),
                placeholder: "Paste your API key here!".to_string(),
                width: "90%".to_string(),
            },
            FormItem::Button {
                name: super::LAUNCH.to_string(),
                label: "Launch".to_string(),
                primary: true,
                width: "10%".to_string(),
            },
        ],
    }
}

/// Fresh chat widget seeded with the assistant's welcome.
pub fn chatbot_card(collection_name: &str) -> Card {
    Card::Chatbot {
        zone: "horizontal".to_string(),
        name: CHATBOT.to_string(),
        rows: vec![ChatRow::assistant(format!(
            "Welcome! What would you like to accomplish today using **{collection_name}**?"
        ))],
    }
}

pub fn error_card(text: &str) -> Card {
    Card::Notice {
        zone: "grid".to_string(),
        text: text.to_string(),
    }
}

/// Animated placeholder row shown while the answer is pending.
pub fn typing_indicator(url: &str) -> String {
    format!("<img src='{url}' height='40px'/>")
}
