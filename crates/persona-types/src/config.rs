//! Configuration types for Persona.
//!
//! `AppConfig` mirrors `persona.toml`. Every section and field has a default,
//! so an empty file (or no file at all) yields a working configuration that
//! points at the public h2oGPTe training endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

const DEFAULT_SYSTEM_PROMPT: &str = "Hello, I'm an AI bot with access to your LinkedIn profile. \
How can I assist you today? Whether it's updating your professional summary, connecting with new \
contacts, job search advice, or anything related to your career, I'm here to help. Just let me \
know what you need, and I'll provide personalized assistance based on your LinkedIn information";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rag: RagConfig,
    pub profile: ProfileConfig,
    pub chat: ChatConfig,
    pub page: PageConfig,
}

/// Where the RAG service lives and how to reach it.
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RagConfig {
    pub endpoint: String,
    /// Credential pre-filled into the login form.
    pub api_key: Option<String>,
    /// Per-request timeout for every call except chat queries.
    pub request_timeout_secs: u64,
}

impl Default for RagConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://h2ogpte.genai-training.h2o.ai".to_string(),
            api_key: None,
            request_timeout_secs: 300,
        }
    }
}

// Hand-written so the default credential never ends up in logs.
impl fmt::Debug for RagConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RagConfig")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Which collection describes the person, and what to show when extraction fails.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    pub collection_name: String,
    pub default_name: String,
    pub default_title: String,
    /// Highest chunk id probed during enumeration.
    pub max_chunks: u32,
    /// How many recent collections are scanned for a name match.
    pub collection_scan_limit: u32,
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            collection_name: "MyProfile".to_string(),
            default_name: "John Doe".to_string(),
            default_title: "Senior Analyst".to_string(),
            max_chunks: 99,
            collection_scan_limit: 1000,
        }
    }
}

/// Chat session behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub system_prompt: String,
    pub query_timeout_secs: u64,
    /// Pause before each revealed piece of an answer.
    pub reveal_delay_ms: u64,
    /// Literal the answer is split on for the typing reveal.
    pub reveal_delimiter: String,
    pub typing_indicator_url: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            query_timeout_secs: 10_600,
            reveal_delay_ms: 300,
            reveal_delimiter: "/n".to_string(),
            typing_indicator_url: "https://i.gifer.com/9u7v.gif".to_string(),
        }
    }
}

/// Static page copy and imagery.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub title: String,
    pub theme: String,
    pub header_title: String,
    pub header_image: String,
    pub persona_image: String,
    pub info_caption: String,
    pub info_image: String,
    pub footer_caption: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            title: "AI Enhanced Career Development".to_string(),
            theme: "lighting".to_string(),
            header_title: "Personal AI Assistant".to_string(),
            header_image: "https://encrypted-tbn0.gstatic.com/images?q=tbn:ANd9GcRYiPLBie36OVSxyLYJAFQrykIDPkkft-0cBA&usqp=CAU".to_string(),
            persona_image: "https://images.pexels.com/photos/220453/pexels-photo-220453.jpeg?auto=compress&h=750&w=1260".to_string(),
            info_caption: "Personal AI Assistant".to_string(),
            info_image: "https://images.pexels.com/photos/8386440/pexels-photo-8386440.jpeg".to_string(),
            footer_caption: "Made with love using Rust.".to_string(),
        }
    }
}
