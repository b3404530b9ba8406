//! Shared domain types for Persona.
//!
//! Page/card model, UI events, RAG service records, configuration, and the
//! error enums shared by the controller and the adapters.
//!
//! Zero infrastructure dependencies -- only serde, uuid, thiserror.

pub mod config;
pub mod error;
pub mod event;
pub mod page;
pub mod profile;
pub mod rag;
