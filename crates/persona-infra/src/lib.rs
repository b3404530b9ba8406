//! Infrastructure layer for Persona.
//!
//! Contains the implementations of the RAG ports defined in `persona-core`
//! (the h2oGPTe REST client) and the TOML configuration loader.

pub mod config;
pub mod h2ogpte;
