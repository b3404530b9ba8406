//! Orchestration logic for Persona.
//!
//! This crate defines the RAG service "ports" (`RagClient`, `RagConnector`)
//! that the infrastructure layer implements, the server-side page model,
//! and the controller that glues UI events to RAG calls. It depends only on
//! `persona-types` -- never on `persona-infra` or any HTTP crate.

pub mod connection;
pub mod controller;
pub mod page;
pub mod rag;
pub mod session;
