//! h2oGPTe RAG service adapter.

pub mod client;
pub mod types;

pub use client::{H2oGpteClient, H2oGpteConnector};
