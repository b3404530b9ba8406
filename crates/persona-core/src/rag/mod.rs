//! RAG service ports.

pub mod box_client;
pub mod chunks;
pub mod client;
#[cfg(test)]
pub(crate) mod mock;
pub mod profile;

pub use box_client::BoxRagClient;
pub use client::{RagClient, RagConnector};
