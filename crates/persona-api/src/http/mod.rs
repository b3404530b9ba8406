//! HTTP layer for Persona.
//!
//! Serves the browser shell at `/`, the page-update WebSocket at `/ws` and a
//! health check.

pub mod handlers;
pub mod router;
