//! Logging and tracing setup for Persona.

pub mod tracing_setup;
