pub mod health;
pub mod shell;
pub mod ws;
