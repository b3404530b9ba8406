//! Shared state for the HTTP host.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use persona_core::controller::Controller;
use persona_infra::h2ogpte::H2oGpteConnector;
use persona_types::config::AppConfig;
use persona_types::event::ConnectionId;

pub type ConcreteController = Controller<H2oGpteConnector>;

/// Bookkeeping for one live browser connection.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub connected_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct AppState {
    pub controller: Arc<ConcreteController>,
    pub connections: Arc<DashMap<ConnectionId, ConnectionInfo>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let connector = H2oGpteConnector::new(&config.rag);
        Self {
            controller: Arc::new(Controller::new(connector, Arc::new(config))),
            connections: Arc::new(DashMap::new()),
        }
    }
}
