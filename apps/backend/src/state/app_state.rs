//! Shared application state.

use std::sync::Arc;

use crate::ws::broker::RoomBroker;
use crate::ws::hub::ConnectionRegistry;

pub struct AppState {
    broker: Arc<RoomBroker>,
    registry: Arc<ConnectionRegistry>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            broker: Arc::new(RoomBroker::new()),
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    pub fn broker(&self) -> Arc<RoomBroker> {
        self.broker.clone()
    }

    pub fn registry(&self) -> Arc<ConnectionRegistry> {
        self.registry.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
