//! Connection registry: routes broker outboxes to live sessions.

use actix::prelude::*;
use dashmap::DashMap;
use uuid::Uuid;

use super::broker::Outbox;
use super::protocol::ServerMsg;

#[derive(Message, Clone)]
#[rtype(result = "()")]
pub struct Push(pub ServerMsg);

#[derive(Default)]
pub struct ConnectionRegistry {
    connections: DashMap<Uuid, Recipient<Push>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    pub fn register(&self, conn_id: Uuid, recipient: Recipient<Push>) {
        self.connections.insert(conn_id, recipient);
    }

    pub fn unregister(&self, conn_id: Uuid) {
        self.connections.remove(&conn_id);
    }

    /// Deliver an outbox; messages for connections that already went away
    /// are dropped silently.
    pub fn deliver(&self, outbox: Outbox) {
        for (conn_id, msg) in outbox {
            if let Some(recipient) = self.connections.get(&conn_id) {
                let _ = recipient.do_send(Push(msg));
            }
        }
    }
}
