//! WebSocket session actor: one per connected client.

use std::sync::Arc;
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use tracing::{info, warn};
use uuid::Uuid;

use crate::state::app_state::AppState;
use crate::ws::broker::{Outbox, RoomBroker};
use crate::ws::hub::{ConnectionRegistry, Push};
use crate::ws::protocol::{ClientMsg, ErrorCode, ServerMsg};

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(20);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(40);

pub async fn upgrade(
    req: HttpRequest,
    stream: web::Payload,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let conn_id = Uuid::new_v4();
    let session = WsSession::new(conn_id, app_state.broker(), app_state.registry());
    ws::start(session, &req, stream)
}

pub struct WsSession {
    conn_id: Uuid,
    broker: Arc<RoomBroker>,
    registry: Arc<ConnectionRegistry>,
    last_heartbeat: Instant,
}

impl WsSession {
    fn new(conn_id: Uuid, broker: Arc<RoomBroker>, registry: Arc<ConnectionRegistry>) -> Self {
        Self {
            conn_id,
            broker,
            registry,
            last_heartbeat: Instant::now(),
        }
    }

    fn send_json(ctx: &mut ws::WebsocketContext<Self>, msg: &ServerMsg) {
        match serde_json::to_string(msg) {
            Ok(payload) => ctx.text(payload),
            Err(err) => warn!(error = %err, "failed to serialize outbound message"),
        }
    }

    /// Messages for this connection go straight out on the socket, so the
    /// caller sees them in order; the rest route through the registry.
    fn dispatch(&self, ctx: &mut ws::WebsocketContext<Self>, outbox: Outbox) {
        let mut remote = Outbox::new();
        for (conn_id, msg) in outbox {
            if conn_id == self.conn_id {
                Self::send_json(ctx, &msg);
            } else {
                remote.push((conn_id, msg));
            }
        }
        self.registry.deliver(remote);
    }

    fn handle_client_msg(&self, cmd: ClientMsg, ctx: &mut ws::WebsocketContext<Self>) {
        let result = match cmd {
            ClientMsg::CreateRoom => self.broker.create_room(self.conn_id),
            ClientMsg::JoinRoom { room_id } => self.broker.join_room(self.conn_id, &room_id),
            ClientMsg::SubmitMove { room_id, mv } => {
                self.broker.submit_move(self.conn_id, &room_id, mv)
            }
            ClientMsg::Rematch { room_id } => self.broker.rematch(self.conn_id, &room_id),
        };
        match result {
            Ok(outbox) => self.dispatch(ctx, outbox),
            Err(err) => {
                info!(conn_id = %self.conn_id, error = %err, "rejected client message");
                Self::send_json(ctx, &ServerMsg::error(&err));
            }
        }
    }

    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |actor, ctx| {
            if Instant::now().duration_since(actor.last_heartbeat) > CLIENT_TIMEOUT {
                warn!(conn_id = %actor.conn_id, "heartbeat timed out");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Normal)));
                ctx.stop();
                return;
            }
            ctx.ping(b"keepalive");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!(conn_id = %self.conn_id, "ws session started");
        self.registry
            .register(self.conn_id, ctx.address().recipient::<Push>());
        self.start_heartbeat(ctx);
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        // A dropped participant ends the session for good: the peer is
        // notified and the room destroyed. No resume.
        let outbox = self.broker.disconnect(self.conn_id);
        self.registry.deliver(outbox);
        self.registry.unregister(self.conn_id);
        info!(conn_id = %self.conn_id, "ws session stopped");
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.last_heartbeat = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.last_heartbeat = Instant::now();
            }
            Ok(ws::Message::Text(text)) => {
                self.last_heartbeat = Instant::now();
                match serde_json::from_str::<ClientMsg>(&text) {
                    Ok(cmd) => self.handle_client_msg(cmd, ctx),
                    Err(err) => {
                        // Malformed input never touches room state and never
                        // kills the session.
                        info!(conn_id = %self.conn_id, error = %err, "malformed client payload");
                        Self::send_json(
                            ctx,
                            &ServerMsg::Error {
                                code: ErrorCode::BadRequest,
                                message: "Malformed JSON payload".into(),
                            },
                        );
                    }
                }
            }
            Ok(ws::Message::Binary(_)) => {
                self.last_heartbeat = Instant::now();
                Self::send_json(
                    ctx,
                    &ServerMsg::Error {
                        code: ErrorCode::BadRequest,
                        message: "Binary frames are not supported".into(),
                    },
                );
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            Ok(ws::Message::Continuation(_)) | Ok(ws::Message::Nop) => {
                self.last_heartbeat = Instant::now();
            }
            Err(err) => {
                warn!(conn_id = %self.conn_id, error = %err, "ws protocol error");
                ctx.close(Some(ws::CloseReason::from(ws::CloseCode::Error)));
                ctx.stop();
            }
        }
    }
}

impl Handler<Push> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: Push, ctx: &mut Self::Context) -> Self::Result {
        Self::send_json(ctx, &msg.0);
    }
}
