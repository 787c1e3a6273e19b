/// WebSocket session handler for matchmaking.
///
/// This actor manages a single client's connection: it registers the connection with the
/// matchmaking server, relays parsed client messages (join, signal, chat, leave) to it,
/// and serializes server events back to the client. Losing the connection, by close frame
/// or by heartbeat timeout, is reported to the server as a disconnect.
use std::time::{Duration, Instant};

use actix::prelude::*;
use actix_web::{http::StatusCode, web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use log::{debug, error, warn};
use uuid::Uuid;

use super::messages::{ClientWsMessage, ServerWsMessage};
use super::server::{Connect, Disconnect, JoinQueue, LeaveRoom, MatchmakingServer, RelayChat, RelaySignal};
use super::types::{ClientId, RoomId};
use crate::config::matchmaking::{CLIENT_TIMEOUT_SECS, HEARTBEAT_INTERVAL_SECS, INVALID_CLIENT_MESSAGE};
use crate::server::ws_error::{http_error_response, ws_error_message};

/// Represents a client's WebSocket connection.
pub struct MatchmakingSession {
    pub client_id: ClientId,
    pub last_heartbeat: Instant,
    pub matchmaking_addr: Addr<MatchmakingServer>,
}

impl MatchmakingSession {
    pub fn new(matchmaking_addr: Addr<MatchmakingServer>) -> Self {
        Self {
            client_id: Uuid::new_v4(),
            last_heartbeat: Instant::now(),
            matchmaking_addr,
        }
    }

    /// Ping the client periodically and stop the session when it goes silent.
    fn start_heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(Duration::from_secs(HEARTBEAT_INTERVAL_SECS), |act, ctx| {
            if act.last_heartbeat.elapsed() > Duration::from_secs(CLIENT_TIMEOUT_SECS) {
                warn!("[Session] Client {} timed out", act.client_id);
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    /// Forward a parsed client message to the matchmaking server.
    fn dispatch(&self, msg: ClientWsMessage) {
        let client_id = self.client_id;
        match msg {
            ClientWsMessage::JoinQueue(request) => {
                self.matchmaking_addr.do_send(JoinQueue { client_id, request });
            }
            ClientWsMessage::Signal { room, signal_data } => {
                if let Some(room) = parse_room(&room) {
                    self.matchmaking_addr.do_send(RelaySignal { client_id, room, signal_data });
                }
            }
            ClientWsMessage::ChatMessage { room, message } => {
                if let Some(room) = parse_room(&room) {
                    self.matchmaking_addr.do_send(RelayChat { client_id, room, message });
                }
            }
            ClientWsMessage::LeaveRoom(room) => {
                if let Some(room) = parse_room(&room) {
                    self.matchmaking_addr.do_send(LeaveRoom { client_id, room });
                }
            }
            ClientWsMessage::Ping => {
                // Any frame already refreshed the heartbeat.
            }
        }
    }
}

/// Room ids that are not valid tokens can never name a live room.
fn parse_room(room: &str) -> Option<RoomId> {
    match Uuid::parse_str(room) {
        Ok(id) => Some(id),
        Err(_) => {
            debug!("[Session] Ignoring unknown room reference {:?}", room);
            None
        }
    }
}

impl Actor for MatchmakingSession {
    type Context = ws::WebsocketContext<Self>;

    /// Called when the session starts. Registers the connection with the matchmaking server.
    fn started(&mut self, ctx: &mut Self::Context) {
        self.start_heartbeat(ctx);
        self.matchmaking_addr.do_send(Connect {
            client_id: self.client_id,
            addr: ctx.address().recipient(),
        });
        debug!("[Session] Client {} connected", self.client_id);
    }

    /// Called when the session stops. Removes the client from its pool or room.
    fn stopped(&mut self, _ctx: &mut Self::Context) {
        self.matchmaking_addr.do_send(Disconnect {
            client_id: self.client_id,
        });
        debug!("[Session] Client {} disconnected", self.client_id);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for MatchmakingSession {
    /// Handles incoming WebSocket messages from the client.
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        let msg = match msg {
            Ok(msg) => msg,
            Err(e) => {
                warn!("[Session] Protocol error from {}: {}", self.client_id, e);
                ctx.stop();
                return;
            }
        };
        self.last_heartbeat = Instant::now();

        match msg {
            ws::Message::Text(text) => match serde_json::from_str::<ClientWsMessage>(&text) {
                Ok(client_msg) => self.dispatch(client_msg),
                Err(e) => {
                    debug!("[Session] Invalid message from {}: {}", self.client_id, e);
                    ctx.text(ws_error_message(INVALID_CLIENT_MESSAGE));
                }
            },
            ws::Message::Ping(msg) => ctx.pong(&msg),
            ws::Message::Close(reason) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => (),
        }
    }
}

impl Handler<ServerWsMessage> for MatchmakingSession {
    type Result = ();

    /// Handles messages sent from the server to this session.
    fn handle(&mut self, msg: ServerWsMessage, ctx: &mut Self::Context) {
        match serde_json::to_string(&msg) {
            Ok(text) => ctx.text(text),
            Err(e) => {
                // Serialization error: notify client and close connection.
                error!("[Session] Failed to serialize ServerWsMessage: {}", e);
                ctx.text(ws_error_message("Internal server error"));
                ctx.close(Some(ws::CloseReason {
                    code: ws::CloseCode::Error,
                    description: Some("Internal server error".into()),
                }));
                ctx.stop();
            }
        }
    }
}

/// WebSocket endpoint for matchmaking.
///
/// Browser handshakes must come from an allowed origin.
pub async fn ws_matchmaking(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<crate::server::state::AppState>,
) -> Result<HttpResponse, Error> {
    if !data.allowed_origins.permits(req.headers()) {
        warn!("[Session] Rejected websocket handshake from disallowed origin");
        return Ok(http_error_response(
            "ORIGIN_NOT_ALLOWED",
            "Origin is not allowed to connect",
            StatusCode::FORBIDDEN,
        ));
    }

    ws::start(
        MatchmakingSession::new(data.matchmaking_addr.clone()),
        &req,
        stream,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::App;
    use awc::ws as client_ws;
    use futures_util::{SinkExt, Stream, StreamExt};

    use crate::server::cors::AllowedOrigins;
    use crate::server::state::AppState;

    #[test]
    fn test_parse_room_accepts_uuid() {
        let room = Uuid::new_v4();
        assert_eq!(parse_room(&room.to_string()), Some(room));
    }

    #[test]
    fn test_parse_room_ignores_non_uuid() {
        assert_eq!(parse_room("abc-def"), None);
        assert_eq!(parse_room(""), None);
    }

    fn start_server() -> actix_test::TestServer {
        let state = web::Data::new(AppState::new(
            MatchmakingServer::new().start(),
            AllowedOrigins::from_csv("http://localhost"),
        ));
        actix_test::start(move || {
            App::new()
                .app_data(state.clone())
                .configure(crate::server::router::config)
        })
    }

    /// Next server event on a client connection, skipping control frames.
    async fn next_event<S>(conn: &mut S) -> ServerWsMessage
    where
        S: Stream<Item = Result<client_ws::Frame, awc::error::WsProtocolError>> + Unpin,
    {
        loop {
            match conn.next().await {
                Some(Ok(client_ws::Frame::Text(bytes))) => {
                    return serde_json::from_slice(&bytes).expect("server sent invalid JSON");
                }
                Some(Ok(_)) => continue,
                other => panic!("connection ended unexpectedly: {:?}", other),
            }
        }
    }

    fn join(nickname: &str, gender: &str) -> client_ws::Message {
        client_ws::Message::Text(
            format!(
                r#"{{"action":"joinQueue","data":{{"nickname":"{}","gender":"{}","ageGroup":"18+"}}}}"#,
                nickname, gender
            )
            .into(),
        )
    }

    #[actix_web::test]
    async fn test_malformed_frame_reports_error_and_keeps_connection() {
        let mut srv = start_server();
        let mut conn = srv.ws_at("/ws").await.unwrap();

        conn.send(client_ws::Message::Text("not json".into())).await.unwrap();
        assert_eq!(next_event(&mut conn).await, ServerWsMessage::error(INVALID_CLIENT_MESSAGE));

        // Same connection still serves requests.
        conn.send(join("x", "other")).await.unwrap();
        assert_eq!(next_event(&mut conn).await, ServerWsMessage::error("Invalid queue"));
    }

    #[actix_web::test]
    async fn test_closing_socket_notifies_partner() {
        let mut srv = start_server();
        let mut first = srv.ws_at("/ws").await.unwrap();
        let mut second = srv.ws_at("/ws").await.unwrap();

        // Two males pair through the fallback whichever join lands first.
        first.send(join("one", "male")).await.unwrap();
        second.send(join("two", "male")).await.unwrap();

        let room = match (next_event(&mut first).await, next_event(&mut second).await) {
            (
                ServerWsMessage::Matched { room: a, partner_nickname: pa, initiator: ia },
                ServerWsMessage::Matched { room: b, partner_nickname: pb, initiator: ib },
            ) => {
                assert_eq!(a, b);
                assert_eq!((pa.as_str(), pb.as_str()), ("two", "one"));
                assert_ne!(ia, ib);
                a
            }
            other => panic!("unexpected events {:?}", other),
        };

        // A relay through a malformed room id is dropped; a real one arrives.
        first
            .send(client_ws::Message::Text(
                r#"{"action":"chatMessage","data":{"room":"not-a-room","message":"lost"}}"#.into(),
            ))
            .await
            .unwrap();
        first
            .send(client_ws::Message::Text(
                format!(r#"{{"action":"chatMessage","data":{{"room":"{}","message":"hi"}}}}"#, room)
                    .into(),
            ))
            .await
            .unwrap();
        assert_eq!(
            next_event(&mut second).await,
            ServerWsMessage::message(serde_json::json!("hi"))
        );

        first.send(client_ws::Message::Close(None)).await.unwrap();
        assert_eq!(next_event(&mut second).await, ServerWsMessage::PartnerDisconnected);
    }
}
