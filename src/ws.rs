use crate::{
    client::Client,
    error::GameError,
    game::{ClientMessage, SessionId, Snapshot},
    session::SessionManager,
};
use futures_util::{select, FutureExt, SinkExt, StreamExt, TryStreamExt};
use serde_json::{json, Value};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;

#[derive(Error, Debug)]
enum WsError {
    #[error("violation of the application-layer protocol")]
    ProtocolError,
    #[error("{0}")]
    GameError(#[from] GameError),
}

pub async fn accept_connection(stream: TcpStream, manager: &SessionManager) {
    log::info!("Accepted new connection");

    let Ok(stream) = tokio_tungstenite::accept_async(stream).await else {
        log::error!("Error occured during websocket handshake");
        return;
    };
    let (mut write, read) = stream.split();
    let mut read = read.fuse();

    let mut client = Client::new(manager);
    let mut consented = false;

    loop {
        select! {
            msg = read.try_next() => {
                let msg = match msg {
                    Ok(Some(Message::Text(msg))) => msg,
                    Ok(Some(Message::Close(_))) => {
                        consented = true;
                        break;
                    }
                    Ok(Some(_)) => continue,
                    Ok(None) | Err(_) => break,
                };
                let Ok(msg) = serde_json::from_str::<Value>(&msg) else {
                    log::warn!("Invalid JSON received: {}", &msg);
                    continue;
                };
                let req = match parse_request(msg) {
                    Ok(req) => req,
                    Err(err) => {
                        log::warn!("Invalid message received: {}", err);
                        continue;
                    }
                };
                match process_request(req, &mut client) {
                    Ok(Some(reply)) => {
                        let reply = format_reply(reply);
                        write.send(Message::Text(reply.to_string())).await.ok();
                    }
                    Ok(None) => {}
                    // Rejections are logged by the session and never reported to the client
                    Err(err) => log::debug!("Request failed: {}", err),
                }
            },
            msg = client.next_message().fuse() => {
                let Some(msg) = msg else {
                    break;
                };
                let Ok(msg) = serde_json::to_string(&msg) else {
                    log::error!("Could not serialise message: {:?}", msg);
                    continue;
                };
                if write.send(Message::Text(msg)).await.is_err() {
                    log::error!("Could not send websockets message");
                    break;
                }
            }
        }
    }

    log::info!("Connection closed{}", if consented { " by the client" } else { "" });
    client.leave(consented);
    manager.purge_games();
    log::debug!("{} rooms open", manager.num_games());
}

/// A message sent by a game client to the server.
enum Request {
    Join {
        room_id: Option<String>,
        session_id: Option<String>,
        nickname: Option<String>,
    },
    GetState,
    Game(ClientMessage),
}

/// A message sent by the server to a game client, outside of the game's own messages.
enum Response {
    Session { room_id: String, session_id: SessionId },
    State(Snapshot),
}

/// Parses a websockets message from the client.
fn parse_request(req: Value) -> Result<Request, WsError> {
    let kind = req["type"].as_str().ok_or(WsError::ProtocolError)?.to_string();
    match kind.as_str() {
        "join" => {
            let field = |name: &str| req[name].as_str().map(str::to_string);
            Ok(Request::Join {
                room_id: field("roomId"),
                session_id: field("sessionId"),
                nickname: field("nickname"),
            })
        }
        "get-state" => Ok(Request::GetState),
        _ => serde_json::from_value(req)
            .map(Request::Game)
            .map_err(|_| WsError::ProtocolError),
    }
}

/// Processes a request from the client.
fn process_request(req: Request, client: &mut Client) -> Result<Option<Response>, WsError> {
    match req {
        Request::Join {
            room_id,
            session_id,
            nickname,
        } => {
            let (room_id, session_id) =
                client.join(room_id.as_deref(), session_id.as_deref(), nickname.as_deref())?;
            Ok(Some(Response::Session { room_id, session_id }))
        }
        Request::GetState => Ok(Some(Response::State(client.get_state()?))),
        Request::Game(msg) => {
            client.handle_message(msg)?;
            Ok(None)
        }
    }
}

/// Formats a reply to the client to be sent over websockets.
fn format_reply(res: Response) -> Value {
    match res {
        Response::Session { room_id, session_id } => json!({
            "type": "session",
            "roomId": room_id,
            "sessionId": session_id
        }),
        Response::State(state) => json!({
            "type": "state",
            "state": state
        }),
    }
}
