//! WebSocket upgrade and per-connection handler. Serves cached JSON quickly.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::stream::StreamExt;
use tracing::debug;

use crate::metrics::collect_detail;
use crate::state::AppState;
use crate::types::ErrorReply;

const DETAIL_PREFIX: &str = "get_detail:";

/// Parses `get_detail:<server_id>`; `Err` is the message sent back to the client.
pub fn parse_request(text: &str) -> Result<u64, String> {
    let raw = text
        .trim()
        .strip_prefix(DETAIL_PREFIX)
        .ok_or_else(|| format!("unsupported request {text:?}"))?;
    raw.trim()
        .parse::<u64>()
        .map_err(|_| format!("unsupported request {text:?}: bad server id"))
}

fn error_json(error: String) -> String {
    serde_json::to_string(&ErrorReply { error })
        .unwrap_or_else(|_| r#"{"error":"internal error"}"#.to_string())
}

pub async fn reply_for(state: &AppState, text: &str) -> String {
    match parse_request(text) {
        Ok(id) if id == state.server_id => {
            let cached = state.last_json.read().await.clone();
            if !cached.is_empty() {
                return cached;
            }
            // Cold start: collect once
            let detail = collect_detail(state).await;
            match serde_json::to_string(&detail) {
                Ok(js) => js,
                Err(e) => error_json(format!("serialize: {e}")),
            }
        }
        Ok(id) => error_json(format!("server {id} not found")),
        Err(msg) => error_json(msg),
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(mut socket: WebSocket, state: AppState) {
    debug!("client connected");
    while let Some(Ok(msg)) = socket.next().await {
        match msg {
            Message::Text(text) => {
                let reply = reply_for(&state, &text).await;
                if socket.send(Message::Text(reply)).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }
    debug!("client disconnected");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_detail_requests() {
        assert_eq!(parse_request("get_detail:1"), Ok(1));
        assert_eq!(parse_request(" get_detail:42\n"), Ok(42));
        assert!(parse_request("get_metrics").is_err());
        assert!(parse_request("get_detail:").is_err());
        assert!(parse_request("get_detail:-3").is_err());
    }

    #[tokio::test]
    async fn serves_cached_json_for_own_id() {
        let state = AppState::new(3, "box".into());
        *state.last_json.write().await = r#"{"cached":true}"#.to_string();
        assert_eq!(reply_for(&state, "get_detail:3").await, r#"{"cached":true}"#);
    }

    #[tokio::test]
    async fn other_ids_get_an_error_reply() {
        let state = AppState::new(3, "box".into());
        let reply: serde_json::Value =
            serde_json::from_str(&reply_for(&state, "get_detail:4").await).unwrap();
        assert_eq!(reply["error"], "server 4 not found");
    }

    #[tokio::test]
    async fn cold_start_collects_once() {
        let state = AppState::new(8, "box".into());
        let reply: serde_json::Value =
            serde_json::from_str(&reply_for(&state, "get_detail:8").await).unwrap();
        assert_eq!(reply["server_id"], 8);
        assert_eq!(reply["name"], "box");
        assert!(reply.get("net_in_speed").is_some());
    }

    #[tokio::test]
    async fn garbage_gets_an_error_reply() {
        let state = AppState::new(1, "box".into());
        let reply: serde_json::Value =
            serde_json::from_str(&reply_for(&state, "hello").await).unwrap();
        assert!(reply["error"].as_str().unwrap().starts_with("unsupported request"));
    }
}
