//! Minimal WebSocket client for requesting host detail from the agent.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::debug;

use crate::error::FetchFailure;
use crate::poller::SampleSource;
use crate::types::{DetailReply, HostDetail};

pub type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

// Connect to the agent and return the WS stream
pub async fn connect(url: &str) -> Result<WsStream, FetchFailure> {
    let (ws, _) = connect_async(url).await?;
    Ok(ws)
}

pub fn detail_request(server_id: u64) -> String {
    format!("get_detail:{server_id}")
}

// Send a "get_detail:<id>" request and await the single text reply
pub async fn request_text(ws: &mut WsStream, server_id: u64) -> Result<String, FetchFailure> {
    ws.send(Message::Text(detail_request(server_id))).await?;
    loop {
        match ws.next().await {
            Some(Ok(Message::Text(json))) => return Ok(json),
            // control frames are answered by tungstenite itself
            Some(Ok(Message::Ping(_) | Message::Pong(_))) => continue,
            Some(Ok(Message::Close(_))) | None => {
                return Err(FetchFailure::new("connection closed by agent"))
            }
            Some(Ok(other)) => {
                return Err(FetchFailure::new(format!("unexpected frame: {other:?}")))
            }
            Some(Err(e)) => return Err(e.into()),
        }
    }
}

pub async fn request_detail(ws: &mut WsStream, server_id: u64) -> Result<HostDetail, FetchFailure> {
    decode_reply(&request_text(ws, server_id).await?)
}

pub fn decode_reply(json: &str) -> Result<HostDetail, FetchFailure> {
    match serde_json::from_str::<DetailReply>(json)? {
        DetailReply::Detail(d) => Ok(d),
        DetailReply::Error { error } => Err(FetchFailure::new(error)),
    }
}

/// Agent connection that is opened lazily and reopened on the next poll after
/// any failure.
pub struct WsSource {
    url: String,
    ws: Option<WsStream>,
}

impl WsSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ws: None,
        }
    }
}

impl SampleSource for WsSource {
    async fn fetch(&mut self, server_id: u64) -> Result<HostDetail, FetchFailure> {
        let mut ws = match self.ws.take() {
            Some(ws) => ws,
            None => {
                debug!(url = %self.url, "connecting");
                connect(&self.url).await?
            }
        };
        // a transport failure drops the socket; the next poll reconnects
        let json = request_text(&mut ws, server_id).await?;
        self.ws = Some(ws);
        decode_reply(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_text_carries_server_id() {
        assert_eq!(detail_request(7), "get_detail:7");
    }

    #[test]
    fn agent_error_becomes_fetch_failure() {
        let err = decode_reply(r#"{"error":"server 7 not found"}"#).unwrap_err();
        assert_eq!(err.message, "server 7 not found");
    }

    #[test]
    fn garbage_reply_is_a_decode_failure() {
        let err = decode_reply("not json").unwrap_err();
        assert!(err.message.starts_with("decode:"), "{err}");
    }
}
