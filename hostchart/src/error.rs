//! The one failure the charts know about.

use thiserror::Error;

/// A poll that produced no sample: connect error, socket error, bad reply or an
/// agent-side error. All of them display the same way.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FetchFailure {
    pub message: String,
}

impl FetchFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl From<tokio_tungstenite::tungstenite::Error> for FetchFailure {
    fn from(e: tokio_tungstenite::tungstenite::Error) -> Self {
        Self::new(format!("websocket: {e}"))
    }
}

impl From<serde_json::Error> for FetchFailure {
    fn from(e: serde_json::Error) -> Self {
        Self::new(format!("decode: {e}"))
    }
}
