//! Newline-delimited JSON frames as written by the backend's event pipe.

use serde::Deserialize;
use serde_json::Value;

/// One push notification: `{"topic": "polled:state", "payload": "scraping"}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Frame {
    pub topic: String,
    #[serde(default)]
    pub payload: Value,
}

/// Parses one line; blank lines carry no frame.
pub fn parse_frame(line: &str) -> Result<Option<Frame>, serde_json::Error> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(line).map(Some)
}
