//! WebSocket message DTOs.
//!
//! Every frame is a JSON object whose `type` field selects the variant.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Messages sent by a participant.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Click,
    SetName {
        name: String,
    },
    Start {
        /// A number or a numeric string; anything else counts as not given.
        #[serde(default)]
        duration: Option<serde_json::Value>,
    },
    /// Any `type` this server does not know; dropped by the router.
    #[serde(other)]
    Unrecognized,
}

impl ClientMessage {
    /// Parse one text frame.
    ///
    /// Frames that are not JSON, have no `type`, or miss a required field
    /// yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        serde_json::from_str(text).ok()
    }
}

/// Interpret the loose `duration` field of a `start` message as whole seconds.
pub fn requested_seconds(duration: Option<&serde_json::Value>) -> Option<i64> {
    match duration? {
        serde_json::Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().map(|f| f as i64),
        _ => None,
    }
}

/// Messages sent by the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once to a new connection so it can find itself in `state`.
    Connected { id: String, name: String },
    State {
        players: Vec<PlayerInfo>,
        #[serde(rename = "timeLeft")]
        time_left: u64,
    },
    RoundStarted { duration: u32 },
    GameOver {
        /// `null` when nobody was connected.
        winner: Option<String>,
        scores: BTreeMap<String, u32>,
    },
    Error { text: String },
}

impl ServerMessage {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerInfo {
    pub id: String,
    pub name: String,
    pub score: u32,
}
