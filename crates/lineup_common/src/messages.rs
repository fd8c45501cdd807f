use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Event names used on the queue socket.
pub mod events {
    pub const GET_STATE: &str = "get_state";
    pub const STATE_UPDATE: &str = "state_update";
    pub const REQUEST_TOKEN: &str = "request_token";
    pub const UPDATE_STATUS: &str = "update_status";
    pub const NEXT_TOKEN: &str = "next_token";
    pub const CLEAR_CURRENT: &str = "clear_current";
}

/// Statuses the professor dashboard offers. The student view accepts any string.
pub const PROFESSOR_STATUSES: [&str; 4] = ["Available", "Busy", "In Cabin", "Unavailable"];

/// A named event the client emits to the server.
///
/// The default encoding sends the value itself as the single argument after
/// the event name, i.e. `["request_token", {"name": ..., "type": ...}]`.
/// Zero-argument events override [`OutboundEvent::to_args`] to send nothing.
///
/// ## Example
///
/// ```rust
/// use lineup_common::{OutboundEvent, RequestToken};
///
/// let request = RequestToken::new("Alice", "Regular");
/// let args = request.to_args().unwrap();
/// assert_eq!(RequestToken::NAME, "request_token");
/// assert_eq!(args[0]["type"], "Regular");
/// ```
pub trait OutboundEvent: Serialize {
    /// Event name on the wire.
    const NAME: &'static str;

    /// Arguments following the event name in the Socket.IO event array.
    fn to_args(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(vec![serde_json::to_value(self)?])
    }
}

/// A named event pushed by the server, decoded from its first argument.
pub trait InboundEvent: DeserializeOwned {
    /// Event name on the wire.
    const NAME: &'static str;
}

/// One queue participant. Identity is `id`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Token {
    pub id: i64,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    /// Server-side `HH:MM:SS` stamp of when the token was issued.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// A full snapshot of the server's queue.
///
/// Every snapshot replaces the previous one. `queue` is kept in the order the
/// server sent it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq, Default)]
pub struct QueueState {
    pub professor_status: String,
    #[serde(default)]
    pub current_token: Option<Token>,
    #[serde(default)]
    pub queue: Vec<Token>,
}

impl InboundEvent for QueueState {
    const NAME: &'static str = events::STATE_UPDATE;
}

/// Pull the current snapshot; the server answers with `state_update`.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct GetState;

impl OutboundEvent for GetState {
    const NAME: &'static str = events::GET_STATE;

    fn to_args(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(Vec::new())
    }
}

/// Join the queue.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct RequestToken {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl RequestToken {
    pub fn new(name: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: kind.into(),
        }
    }
}

impl OutboundEvent for RequestToken {
    const NAME: &'static str = events::REQUEST_TOKEN;
}

/// Change the professor's status.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct UpdateStatus {
    pub status: String,
}

impl OutboundEvent for UpdateStatus {
    const NAME: &'static str = events::UPDATE_STATUS;
}

/// Move the head of the queue into the serving slot.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct NextToken;

impl OutboundEvent for NextToken {
    const NAME: &'static str = events::NEXT_TOKEN;

    fn to_args(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(Vec::new())
    }
}

/// Empty the serving slot without advancing the queue.
#[derive(Serialize, Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ClearCurrent;

impl OutboundEvent for ClearCurrent {
    const NAME: &'static str = events::CLEAR_CURRENT;

    fn to_args(&self) -> Result<Vec<Value>, serde_json::Error> {
        Ok(Vec::new())
    }
}
