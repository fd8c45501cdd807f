use thiserror::Error;

/// Errors raised while encoding or decoding Socket.IO traffic.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("received an empty frame")]
    EmptyFrame,

    #[error("unknown engine.io packet type '{0}'")]
    UnknownFrameType(char),

    #[error("unknown socket.io packet type '{0}'")]
    UnknownPacketType(char),

    /// Binary attachments (engine.io `b` frames, socket.io types 5 and 6).
    #[error("binary packets are not supported")]
    BinaryUnsupported,

    #[error("event packet carries no event name")]
    MissingEventName,

    #[error("ack packet carries no ack id")]
    MissingAckId,

    #[error("invalid ack id '{0}'")]
    InvalidAckId(String),

    #[error("invalid json payload: {0}")]
    Json(#[from] serde_json::Error),
}
