use lineup_common::CodecError;
use thiserror::Error;

/// Errors that can occur when using the lineup_client library.
///
/// The `Display` text of the user-facing variants is shown verbatim in
/// notifications, so keep it phrased for people, not logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The join form was submitted with a blank name.
    #[error("Please enter your name")]
    EmptyName,

    /// A command that needs a live session was issued while disconnected.
    #[error("Please connect to the server first")]
    NotConnected,

    /// A `state_update` payload did not match the expected snapshot shape.
    #[error("Malformed state snapshot: {0}")]
    MalformedSnapshot(String),

    /// The server refused the Socket.IO connection.
    #[error("Server rejected the connection: {0}")]
    ConnectRejected(String),

    /// Encoding or decoding a frame failed.
    #[error("Codec error: {0}")]
    Codec(String),

    /// Reading or writing the preference store failed.
    #[error("Preference storage error: {0}")]
    Storage(String),

    /// The configured or derived server URL is unusable.
    #[error("Invalid server url '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The page-embedded configuration could not be parsed.
    #[error("Invalid client configuration: {0}")]
    Config(String),
}

impl From<CodecError> for ClientError {
    fn from(err: CodecError) -> Self {
        ClientError::Codec(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(ClientError::EmptyName.to_string(), "Please enter your name");
        assert_eq!(
            ClientError::NotConnected.to_string(),
            "Please connect to the server first"
        );
    }

    #[test]
    fn test_codec_error_conversion() {
        let err: ClientError = CodecError::MissingEventName.into();
        assert_eq!(err, ClientError::Codec("event packet carries no event name".into()));
    }
}
