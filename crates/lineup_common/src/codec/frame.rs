use codee::{Decoder, Encoder};
use serde::{Deserialize, Serialize};

use super::packet::Packet;
use crate::error::CodecError;

/// Payload of the Engine.IO `open` frame.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Handshake {
    pub sid: String,
    #[serde(default)]
    pub upgrades: Vec<String>,
    pub ping_interval: u64,
    pub ping_timeout: u64,
    #[serde(default)]
    pub max_payload: Option<u64>,
}

/// An Engine.IO v4 text frame.
#[derive(Clone, Debug, PartialEq)]
pub enum Frame {
    Open(Handshake),
    Close,
    Ping(String),
    Pong(String),
    Message(Packet),
    Upgrade,
    Noop,
}

impl Frame {
    pub fn encode(&self) -> Result<String, CodecError> {
        Ok(match self {
            Frame::Open(handshake) => format!("0{}", serde_json::to_string(handshake)?),
            Frame::Close => "1".to_string(),
            Frame::Ping(data) => format!("2{data}"),
            Frame::Pong(data) => format!("3{data}"),
            Frame::Message(packet) => format!("4{}", packet.encode()?),
            Frame::Upgrade => "5".to_string(),
            Frame::Noop => "6".to_string(),
        })
    }

    pub fn decode(raw: &str) -> Result<Self, CodecError> {
        let type_char = raw.chars().next().ok_or(CodecError::EmptyFrame)?;
        let rest = &raw[type_char.len_utf8()..];
        Ok(match type_char {
            '0' => Frame::Open(serde_json::from_str(rest)?),
            '1' => Frame::Close,
            '2' => Frame::Ping(rest.to_string()),
            '3' => Frame::Pong(rest.to_string()),
            '4' => Frame::Message(Packet::decode(rest)?),
            '5' => Frame::Upgrade,
            '6' => Frame::Noop,
            'b' => return Err(CodecError::BinaryUnsupported),
            other => return Err(CodecError::UnknownFrameType(other)),
        })
    }
}

/// Text codec for a Socket.IO connection running over a plain WebSocket.
///
/// Each WebSocket text message is exactly one Engine.IO [`Frame`]; Socket.IO
/// packets travel inside [`Frame::Message`].
///
/// ## Usage
///
/// ```rust,ignore
/// use lineup_common::codec::{Frame, SocketIoCodec};
///
/// let ws = use_websocket_with_options::<Frame, Frame, SocketIoCodec, (), DummyEncoder>(
///     "ws://127.0.0.1:5000/socket.io/?EIO=4&transport=websocket",
///     options
/// );
/// ```
pub struct SocketIoCodec;

impl Encoder<Frame> for SocketIoCodec {
    type Error = CodecError;
    type Encoded = String;

    fn encode(val: &Frame) -> Result<Self::Encoded, Self::Error> {
        val.encode()
    }
}

impl Decoder<Frame> for SocketIoCodec {
    type Error = CodecError;
    type Encoded = str;

    fn decode(val: &Self::Encoded) -> Result<Frame, Self::Error> {
        Frame::decode(val)
    }
}
