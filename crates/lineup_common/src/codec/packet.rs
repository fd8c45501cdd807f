use std::fmt::Write as _;

use serde_json::Value;

use crate::error::CodecError;
use crate::messages::{InboundEvent, OutboundEvent};

/// Namespace used when a packet carries no `/name,` prefix.
pub const DEFAULT_NAMESPACE: &str = "/";

/// Body of a Socket.IO packet.
#[derive(Clone, Debug, PartialEq)]
pub enum PacketKind {
    /// `0`. From the client an optional auth payload, from the server `{"sid": ...}`.
    Connect(Option<Value>),
    /// `1`
    Disconnect,
    /// `2`. `data` is `[name, ...args]`.
    Event { ack_id: Option<u64>, data: Vec<Value> },
    /// `3`
    Ack { ack_id: u64, data: Vec<Value> },
    /// `4`
    ConnectError(Value),
}

impl PacketKind {
    fn type_char(&self) -> char {
        match self {
            PacketKind::Connect(_) => '0',
            PacketKind::Disconnect => '1',
            PacketKind::Event { .. } => '2',
            PacketKind::Ack { .. } => '3',
            PacketKind::ConnectError(_) => '4',
        }
    }
}

/// A Socket.IO v5 packet, carried inside an Engine.IO message frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Packet {
    pub namespace: String,
    pub kind: PacketKind,
}

impl Packet {
    pub fn connect(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            kind: PacketKind::Connect(None),
        }
    }

    pub fn disconnect(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            kind: PacketKind::Disconnect,
        }
    }

    /// Build a fire-and-forget event packet (no ack id).
    pub fn event<E: OutboundEvent>(namespace: &str, event: &E) -> Result<Self, CodecError> {
        let mut data = vec![Value::String(E::NAME.to_string())];
        data.extend(event.to_args()?);
        Ok(Self {
            namespace: namespace.to_string(),
            kind: PacketKind::Event { ack_id: None, data },
        })
    }

    /// Name of the event, if this is an event packet.
    pub fn event_name(&self) -> Option<&str> {
        match &self.kind {
            PacketKind::Event { data, .. } => data.first().and_then(Value::as_str),
            _ => None,
        }
    }

    /// Decode the first argument as `E` when this packet is an `E::NAME` event.
    ///
    /// Returns `None` for any other packet, `Some(Err(_))` when the name matches
    /// but the payload does not deserialize.
    pub fn decode_event<E: InboundEvent>(&self) -> Option<Result<E, CodecError>> {
        if self.event_name() != Some(E::NAME) {
            return None;
        }
        let PacketKind::Event { data, .. } = &self.kind else {
            return None;
        };
        let payload = data.get(1).cloned().unwrap_or(Value::Null);
        Some(serde_json::from_value(payload).map_err(CodecError::from))
    }

    pub fn encode(&self) -> Result<String, CodecError> {
        let mut out = String::new();
        out.push(self.kind.type_char());
        if self.namespace != DEFAULT_NAMESPACE {
            out.push_str(&self.namespace);
            out.push(',');
        }
        match &self.kind {
            PacketKind::Connect(Some(payload)) | PacketKind::ConnectError(payload) => {
                out.push_str(&serde_json::to_string(payload)?);
            }
            PacketKind::Connect(None) | PacketKind::Disconnect => {}
            PacketKind::Event { ack_id, data } => {
                if let Some(id) = ack_id {
                    let _ = write!(out, "{id}");
                }
                out.push_str(&serde_json::to_string(data)?);
            }
            PacketKind::Ack { ack_id, data } => {
                let _ = write!(out, "{ack_id}");
                out.push_str(&serde_json::to_string(data)?);
            }
        }
        Ok(out)
    }

    pub fn decode(raw: &str) -> Result<Self, CodecError> {
        let type_char = raw.chars().next().ok_or(CodecError::EmptyFrame)?;
        let mut rest = &raw[type_char.len_utf8()..];

        let namespace = if rest.starts_with('/') {
            match rest.find(',') {
                Some(end) => {
                    let namespace = &rest[..end];
                    rest = &rest[end + 1..];
                    namespace.to_string()
                }
                None => {
                    let namespace = rest.to_string();
                    rest = "";
                    namespace
                }
            }
        } else {
            DEFAULT_NAMESPACE.to_string()
        };

        let kind = match type_char {
            '0' => PacketKind::Connect(parse_optional(rest)?),
            '1' => PacketKind::Disconnect,
            '2' => {
                let (ack_id, payload) = split_ack_id(rest)?;
                let data = parse_array(payload)?;
                if !data.first().is_some_and(Value::is_string) {
                    return Err(CodecError::MissingEventName);
                }
                PacketKind::Event { ack_id, data }
            }
            '3' => {
                let (ack_id, payload) = split_ack_id(rest)?;
                PacketKind::Ack {
                    ack_id: ack_id.ok_or(CodecError::MissingAckId)?,
                    data: parse_array(payload)?,
                }
            }
            '4' => PacketKind::ConnectError(parse_optional(rest)?.unwrap_or(Value::Null)),
            '5' | '6' => return Err(CodecError::BinaryUnsupported),
            other => return Err(CodecError::UnknownPacketType(other)),
        };

        Ok(Self { namespace, kind })
    }
}

fn split_ack_id(rest: &str) -> Result<(Option<u64>, &str), CodecError> {
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return Ok((None, rest));
    }
    let digits = &rest[..end];
    let id = digits
        .parse::<u64>()
        .map_err(|_| CodecError::InvalidAckId(digits.to_string()))?;
    Ok((Some(id), &rest[end..]))
}

fn parse_optional(payload: &str) -> Result<Option<Value>, CodecError> {
    if payload.is_empty() {
        return Ok(None);
    }
    Ok(Some(serde_json::from_str(payload)?))
}

fn parse_array(payload: &str) -> Result<Vec<Value>, CodecError> {
    Ok(serde_json::from_str(payload)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{GetState, QueueState, RequestToken};
    use serde_json::json;

    #[test]
    fn test_connect_default_namespace() {
        assert_eq!(Packet::connect("/").encode().unwrap(), "0");
        assert_eq!(Packet::connect("/admin").encode().unwrap(), "0/admin,");
    }

    #[test]
    fn test_decode_server_connect() {
        let packet = Packet::decode(r#"0{"sid":"wZX3oN0bSVIhsaknAAAI"}"#).unwrap();
        assert_eq!(packet.namespace, "/");
        assert_eq!(
            packet.kind,
            PacketKind::Connect(Some(json!({"sid": "wZX3oN0bSVIhsaknAAAI"})))
        );
    }

    #[test]
    fn test_zero_argument_event() {
        let packet = Packet::event("/", &GetState).unwrap();
        assert_eq!(packet.encode().unwrap(), r#"2["get_state"]"#);
    }

    #[test]
    fn test_request_token_event() {
        let packet = Packet::event("/", &RequestToken::new("Alice", "Regular")).unwrap();
        let encoded = packet.encode().unwrap();
        assert_eq!(encoded, r#"2["request_token",{"name":"Alice","type":"Regular"}]"#);
    }

    #[test]
    fn test_namespaced_event_with_ack() {
        let packet = Packet::decode(r#"2/queue,12["state_update",{}]"#).unwrap();
        assert_eq!(packet.namespace, "/queue");
        assert_eq!(packet.event_name(), Some("state_update"));
        match packet.kind {
            PacketKind::Event { ack_id, .. } => assert_eq!(ack_id, Some(12)),
            other => panic!("unexpected packet {other:?}"),
        }
    }

    #[test]
    fn test_decode_state_update() {
        let raw = r#"2["state_update",{"professor_status":"Busy","current_token":null,"queue":[{"id":1,"name":"Ann","type":"Regular"}]}]"#;
        let packet = Packet::decode(raw).unwrap();
        let state: QueueState = packet.decode_event().unwrap().unwrap();
        assert_eq!(state.professor_status, "Busy");
        assert_eq!(state.queue.len(), 1);
    }

    #[test]
    fn test_decode_event_ignores_other_names() {
        let packet = Packet::decode(r#"2["something_else",{}]"#).unwrap();
        assert!(packet.decode_event::<QueueState>().is_none());
    }

    #[test]
    fn test_malformed_state_update_payload() {
        let packet = Packet::decode(r#"2["state_update",{"queue":"nope"}]"#).unwrap();
        assert!(matches!(packet.decode_event::<QueueState>(), Some(Err(CodecError::Json(_)))));
    }

    #[test]
    fn test_event_without_name() {
        assert!(matches!(Packet::decode("2[]"), Err(CodecError::MissingEventName)));
        assert!(matches!(Packet::decode("2[1,2]"), Err(CodecError::MissingEventName)));
    }

    #[test]
    fn test_ack_requires_id() {
        assert!(matches!(Packet::decode("3[]"), Err(CodecError::MissingAckId)));
        let ack = Packet::decode(r#"37["ok"]"#).unwrap();
        assert_eq!(ack.kind, PacketKind::Ack { ack_id: 7, data: vec![json!("ok")] });
    }

    #[test]
    fn test_disconnect_and_connect_error() {
        assert_eq!(Packet::decode("1").unwrap().kind, PacketKind::Disconnect);
        let err = Packet::decode(r#"4{"message":"Not authorized"}"#).unwrap();
        assert_eq!(err.kind, PacketKind::ConnectError(json!({"message": "Not authorized"})));
    }

    #[test]
    fn test_binary_and_unknown_types() {
        assert!(matches!(Packet::decode(r#"51-["x",{}]"#), Err(CodecError::BinaryUnsupported)));
        assert!(matches!(Packet::decode("9"), Err(CodecError::UnknownPacketType('9'))));
        assert!(matches!(Packet::decode(""), Err(CodecError::EmptyFrame)));
    }
}
