//! Socket.IO v5 over Engine.IO v4, WebSocket transport only.

mod frame;
mod packet;

pub use frame::{Frame, Handshake, SocketIoCodec};
pub use packet::{DEFAULT_NAMESPACE, Packet, PacketKind};
