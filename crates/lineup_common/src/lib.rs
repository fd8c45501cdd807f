//! Shared wire-level types for the LineUp queue display.
//!
//! The queue server speaks Socket.IO, so everything that crosses the socket is
//! either an Engine.IO [`Frame`](codec::Frame) or a Socket.IO
//! [`Packet`](codec::Packet) carrying a named event. This crate owns those
//! encodings and the typed payloads ([`Token`], [`QueueState`], ...) so the
//! reactive client and any native tooling agree on the exact JSON shapes.

pub mod codec;
pub mod error;
pub mod messages;

pub use error::CodecError;
pub use messages::*;
