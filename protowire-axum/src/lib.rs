//! # protowire-axum
//!
//! Protobuf and ProtoJSON message bodies for [Axum](https://github.com/tokio-rs/axum).
//!
//! Every encoded body carries two headers: `Content-Type` for the wire format
//! and `x-protobuf-message-name` for the fully-qualified message type. Decoding
//! rejects a body whose announced name differs from the target type before
//! the payload is parsed; a body without the header is accepted.
//!
//! - [`Encoder`]: encode messages into responses, decode requests into messages
//! - [`Protobuf`] / [`ProtoJson`]: extractors and responders built on the encoders
//! - [`MessageRegistry`]: encode and decode values only known as `&dyn Any`
//!
//! ```ignore
//! use protowire_axum::prelude::*;
//!
//! async fn greet(Protobuf(req): Protobuf<HelloRequest>) -> ProtoJson<HelloReply> {
//!     ProtoJson(HelloReply { message: format!("hello, {}", req.name) })
//! }
//! ```

pub mod encoder;
pub mod message;

#[cfg(test)]
mod fixtures;

pub use encoder::{Encoder, PROTOBUF_ENCODER, PROTOJSON_ENCODER, ProtoJsonEncoder, ProtobufEncoder};
pub use message::{CodecRejection, ProtoJson, Protobuf};
pub use protowire_axum_core::{
    Binary, CodecError, DEFAULT_MAX_MESSAGE_SIZE, Encoded, Format, FormatKind, MESSAGE_NAME_HEADER,
    Message, MessageLimits, MessageRegistry, Operation, Text,
};

// Re-export several crates
pub use pbjson;
pub use prost;
pub use serde;

pub mod prelude {
    //! Common types for building message handlers.
    pub use crate::encoder::{Encoder, PROTOBUF_ENCODER, PROTOJSON_ENCODER};
    pub use crate::message::{CodecRejection, ProtoJson, Protobuf};
    pub use protowire_axum_core::{CodecError, Message, MessageLimits, MessageRegistry};
}
