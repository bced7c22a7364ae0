//! Client-side protobuf and ProtoJSON codecs.
//!
//! The client counterpart of `protowire-axum`. A [`Codec`] encodes a message
//! into an `http::Request<RequestBody>` and decodes an `http::Response` of
//! any body type back into a message, enforcing the same message-name check
//! as the server.
//!
//! Bodies installed by [`Codec::encode`] are buffered and can be replayed
//! with [`replay_request`], so a transport that retries can resend the exact
//! same bytes.
//!
//! ```ignore
//! use protowire_axum_client::{PROTOBUF_CODEC, RequestBody, replay_request};
//!
//! let mut request = http::Request::post(url).body(RequestBody::empty())?;
//! PROTOBUF_CODEC.encode(&mut request, &HelloRequest { name: "ada".into() })?;
//!
//! let response = send(replay_request(&request)).await?;
//! let reply: HelloReply = PROTOBUF_CODEC.decode_message(response).await?;
//! ```

pub mod body;
pub mod codec;
pub mod replay;

#[cfg(test)]
mod fixtures;

pub use body::RequestBody;
pub use codec::{Codec, PROTOBUF_CODEC, PROTOJSON_CODEC, ProtoJsonCodec, ProtobufCodec};
pub use replay::{replay_request, set_bytes};

pub use protowire_axum_core::{
    Binary, CodecError, Format, FormatKind, MESSAGE_NAME_HEADER, Message, MessageLimits,
    MessageRegistry, Text,
};
