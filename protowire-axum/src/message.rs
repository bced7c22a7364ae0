//! Axum extractors and responders for protobuf and ProtoJSON bodies.

mod error;
mod request;
mod response;

pub use error::CodecRejection;
pub use request::{ProtoJson, Protobuf};
