//! Core message codec types for protowire-axum.
//!
//! This crate provides the pieces shared by the server (`protowire-axum`) and
//! client (`protowire-axum-client`) crates.
//!
//! ## Modules
//!
//! - [`message`]: Message identity contract and the message-name header
//! - [`format`]: The protobuf binary and JSON text formats
//! - [`envelope`]: Encoded payloads and the format-generic encode/decode
//! - [`registry`]: Erased message lookup for dynamic-dispatch boundaries
//! - [`limits`]: Body read limits
//! - [`error`]: The codec error type

pub mod envelope;
pub mod error;
pub mod format;
pub mod limits;
pub mod message;
pub mod registry;

pub use envelope::{Encoded, decode, encode};
pub use error::{BoxError, CodecError, Operation};
pub use format::{Binary, Format, FormatKind, Text};
pub use limits::{DEFAULT_MAX_MESSAGE_SIZE, MessageLimits};
pub use message::{MESSAGE_NAME_HEADER, Message, announced_name, verify_identity, verify_name};
pub use registry::MessageRegistry;
