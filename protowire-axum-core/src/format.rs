//! Wire formats.
//!
//! This module provides the [`Format`] trait and its two implementations:
//! - [`Binary`]: protobuf wire format (`application/protobuf`)
//! - [`Text`]: canonical JSON mapping (`application/json`)
//!
//! Formats are stateless marker types; encoders and codecs pick one through a
//! type parameter. [`FormatKind`] is the runtime counterpart used where the
//! format is only known as a value.

mod binary;
mod text;

pub use binary::Binary;
pub use text::Text;

use bytes::Bytes;

use crate::{CodecError, Message};

/// A serialization format for one message per body.
pub trait Format: Copy + Default + std::fmt::Debug + Send + Sync + 'static {
    /// Format name used to prefix errors (e.g. "protobuf").
    const NAME: &'static str;

    /// Content-Type set on encoded bodies.
    const CONTENT_TYPE: &'static str;

    /// Runtime tag for this format.
    const KIND: FormatKind;

    /// Serialize a message.
    fn serialize<M: Message>(message: &M) -> Result<Bytes, CodecError>;

    /// Parse a payload into a fresh message.
    ///
    /// Never returns a partially populated value.
    fn deserialize<M: Message>(payload: &[u8]) -> Result<M, CodecError>;
}

/// Runtime tag for a [`Format`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FormatKind {
    Binary,
    Text,
}

impl FormatKind {
    /// Format name used to prefix errors.
    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Binary => Binary::NAME,
            FormatKind::Text => Text::NAME,
        }
    }

    /// Content-Type set on encoded bodies.
    pub fn content_type(&self) -> &'static str {
        match self {
            FormatKind::Binary => Binary::CONTENT_TYPE,
            FormatKind::Text => Text::CONTENT_TYPE,
        }
    }

    /// Serialize with the format this tag names.
    pub fn serialize<M: Message>(&self, message: &M) -> Result<Bytes, CodecError> {
        match self {
            FormatKind::Binary => Binary::serialize(message),
            FormatKind::Text => Text::serialize(message),
        }
    }

    /// Deserialize with the format this tag names.
    pub fn deserialize<M: Message>(&self, payload: &[u8]) -> Result<M, CodecError> {
        match self {
            FormatKind::Binary => Binary::deserialize(payload),
            FormatKind::Text => Text::deserialize(payload),
        }
    }

    /// Map a Content-Type header value to a format.
    ///
    /// Only used for diagnostics and routing; decoders never pick a format from
    /// the header.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim();
        if essence.eq_ignore_ascii_case(Binary::CONTENT_TYPE) {
            Some(FormatKind::Binary)
        } else if essence.eq_ignore_ascii_case(Text::CONTENT_TYPE) {
            Some(FormatKind::Text)
        } else {
            None
        }
    }
}

impl std::fmt::Display for FormatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
