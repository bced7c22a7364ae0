//! Codec error types.
//!
//! This module provides [`CodecError`], the single error type returned by every
//! encode and decode operation on both sides of the exchange.

use std::any::TypeId;

/// Boxed error used for wrapped library and body errors.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// The codec operation that produced an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Encode,
    Decode,
}

impl Operation {
    /// Get the string representation of this operation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Encode => "encode",
            Operation::Decode => "decode",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while turning a message into a body or a body into a message.
///
/// Every variant except [`CodecError::Read`] carries the name of the format that
/// produced it (`protobuf` or `protojson`).
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The value handed to a dynamic entry point is not a registered message type.
    #[error("{format}: {op}: value of type {type_id:?} is not a registered message")]
    TypeContract {
        format: &'static str,
        op: Operation,
        type_id: TypeId,
    },

    /// The message-name header names a different type than the decode target.
    #[error("{format}: decode: {received} is not the expected message type (want {expected})")]
    IdentityMismatch {
        format: &'static str,
        expected: String,
        received: String,
    },

    /// The format failed to produce bytes from the message.
    #[error("{format}: encode: {source}")]
    Serialization {
        format: &'static str,
        #[source]
        source: BoxError,
    },

    /// The payload could not be parsed as the expected message.
    #[error("{format}: decode: {source}")]
    Deserialization {
        format: &'static str,
        #[source]
        source: BoxError,
    },

    /// Draining the body failed before any parsing happened.
    #[error(transparent)]
    Read(BoxError),
}

impl CodecError {
    /// Create a serialization error for the given format.
    pub fn serialization<E: Into<BoxError>>(format: &'static str, source: E) -> Self {
        CodecError::Serialization {
            format,
            source: source.into(),
        }
    }

    /// Create a deserialization error for the given format.
    pub fn deserialization<E: Into<BoxError>>(format: &'static str, source: E) -> Self {
        CodecError::Deserialization {
            format,
            source: source.into(),
        }
    }

    /// Wrap a body read error without reinterpreting it.
    pub fn read<E: Into<BoxError>>(source: E) -> Self {
        CodecError::Read(source.into())
    }

    /// Name of the format that produced this error, if any.
    pub fn format(&self) -> Option<&'static str> {
        match self {
            CodecError::TypeContract { format, .. }
            | CodecError::IdentityMismatch { format, .. }
            | CodecError::Serialization { format, .. }
            | CodecError::Deserialization { format, .. } => Some(format),
            CodecError::Read(_) => None,
        }
    }

    pub fn is_type_contract(&self) -> bool {
        matches!(self, CodecError::TypeContract { .. })
    }

    pub fn is_identity_mismatch(&self) -> bool {
        matches!(self, CodecError::IdentityMismatch { .. })
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, CodecError::Serialization { .. })
    }

    pub fn is_deserialization(&self) -> bool {
        matches!(self, CodecError::Deserialization { .. })
    }

    pub fn is_read(&self) -> bool {
        matches!(self, CodecError::Read(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_identity_mismatch_display() {
        let err = CodecError::IdentityMismatch {
            format: "protobuf",
            expected: "acme.v1.Farewell".into(),
            received: "acme.v1.Greeting".into(),
        };
        assert_eq!(
            err.to_string(),
            "protobuf: decode: acme.v1.Greeting is not the expected message type (want acme.v1.Farewell)"
        );
        assert_eq!(err.format(), Some("protobuf"));
        assert!(err.is_identity_mismatch());
    }

    #[test]
    fn test_type_contract_display() {
        let err = CodecError::TypeContract {
            format: "protojson",
            op: Operation::Encode,
            type_id: TypeId::of::<u32>(),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("protojson: encode: value of type"));
        assert!(msg.ends_with("is not a registered message"));
    }

    #[test]
    fn test_deserialization_keeps_source() {
        let inner = serde_json::from_slice::<serde_json::Value>(b"{").unwrap_err();
        let err = CodecError::deserialization("protojson", inner);
        assert!(err.is_deserialization());
        assert!(err.to_string().starts_with("protojson: decode: "));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_read_error_is_transparent() {
        let io = std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "connection reset");
        let err = CodecError::read(io);
        assert!(err.is_read());
        assert_eq!(err.format(), None);
        assert_eq!(err.to_string(), "connection reset");
    }

    #[test]
    fn test_operation_as_str() {
        assert_eq!(Operation::Encode.as_str(), "encode");
        assert_eq!(Operation::Decode.to_string(), "decode");
    }
}
