//! Canonical JSON format.

use bytes::Bytes;

use super::{Format, FormatKind};
use crate::{CodecError, Message};

/// Structured-text format using the message's JSON mapping, served as
/// `application/json`.
///
/// The field mapping comes from the message's serde impls, which pbjson
/// generates to follow the canonical protobuf JSON mapping.
#[derive(Debug, Clone, Copy, Default)]
pub struct Text;

impl Format for Text {
    const NAME: &'static str = "protojson";
    const CONTENT_TYPE: &'static str = "application/json";
    const KIND: FormatKind = FormatKind::Text;

    fn serialize<M: Message>(message: &M) -> Result<Bytes, CodecError> {
        serde_json::to_vec(message)
            .map(Bytes::from)
            .map_err(|e| CodecError::serialization(Self::NAME, e))
    }

    fn deserialize<M: Message>(payload: &[u8]) -> Result<M, CodecError> {
        serde_json::from_slice(payload).map_err(|e| CodecError::deserialization(Self::NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::fixtures::{Greeting, greeting};

    #[test]
    fn test_round_trip() {
        let bytes = Text::serialize(&greeting()).unwrap();
        let decoded: Greeting = Text::deserialize(&bytes).unwrap();
        assert_eq!(decoded, greeting());
    }

    #[test]
    fn test_field_mapping() {
        let bytes = Text::serialize(&greeting()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["name"], "hello");
        assert_eq!(value["repeat"], 3);
        assert_eq!(value["tags"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn test_missing_fields_default() {
        let decoded: Greeting = Text::deserialize(br#"{"name":"only"}"#).unwrap();
        assert_eq!(decoded.name, "only");
        assert_eq!(decoded.repeat, 0);
        assert!(decoded.tags.is_empty());
    }

    #[test]
    fn test_invalid_json() {
        let err = Text::deserialize::<Greeting>(b"{\"name\":").unwrap_err();
        assert!(err.is_deserialization());
        assert!(err.to_string().starts_with("protojson: decode: "));
    }

    #[test]
    fn test_wrong_field_type() {
        let err = Text::deserialize::<Greeting>(br#"{"repeat":"three"}"#).unwrap_err();
        assert!(err.is_deserialization());
    }
}
