//! Protobuf wire format.

use bytes::Bytes;

use super::{Format, FormatKind};
use crate::{CodecError, Message};

/// Compact protobuf binary format, served as `application/protobuf`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Binary;

impl Format for Binary {
    const NAME: &'static str = "protobuf";
    const CONTENT_TYPE: &'static str = "application/protobuf";
    const KIND: FormatKind = FormatKind::Binary;

    fn serialize<M: Message>(message: &M) -> Result<Bytes, CodecError> {
        Ok(Bytes::from(message.encode_to_vec()))
    }

    fn deserialize<M: Message>(payload: &[u8]) -> Result<M, CodecError> {
        M::decode(payload).map_err(|e| CodecError::deserialization(Self::NAME, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::fixtures::{Farewell, Greeting, greeting};

    #[test]
    fn test_round_trip() {
        let bytes = Binary::serialize(&greeting()).unwrap();
        let decoded: Greeting = Binary::deserialize(&bytes).unwrap();
        assert_eq!(decoded, greeting());
    }

    #[test]
    fn test_default_message_encodes_empty() {
        let bytes = Binary::serialize(&Greeting::default()).unwrap();
        assert!(bytes.is_empty());
        let decoded: Greeting = Binary::deserialize(&bytes).unwrap();
        assert_eq!(decoded, Greeting::default());
    }

    #[test]
    fn test_truncated_payload() {
        let bytes = Binary::serialize(&greeting()).unwrap();
        let err = Binary::deserialize::<Greeting>(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(err.is_deserialization());
        assert!(err.to_string().starts_with("protobuf: decode: "));
    }

    #[test]
    fn test_unrelated_message_can_parse() {
        // Field 1 is a string in both types, so the bytes parse cleanly. This is
        // exactly the case the message-name header exists to catch.
        let bytes = Binary::serialize(&greeting()).unwrap();
        let wrong: Farewell = Binary::deserialize(&bytes).unwrap();
        assert_eq!(wrong.reason, "hello");
    }
}
