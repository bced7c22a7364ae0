//! Wire envelope: a payload plus the headers that describe it.
//!
//! [`encode`] and [`decode`] are the format-generic operations that the server
//! `Encoder` and the client `Codec` dispatch to.

use bytes::Bytes;
use http::{HeaderMap, HeaderValue, header};

use crate::message::{MESSAGE_NAME_HEADER, verify_identity};
use crate::{CodecError, Format, Message};

/// An encoded message ready to be attached to an HTTP message.
#[derive(Clone, Debug)]
pub struct Encoded {
    payload: Bytes,
    content_type: &'static str,
    message_name: HeaderValue,
}

impl Encoded {
    /// Build an envelope, validating that the message name is usable as a header.
    pub fn new(
        format: &'static str,
        content_type: &'static str,
        message_name: &str,
        payload: Bytes,
    ) -> Result<Self, CodecError> {
        let message_name = HeaderValue::from_str(message_name)
            .map_err(|e| CodecError::serialization(format, e))?;
        Ok(Self {
            payload,
            content_type,
            message_name,
        })
    }

    /// The serialized message.
    pub fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Content-Type of the payload.
    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    /// The message name announced in [`MESSAGE_NAME_HEADER`].
    pub fn message_name(&self) -> &HeaderValue {
        &self.message_name
    }

    /// Exact length of the payload in bytes.
    pub fn content_length(&self) -> usize {
        self.payload.len()
    }

    /// Set Content-Type, Content-Length and the message-name header.
    pub fn apply_headers(&self, headers: &mut HeaderMap) {
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(self.content_type),
        );
        headers.insert(MESSAGE_NAME_HEADER, self.message_name.clone());
        headers.insert(header::CONTENT_LENGTH, HeaderValue::from(self.payload.len()));
    }

    /// Consume the envelope, returning the payload.
    pub fn into_payload(self) -> Bytes {
        self.payload
    }
}

/// Serialize `message` with format `F` and describe it for the wire.
pub fn encode<F: Format, M: Message>(message: &M) -> Result<Encoded, CodecError> {
    let payload = F::serialize(message)?;
    Encoded::new(F::NAME, F::CONTENT_TYPE, &M::message_name(), payload)
}

/// Verify the announced identity and parse `payload` into `target`.
///
/// On a name mismatch the payload is never parsed. On any error `target` is
/// left untouched.
pub fn decode<F: Format, M: Message>(
    headers: &HeaderMap,
    payload: &[u8],
    target: &mut M,
) -> Result<(), CodecError> {
    verify_identity::<M>(F::NAME, headers)?;
    *target = F::deserialize(payload)?;
    Ok(())
}
