//! Client-side message codec.
//!
//! [`Codec`] is the mirror of the server encoder: it encodes messages into
//! request bodies and decodes response bodies into messages. Encoded requests
//! always carry a replayable [`RequestBody`] with an exact `Content-Length`.

use std::any::Any;
use std::marker::PhantomData;

use bytes::Bytes;
use http::{HeaderMap, Request, Response};
use http_body::Body;
use http_body_util::{BodyExt, Limited};
use protowire_axum_core::{
    Binary, BoxError, CodecError, Encoded, Format, FormatKind, Message, MessageLimits,
    MessageRegistry, Operation, Text,
};

use crate::body::RequestBody;
use crate::replay::set_bytes;

/// Codec for the protobuf binary format.
pub type ProtobufCodec = Codec<Binary>;

/// Codec for the ProtoJSON text format.
pub type ProtoJsonCodec = Codec<Text>;

/// Shared protobuf codec with default limits.
pub const PROTOBUF_CODEC: ProtobufCodec = Codec::new();

/// Shared ProtoJSON codec with default limits.
pub const PROTOJSON_CODEC: ProtoJsonCodec = Codec::new();

/// Encodes requests and decodes responses using format `F`.
#[derive(Debug, Clone, Copy)]
pub struct Codec<F> {
    limits: MessageLimits,
    _format: PhantomData<F>,
}

impl<F: Format> Default for Codec<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Format> Codec<F> {
    pub const fn new() -> Self {
        Self::with_limits(MessageLimits::DEFAULT)
    }

    /// Create a codec with custom response body limits.
    pub const fn with_limits(limits: MessageLimits) -> Self {
        Self {
            limits,
            _format: PhantomData,
        }
    }

    pub fn limits(&self) -> MessageLimits {
        self.limits
    }

    pub fn format(&self) -> FormatKind {
        F::KIND
    }

    pub fn content_type(&self) -> &'static str {
        F::CONTENT_TYPE
    }

    /// Encode `message` as the body of `request`.
    ///
    /// Sets Content-Type, Content-Length and the message-name header and
    /// installs a replayable body. The request is not modified on error.
    pub fn encode<M: Message>(
        &self,
        request: &mut Request<RequestBody>,
        message: &M,
    ) -> Result<(), CodecError> {
        let encoded = protowire_axum_core::encode::<F, M>(message)?;
        write_request(request, encoded);
        Ok(())
    }

    /// Encode a type-erased value as the body of `request`.
    pub fn encode_any(
        &self,
        registry: &MessageRegistry,
        request: &mut Request<RequestBody>,
        value: &dyn Any,
    ) -> Result<(), CodecError> {
        let encoded = registry.encode_any(F::KIND, value)?;
        write_request(request, encoded);
        Ok(())
    }

    /// Decode the response body into `target`.
    ///
    /// The body is drained first and read failures are returned as
    /// [`CodecError::Read`]. The message-name header is then checked before
    /// the payload is parsed.
    pub async fn decode<M, B>(&self, response: Response<B>, target: &mut M) -> Result<(), CodecError>
    where
        M: Message,
        B: Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = response.into_parts();
        let payload = self.read_body(body).await?;
        protowire_axum_core::decode::<F, M>(&parts.headers, &payload, target)?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            format = F::NAME,
            message = %M::message_name(),
            len = payload.len(),
            "decoded response message"
        );
        Ok(())
    }

    /// Decode the response body into a new message.
    pub async fn decode_message<M, B>(&self, response: Response<B>) -> Result<M, CodecError>
    where
        M: Message,
        B: Body,
        B::Error: Into<BoxError>,
    {
        let mut message = M::default();
        self.decode(response, &mut message).await?;
        Ok(message)
    }

    /// Decode an already-read body.
    pub fn decode_bytes<M: Message>(
        &self,
        headers: &HeaderMap,
        payload: &[u8],
        target: &mut M,
    ) -> Result<(), CodecError> {
        protowire_axum_core::decode::<F, M>(headers, payload, target)
    }

    /// Decode the response body into a type-erased target.
    pub async fn decode_any<B>(
        &self,
        registry: &MessageRegistry,
        response: Response<B>,
        target: &mut (dyn Any + Send),
    ) -> Result<(), CodecError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        if !registry.contains(&*target) {
            return Err(CodecError::TypeContract {
                format: F::NAME,
                op: Operation::Decode,
                type_id: (*target).type_id(),
            });
        }

        let (parts, body) = response.into_parts();
        let payload = self.read_body(body).await?;
        registry.decode_any(F::KIND, &parts.headers, &payload, target)
    }

    async fn read_body<B>(&self, body: B) -> Result<Bytes, CodecError>
    where
        B: Body,
        B::Error: Into<BoxError>,
    {
        let collected = Limited::new(body, self.limits.read_limit())
            .collect()
            .await
            .map_err(CodecError::read)?;
        Ok(collected.to_bytes())
    }
}

fn write_request(request: &mut Request<RequestBody>, encoded: Encoded) {
    #[cfg(feature = "tracing")]
    tracing::trace!(
        content_type = encoded.content_type(),
        message = ?encoded.message_name(),
        len = encoded.content_length(),
        "encoded request message"
    );
    encoded.apply_headers(request.headers_mut());
    set_bytes(request, encoded.into_payload());
}
