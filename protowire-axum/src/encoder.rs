//! Server-side message encoder.
//!
//! [`Encoder`] serializes outgoing messages into response bodies and decodes
//! incoming request bodies into messages:
//! - `encode`: message → `Response<Body>` with content-type and message-name headers
//! - `decode`: `Request<Body>` → message, verifying the message-name header before parsing
//!
//! Encoders are stateless values. [`PROTOBUF_ENCODER`] and [`PROTOJSON_ENCODER`]
//! cover the common case; build one with [`Encoder::with_limits`] to change the
//! request body limit.

use std::any::Any;
use std::marker::PhantomData;

use axum::body::Body;
use axum::http::{HeaderMap, Request, Response};
use bytes::Bytes;
use protowire_axum_core::{
    Binary, CodecError, Encoded, Format, FormatKind, Message, MessageLimits, MessageRegistry,
    Operation, Text,
};

/// Encoder for the protobuf binary format.
pub type ProtobufEncoder = Encoder<Binary>;

/// Encoder for the ProtoJSON text format.
pub type ProtoJsonEncoder = Encoder<Text>;

/// Shared protobuf encoder with default limits.
pub const PROTOBUF_ENCODER: ProtobufEncoder = Encoder::new();

/// Shared ProtoJSON encoder with default limits.
pub const PROTOJSON_ENCODER: ProtoJsonEncoder = Encoder::new();

/// Encodes responses and decodes requests using format `F`.
#[derive(Debug, Clone, Copy)]
pub struct Encoder<F> {
    limits: MessageLimits,
    _format: PhantomData<F>,
}

impl<F: Format> Default for Encoder<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: Format> Encoder<F> {
    /// Create an encoder with the default 4 MB request body limit.
    pub const fn new() -> Self {
        Self::with_limits(MessageLimits::DEFAULT)
    }

    /// Create an encoder with custom request body limits.
    pub const fn with_limits(limits: MessageLimits) -> Self {
        Self {
            limits,
            _format: PhantomData,
        }
    }

    /// The request body limits.
    pub fn limits(&self) -> MessageLimits {
        self.limits
    }

    /// The wire format of this encoder.
    pub fn format(&self) -> FormatKind {
        F::KIND
    }

    /// Content-Type written on encoded responses.
    pub fn content_type(&self) -> &'static str {
        F::CONTENT_TYPE
    }

    /// Encode `message` into a new `200 OK` response.
    pub fn encode<M: Message>(&self, message: &M) -> Result<Response<Body>, CodecError> {
        let mut response = Response::new(Body::empty());
        self.encode_into(&mut response, message)?;
        Ok(response)
    }

    /// Encode `message` onto an existing response.
    ///
    /// Sets Content-Type, Content-Length and the message-name header, then
    /// replaces the body. The response is not modified on error.
    pub fn encode_into<M: Message>(
        &self,
        response: &mut Response<Body>,
        message: &M,
    ) -> Result<(), CodecError> {
        let encoded = protowire_axum_core::encode::<F, M>(message)?;
        write_response(response, encoded);
        Ok(())
    }

    /// Encode a type-erased value onto an existing response.
    ///
    /// Fails with [`CodecError::TypeContract`] and leaves the response
    /// untouched when the value's type is not in `registry`.
    pub fn encode_any(
        &self,
        registry: &MessageRegistry,
        response: &mut Response<Body>,
        value: &dyn Any,
    ) -> Result<(), CodecError> {
        let encoded = registry.encode_any(F::KIND, value)?;
        write_response(response, encoded);
        Ok(())
    }

    /// Decode the request body into `target`.
    ///
    /// The body is drained first; read failures are returned as-is. The
    /// message-name header is then checked before the payload is parsed.
    /// `target` is only written when the whole payload parses.
    pub async fn decode<M: Message>(
        &self,
        request: Request<Body>,
        target: &mut M,
    ) -> Result<(), CodecError> {
        let (parts, body) = request.into_parts();
        let payload = self.read_body(body).await?;
        protowire_axum_core::decode::<F, M>(&parts.headers, &payload, target)?;

        tracing::trace!(
            target: "protowire_axum",
            format = F::NAME,
            message = %M::message_name(),
            len = payload.len(),
            "decoded request message"
        );
        Ok(())
    }

    /// Decode the request body into a new message.
    pub async fn decode_message<M: Message>(&self, request: Request<Body>) -> Result<M, CodecError> {
        let mut message = M::default();
        self.decode(request, &mut message).await?;
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

    /// Decode the request body into a type-erased target.
    pub async fn decode_any(
        &self,
        registry: &MessageRegistry,
        request: Request<Body>,
        target: &mut (dyn Any + Send),
    ) -> Result<(), CodecError> {
        if !registry.contains(&*target) {
            return Err(CodecError::TypeContract {
                format: F::NAME,
                op: Operation::Decode,
                type_id: (*target).type_id(),
            });
        }

        let (parts, body) = request.into_parts();
        let payload = self.read_body(body).await?;
        registry.decode_any(F::KIND, &parts.headers, &payload, target)
    }

    async fn read_body(&self, body: Body) -> Result<Bytes, CodecError> {
        axum::body::to_bytes(body, self.limits.read_limit())
            .await
            .map_err(CodecError::read)
    }
}

fn write_response(response: &mut Response<Body>, encoded: Encoded) {
    tracing::trace!(
        target: "protowire_axum",
        content_type = encoded.content_type(),
        message = ?encoded.message_name(),
        len = encoded.content_length(),
        "encoded response message"
    );
    encoded.apply_headers(response.headers_mut());
    *response.body_mut() = Body::from(encoded.into_payload());
}
