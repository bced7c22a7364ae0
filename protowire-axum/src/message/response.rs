//! Responders for message bodies.
use axum::response::{IntoResponse, Response};
use protowire_axum_core::{Format, Message};

use super::{CodecRejection, ProtoJson, Protobuf};
use crate::encoder::{Encoder, PROTOBUF_ENCODER, PROTOJSON_ENCODER};

fn respond<F: Format, M: Message>(encoder: Encoder<F>, message: &M) -> Response {
    match encoder.encode(message) {
        Ok(response) => response,
        Err(err) => CodecRejection(err).into_response(),
    }
}

impl<T: Message> IntoResponse for Protobuf<T> {
    fn into_response(self) -> Response {
        respond(PROTOBUF_ENCODER, &self.0)
    }
}

impl<T: Message> IntoResponse for ProtoJson<T> {
    fn into_response(self) -> Response {
        respond(PROTOJSON_ENCODER, &self.0)
    }
}
