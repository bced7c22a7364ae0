//! Extractors for message request bodies.
use axum::extract::{FromRequest, Request};
use protowire_axum_core::Message;

use super::CodecRejection;
use crate::encoder::{PROTOBUF_ENCODER, PROTOJSON_ENCODER};

/// Protobuf-encoded body.
///
/// As an extractor it decodes the request body with [`PROTOBUF_ENCODER`];
/// as a response it encodes the wrapped message the same way.
///
/// ```ignore
/// async fn greet(Protobuf(req): Protobuf<GreetRequest>) -> Protobuf<GreetReply> {
///     Protobuf(GreetReply { text: format!("hello {}", req.name) })
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Protobuf<T>(pub T);

/// ProtoJSON-encoded body. See [`Protobuf`].
#[derive(Debug, Clone, Copy, Default)]
pub struct ProtoJson<T>(pub T);

impl<T> Protobuf<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> ProtoJson<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Protobuf<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> std::ops::Deref for ProtoJson<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Protobuf<T>
where
    S: Send + Sync,
    T: Message,
{
    type Rejection = CodecRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let message = PROTOBUF_ENCODER.decode_message(req).await?;
        Ok(Protobuf(message))
    }
}

impl<S, T> FromRequest<S> for ProtoJson<T>
where
    S: Send + Sync,
    T: Message,
{
    type Rejection = CodecRejection;

    async fn from_request(req: Request, _state: &S) -> Result<Self, Self::Rejection> {
        let message = PROTOJSON_ENCODER.decode_message(req).await?;
        Ok(ProtoJson(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{Farewell, Greeting, greeting};
    use axum::{
        Router,
        body::Body,
        http::{StatusCode, header},
        routing::post,
    };
    use prost::Message as _;
    use protowire_axum_core::MESSAGE_NAME_HEADER;
    use tower::ServiceExt;

    async fn echo_name(Protobuf(req): Protobuf<Greeting>) -> String {
        req.name
    }

    async fn echo_reason(ProtoJson(req): ProtoJson<Farewell>) -> String {
        req.reason
    }

    fn app() -> Router {
        Router::new()
            .route("/greet", post(echo_name))
            .route("/leave", post(echo_reason))
    }

    async fn text(response: axum::response::Response) -> String {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(body.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_protobuf_extractor() {
        let request = Request::post("/greet")
            .header(header::CONTENT_TYPE, "application/protobuf")
            .header(MESSAGE_NAME_HEADER, "acme.v1.Greeting")
            .body(Body::from(greeting().encode_to_vec()))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "hello");
    }

    #[tokio::test]
    async fn test_protojson_extractor_without_name_header() {
        let request = Request::post("/leave")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"reason":"done"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(text(response).await, "done");
    }

    #[tokio::test]
    async fn test_extractor_rejects_identity_mismatch() {
        let request = Request::post("/leave")
            .header(MESSAGE_NAME_HEADER, "acme.v1.Greeting")
            .body(Body::from(r#"{"reason":"done"}"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert!(text(response).await.contains("not the expected message type"));
    }

    #[tokio::test]
    async fn test_extractor_rejects_malformed_body() {
        let request = Request::post("/leave")
            .body(Body::from(r#"{"reason":"#))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(text(response).await.starts_with("protojson: decode:"));
    }

    #[tokio::test]
    async fn test_extractor_rejects_oversized_body() {
        let request = Request::post("/greet")
            .body(Body::from(vec![0u8; protowire_axum_core::DEFAULT_MAX_MESSAGE_SIZE + 1]))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_oversized_body_with_wrong_name_is_413() {
        let request = Request::post("/leave")
            .header(MESSAGE_NAME_HEADER, "acme.v1.Greeting")
            .body(Body::from(vec![b' '; protowire_axum_core::DEFAULT_MAX_MESSAGE_SIZE + 1]))
            .unwrap();

        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
