//! Installing and replaying request bodies.
//!
//! A retrying transport consumes the request it sends. [`replay_request`]
//! rebuilds an equivalent request from the original so the same bytes can be
//! sent again.
//!
//! # Example
//!
//! ```ignore
//! let mut request = Request::post(uri).body(RequestBody::empty())?;
//! PROTOBUF_CODEC.encode(&mut request, &message)?;
//!
//! let attempt = replay_request(&request);
//! let response = transport.send(attempt).await;
//! ```

use bytes::Bytes;
use http::{HeaderValue, Request, header};

use crate::body::RequestBody;

/// Install `data` as a replayable body and set `Content-Length` to its length.
pub fn set_bytes(request: &mut Request<RequestBody>, data: Bytes) {
    request
        .headers_mut()
        .insert(header::CONTENT_LENGTH, HeaderValue::from(data.len()));
    *request.body_mut() = RequestBody::full(data);
}

/// Build a fresh copy of `request` with an unread body.
///
/// Method, URI, version and headers are copied; extensions are not.
pub fn replay_request(request: &Request<RequestBody>) -> Request<RequestBody> {
    let mut replay = Request::new(request.body().replay());
    *replay.method_mut() = request.method().clone();
    *replay.uri_mut() = request.uri().clone();
    *replay.version_mut() = request.version();
    *replay.headers_mut() = request.headers().clone();
    replay
}
