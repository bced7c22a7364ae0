//! HTTP rejection for codec errors.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use http_body_util::LengthLimitError;
use protowire_axum_core::{BoxError, CodecError};

/// Rejection returned by the [`Protobuf`](super::Protobuf) and
/// [`ProtoJson`](super::ProtoJson) extractors and responders.
///
/// Wraps the [`CodecError`] unchanged; only the HTTP mapping lives here.
#[derive(Debug)]
pub struct CodecRejection(pub CodecError);

impl CodecRejection {
    /// HTTP status for this rejection.
    ///
    /// - identity mismatch, unparseable payload, failed body read: `400`
    /// - body larger than the configured limit: `413`
    /// - value not a message, failed serialization: `500`
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            CodecError::IdentityMismatch { .. } | CodecError::Deserialization { .. } => {
                StatusCode::BAD_REQUEST
            }
            CodecError::Read(source) if exceeds_limit(source) => StatusCode::PAYLOAD_TOO_LARGE,
            CodecError::Read(_) => StatusCode::BAD_REQUEST,
            CodecError::TypeContract { .. } | CodecError::Serialization { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the wrapped codec error.
    pub fn into_inner(self) -> CodecError {
        self.0
    }
}

/// Whether a body read failed because the length limit was hit.
fn exceeds_limit(source: &BoxError) -> bool {
    let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&**source);
    while let Some(err) = current {
        if err.is::<LengthLimitError>() {
            return true;
        }
        current = err.source();
    }
    false
}

impl From<CodecError> for CodecRejection {
    fn from(err: CodecError) -> Self {
        CodecRejection(err)
    }
}

impl std::fmt::Display for CodecRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for CodecRejection {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.0)
    }
}

impl IntoResponse for CodecRejection {
    fn into_response(self) -> Response {
        let status = self.status();
        tracing::debug!(
            target: "protowire_axum",
            error = %self.0,
            status = status.as_u16(),
            "rejecting message body"
        );

        let mut response = (status, self.0.to_string()).into_response();
        response.headers_mut().insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("text/plain; charset=utf-8"),
        );
        response
    }
}
