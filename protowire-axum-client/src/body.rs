//! Request body types.
//!
//! This module provides [`RequestBody`], the body type [`Codec`](crate::Codec)
//! installs on outgoing requests. Every body can be replayed so a retrying
//! transport can resend a request after a failed attempt.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use http_body::{Body, Frame, SizeHint};
use protowire_axum_core::BoxError;

/// A buffered, replayable request body.
///
/// Reading a body consumes only that instance; [`replay`](RequestBody::replay)
/// and `Clone` always start again from the first byte.
#[derive(Default)]
pub enum RequestBody {
    /// Empty request body.
    #[default]
    Empty,
    /// Buffered request body.
    Full {
        /// The complete payload, kept for replays.
        source: Bytes,
        /// Data not yet yielded by this instance.
        pending: Option<Bytes>,
    },
}

impl RequestBody {
    /// Create an empty body.
    pub fn empty() -> Self {
        RequestBody::Empty
    }

    /// Create a body over `data`.
    pub fn full(data: impl Into<Bytes>) -> Self {
        let source = data.into();
        RequestBody::Full {
            pending: Some(source.clone()),
            source,
        }
    }

    /// A fresh body over the same bytes, independent of any read of `self`.
    pub fn replay(&self) -> Self {
        match self {
            RequestBody::Empty => RequestBody::Empty,
            RequestBody::Full { source, .. } => RequestBody::full(source.clone()),
        }
    }

    /// Total length of the body, regardless of how much has been read.
    pub fn content_length(&self) -> u64 {
        match self {
            RequestBody::Empty => 0,
            RequestBody::Full { source, .. } => source.len() as u64,
        }
    }
}

impl Clone for RequestBody {
    fn clone(&self) -> Self {
        self.replay()
    }
}

impl From<Bytes> for RequestBody {
    fn from(data: Bytes) -> Self {
        RequestBody::full(data)
    }
}

impl Body for RequestBody {
    type Data = Bytes;
    type Error = BoxError;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.get_mut() {
            RequestBody::Empty => Poll::Ready(None),
            RequestBody::Full { pending, .. } => {
                Poll::Ready(pending.take().map(|d| Ok(Frame::data(d))))
            }
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            RequestBody::Empty => true,
            RequestBody::Full { pending, .. } => pending.is_none(),
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            RequestBody::Empty => SizeHint::with_exact(0),
            RequestBody::Full { pending, .. } => {
                SizeHint::with_exact(pending.as_ref().map_or(0, |d| d.len() as u64))
            }
        }
    }
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "RequestBody::Empty"),
            RequestBody::Full { source, pending } => f
                .debug_struct("RequestBody::Full")
                .field("len", &source.len())
                .field("consumed", &pending.is_none())
                .finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn test_empty_body() {
        let body = RequestBody::empty();
        assert!(body.is_end_stream());
        assert_eq!(body.content_length(), 0);

        let collected = body.collect().await.unwrap();
        assert!(collected.to_bytes().is_empty());
    }

    #[tokio::test]
    async fn test_full_body() {
        let data = Bytes::from("hello world");
        let body = RequestBody::full(data.clone());
        assert_eq!(body.size_hint().exact(), Some(11));

        let collected = body.collect().await.unwrap();
        assert_eq!(collected.to_bytes(), data);
    }

    #[tokio::test]
    async fn test_replay_after_read() {
        let mut body = RequestBody::full("payload");
        let first = Pin::new(&mut body).collect().await.unwrap().to_bytes();
        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));

        let replay = body.replay();
        assert_eq!(replay.size_hint().exact(), Some(7));
        let second = replay.collect().await.unwrap().to_bytes();
        assert_eq!(first, second);
        assert_eq!(body.content_length(), 7);
    }

    #[tokio::test]
    async fn test_replays_are_independent() {
        let body = RequestBody::full("abc");
        let a = body.replay();
        let b = body.clone();

        assert_eq!(a.collect().await.unwrap().to_bytes(), "abc");
        assert_eq!(b.collect().await.unwrap().to_bytes(), "abc");
        assert_eq!(body.collect().await.unwrap().to_bytes(), "abc");
    }
}
