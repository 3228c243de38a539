//! Response bodies emitted by the conditional GET middleware.
//!
//! Both outcomes of the freshness decision must produce the same body type, so
//! the middleware wraps every downstream body in [`ConditionalBody`]:
//!
//! - **Passthrough**: the downstream body, streamed to the client untouched.
//! - **NotModified**: an always-empty body that owns the downstream body and
//!   releases it instead of sending it.
//!
//! ## Release guarantee
//!
//! The downstream body is released (dropped) exactly once whichever branch is
//! taken. On the `304` branch the [`NotModifiedBody`] keeps the original alive
//! until the transport finishes with the empty body: polling it to the end of
//! stream releases the original eagerly, otherwise it goes when the
//! `NotModifiedBody` itself is dropped.

use bytes::{Buf, Bytes};
use http_body::{Body as HttpBody, Frame, SizeHint};
use pin_project::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::trace;

/// Empty body standing in for a discarded downstream body on a `304` response.
#[pin_project]
#[derive(Debug)]
pub struct NotModifiedBody<B> {
    original: Option<B>,
}

impl<B> NotModifiedBody<B> {
    /// Takes ownership of the body that will not be sent.
    pub fn new(original: B) -> Self {
        Self {
            original: Some(original),
        }
    }

    /// Whether the original body has already been released.
    pub fn is_released(&self) -> bool {
        self.original.is_none()
    }

    fn release(original: &mut Option<B>) {
        if original.take().is_some() {
            trace!("released discarded response body");
        }
    }
}

impl<B> HttpBody for NotModifiedBody<B> {
    type Data = Bytes;
    type Error = std::convert::Infallible;

    fn poll_frame(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Self::release(self.project().original);
        Poll::Ready(None)
    }

    fn is_end_stream(&self) -> bool {
        true
    }

    fn size_hint(&self) -> SizeHint {
        SizeHint::with_exact(0)
    }
}

/// Body of every response leaving the middleware.
#[pin_project(project = ConditionalBodyProj)]
#[derive(Debug)]
pub enum ConditionalBody<B> {
    /// The downstream body, delivered as produced.
    Passthrough(#[pin] B),
    /// Empty body of a synthesized `304 Not Modified`.
    NotModified(#[pin] NotModifiedBody<B>),
}

impl<B> ConditionalBody<B> {
    /// Whether this is the empty body of a `304` response.
    pub fn is_not_modified(&self) -> bool {
        matches!(self, ConditionalBody::NotModified(_))
    }

    /// Returns the downstream body if it was passed through.
    pub fn into_passthrough(self) -> Option<B> {
        match self {
            ConditionalBody::Passthrough(body) => Some(body),
            ConditionalBody::NotModified(_) => None,
        }
    }
}

impl<B> HttpBody for ConditionalBody<B>
where
    B: HttpBody,
{
    type Data = Bytes;
    type Error = B::Error;

    fn poll_frame(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        match self.project() {
            ConditionalBodyProj::Passthrough(body) => match body.poll_frame(cx) {
                Poll::Ready(Some(Ok(frame))) => {
                    let frame = frame.map_data(|mut data| data.copy_to_bytes(data.remaining()));
                    Poll::Ready(Some(Ok(frame)))
                }
                Poll::Ready(Some(Err(e))) => Poll::Ready(Some(Err(e))),
                Poll::Ready(None) => Poll::Ready(None),
                Poll::Pending => Poll::Pending,
            },
            ConditionalBodyProj::NotModified(body) => match body.poll_frame(cx) {
                Poll::Ready(Some(Ok(frame))) => Poll::Ready(Some(Ok(frame))),
                Poll::Ready(Some(Err(never))) => match never {},
                Poll::Ready(None) => Poll::Ready(None),
                Poll::Pending => Poll::Pending,
            },
        }
    }

    fn size_hint(&self) -> SizeHint {
        match self {
            ConditionalBody::Passthrough(body) => body.size_hint(),
            ConditionalBody::NotModified(body) => body.size_hint(),
        }
    }

    fn is_end_stream(&self) -> bool {
        match self {
            ConditionalBody::Passthrough(body) => body.is_end_stream(),
            ConditionalBody::NotModified(body) => body.is_end_stream(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::{BodyExt, Full};

    #[tokio::test]
    async fn not_modified_body_is_empty_and_releases_on_end() {
        let mut body = NotModifiedBody::new(Full::new(Bytes::from_static(b"0123456789")));
        assert!(body.is_end_stream());
        assert_eq!(body.size_hint().exact(), Some(0));
        assert!(!body.is_released());

        assert!(body.frame().await.is_none());
        assert!(body.is_released());
        assert!(body.frame().await.is_none());
    }

    #[tokio::test]
    async fn passthrough_streams_original_bytes() {
        let body = ConditionalBody::Passthrough(Full::new(Bytes::from_static(b"hello")));
        assert!(!body.is_not_modified());
        assert_eq!(body.size_hint().exact(), Some(5));
        let collected = body.collect().await.unwrap().to_bytes();
        assert_eq!(collected, Bytes::from_static(b"hello"));
    }

    #[tokio::test]
    async fn not_modified_variant_collects_to_nothing() {
        let body = ConditionalBody::NotModified(NotModifiedBody::new(Full::new(
            Bytes::from_static(b"hello"),
        )));
        assert!(body.is_not_modified());
        let collected = body.collect().await.unwrap().to_bytes();
        assert!(collected.is_empty());
    }
}
