use std::convert::Infallible;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::task::{Context, Poll};

use bytes::Bytes;
use http::{Request, Response, StatusCode};
use http_body::{Body as HttpBody, Frame};
use http_body_util::Full;

/// Response body recording how many times it was dropped.
pub struct TrackedBody {
    inner: Full<Bytes>,
    releases: Arc<AtomicUsize>,
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.releases.fetch_add(1, Ordering::SeqCst);
    }
}

impl HttpBody for TrackedBody {
    type Data = Bytes;
    type Error = Infallible;

    fn poll_frame(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Frame<Self::Data>, Self::Error>>> {
        Pin::new(&mut self.inner).poll_frame(cx)
    }

    fn size_hint(&self) -> http_body::SizeHint {
        self.inner.size_hint()
    }
}

/// Canned upstream response plus counters for calls and body releases.
#[derive(Clone)]
pub struct Upstream {
    pub status: StatusCode,
    pub headers: Vec<(&'static str, &'static str)>,
    pub body: &'static str,
    pub calls: Arc<AtomicUsize>,
    pub releases: Arc<AtomicUsize>,
}

impl Upstream {
    pub fn new(status: StatusCode, headers: &[(&'static str, &'static str)]) -> Self {
        Self {
            status,
            headers: headers.to_vec(),
            body: "0123456789",
            calls: Arc::new(AtomicUsize::new(0)),
            releases: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn html(etag: &'static str) -> Self {
        Self::new(
            StatusCode::OK,
            &[
                ("etag", etag),
                ("content-type", "text/html"),
                ("content-length", "10"),
            ],
        )
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn releases(&self) -> usize {
        self.releases.load(Ordering::SeqCst)
    }

    pub fn respond<B>(&self, _request: Request<B>) -> Response<TrackedBody> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let builder = self
            .headers
            .iter()
            .fold(Response::builder().status(self.status), |builder, (k, v)| {
                builder.header(*k, *v)
            });
        builder
            .body(TrackedBody {
                inner: Full::new(Bytes::from_static(self.body.as_bytes())),
                releases: self.releases.clone(),
            })
            .unwrap()
    }
}

pub fn request(method: http::Method, headers: &[(&str, &str)]) -> Request<Full<Bytes>> {
    headers
        .iter()
        .fold(
            Request::builder().method(method).uri("/resource"),
            |builder, (k, v)| builder.header(*k, *v),
        )
        .body(Full::new(Bytes::new()))
        .unwrap()
}
