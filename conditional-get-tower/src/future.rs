use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use conditional_get::{ConditionalBody, ConditionalEvaluator, RequestValidators};
use futures::ready;
use http::Response;
use pin_project::pin_project;
use tracing::trace;

/// Future returned by [`ConditionalGetService`](crate::ConditionalGetService).
///
/// Wraps the upstream service's future. Once the upstream response is
/// complete the captured request validators are checked against it and the
/// response is either passed through or replaced by `304 Not Modified`.
/// Upstream errors are returned as they are.
#[pin_project]
pub struct ConditionalGetFuture<F> {
    #[pin]
    inner: F,
    validators: RequestValidators,
    evaluator: Arc<ConditionalEvaluator>,
}

impl<F> ConditionalGetFuture<F> {
    /// Creates the future from the upstream call and the captured validators.
    pub fn new(
        inner: F,
        validators: RequestValidators,
        evaluator: Arc<ConditionalEvaluator>,
    ) -> Self {
        Self {
            inner,
            validators,
            evaluator,
        }
    }
}

impl<F, ResBody, E> Future for ConditionalGetFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = Result<Response<ConditionalBody<ResBody>>, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();

        match ready!(this.inner.poll(cx)) {
            Ok(response) => Poll::Ready(Ok(this.evaluator.evaluate(this.validators, response))),
            Err(error) => {
                trace!(method = %this.validators.method(), "upstream service failed");
                Poll::Ready(Err(error))
            }
        }
    }
}
