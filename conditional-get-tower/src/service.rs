use std::sync::Arc;
use std::task::{Context, Poll};

use conditional_get::{ConditionalBody, ConditionalEvaluator};
use http::{Request, Response};
use tower::Service;

use crate::future::ConditionalGetFuture;

/// Tower service that answers conditional requests with `304 Not Modified`.
///
/// Each call invokes the upstream service exactly once. The request's method
/// and validators are captured before the request is moved upstream, and the
/// returned [`ConditionalGetFuture`] evaluates the upstream response against
/// them.
///
/// Created by applying the [`ConditionalGet`](crate::ConditionalGet) layer.
#[derive(Debug)]
pub struct ConditionalGetService<S> {
    upstream: S,
    evaluator: Arc<ConditionalEvaluator>,
}

impl<S> ConditionalGetService<S> {
    /// Wraps `upstream` with the given evaluator.
    pub fn new(upstream: S, evaluator: Arc<ConditionalEvaluator>) -> Self {
        ConditionalGetService {
            upstream,
            evaluator,
        }
    }

    /// Reference to the wrapped service.
    pub fn get_ref(&self) -> &S {
        &self.upstream
    }

    /// Consumes `self`, returning the wrapped service.
    pub fn into_inner(self) -> S {
        self.upstream
    }
}

impl<S> Clone for ConditionalGetService<S>
where
    S: Clone,
{
    fn clone(&self) -> Self {
        Self {
            upstream: self.upstream.clone(),
            evaluator: Arc::clone(&self.evaluator),
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for ConditionalGetService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = Response<ConditionalBody<ResBody>>;
    type Error = S::Error;
    type Future = ConditionalGetFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.upstream.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        let validators = self.evaluator.validators(&req);
        let inner = self.upstream.call(req);
        ConditionalGetFuture::new(inner, validators, Arc::clone(&self.evaluator))
    }
}
