use std::future::Future;

use http::header::{CONTENT_LENGTH, CONTENT_TYPE};
use http::{Method, Request, Response, StatusCode};
use tracing::{debug, trace};

use crate::body::{ConditionalBody, NotModifiedBody};
use crate::config::ConditionalConfig;
use crate::freshness::{Freshness, RequestValidators};

/// Decides whether a downstream response may be replaced by `304 Not Modified`
/// and performs the rewrite.
///
/// The evaluator holds only immutable configuration, so a single instance can
/// be shared across threads and requests. All per-request state lives in
/// [`RequestValidators`] and the response being evaluated.
///
/// # Examples
///
/// ```
/// use bytes::Bytes;
/// use conditional_get::ConditionalEvaluator;
/// use http::{Request, Response, StatusCode};
/// use http_body_util::Full;
///
/// let evaluator = ConditionalEvaluator::default();
///
/// let request = Request::get("/")
///     .header("if-none-match", "\"abc\"")
///     .body(())
///     .unwrap();
/// let validators = evaluator.validators(&request);
///
/// let response = Response::builder()
///     .header("etag", "\"abc\"")
///     .header("content-type", "text/html")
///     .header("content-length", "10")
///     .body(Full::new(Bytes::from_static(b"0123456789")))
///     .unwrap();
///
/// let response = evaluator.evaluate(&validators, response);
/// assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
/// assert!(response.headers().get("content-type").is_none());
/// assert!(response.headers().get("content-length").is_none());
/// assert_eq!(response.headers()["etag"], "\"abc\"");
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConditionalEvaluator {
    config: ConditionalConfig,
}

impl ConditionalEvaluator {
    /// Creates an evaluator with the given configuration.
    pub fn new(config: ConditionalConfig) -> Self {
        Self { config }
    }

    /// The configuration in use.
    pub fn config(&self) -> &ConditionalConfig {
        &self.config
    }

    /// Captures the request validators needed after the request is consumed.
    pub fn validators<B>(&self, request: &Request<B>) -> RequestValidators {
        RequestValidators::from_request(request)
    }

    /// Whether `method` may receive a `304` rewrite.
    pub fn is_eligible(&self, method: &Method) -> bool {
        self.config.methods().contains(method)
    }

    /// Freshness of `headers` against `validators`, ignoring method and status.
    pub fn freshness(
        &self,
        validators: &RequestValidators,
        headers: &http::HeaderMap,
    ) -> Freshness {
        validators.freshness(headers, self.config.date_comparison())
    }

    /// Rewrites `response` to `304 Not Modified` when the method is eligible,
    /// the status is `200 OK` and a validator matches. Otherwise the response
    /// is returned unchanged.
    ///
    /// On rewrite all headers except `Content-Type` and `Content-Length` are
    /// kept, as are the version and extensions. The body is replaced by an
    /// empty [`NotModifiedBody`] that owns the original.
    pub fn evaluate<B>(
        &self,
        validators: &RequestValidators,
        response: Response<B>,
    ) -> Response<ConditionalBody<B>> {
        let (mut parts, body) = response.into_parts();

        if !self.is_eligible(validators.method()) || parts.status != StatusCode::OK {
            trace!(
                method = %validators.method(),
                status = %parts.status,
                "conditional request not eligible, passing response through"
            );
            return Response::from_parts(parts, ConditionalBody::Passthrough(body));
        }

        match self.freshness(validators, &parts.headers) {
            Freshness::Fresh(validator) => {
                debug!(
                    method = %validators.method(),
                    ?validator,
                    "response not modified, replacing with 304"
                );
                parts.status = StatusCode::NOT_MODIFIED;
                parts.headers.remove(CONTENT_TYPE);
                parts.headers.remove(CONTENT_LENGTH);
                Response::from_parts(
                    parts,
                    ConditionalBody::NotModified(NotModifiedBody::new(body)),
                )
            }
            Freshness::Stale => {
                trace!(method = %validators.method(), "response modified, passing through");
                Response::from_parts(parts, ConditionalBody::Passthrough(body))
            }
        }
    }

    /// Runs `downstream` exactly once with `request` and evaluates its
    /// response.
    ///
    /// Errors from `downstream` are returned untouched.
    pub async fn handle<ReqBody, ResBody, E, F, Fut>(
        &self,
        request: Request<ReqBody>,
        downstream: F,
    ) -> Result<Response<ConditionalBody<ResBody>>, E>
    where
        F: FnOnce(Request<ReqBody>) -> Fut,
        Fut: Future<Output = Result<Response<ResBody>, E>>,
    {
        let validators = self.validators(&request);
        let response = downstream(request).await?;
        Ok(self.evaluate(&validators, response))
    }
}
