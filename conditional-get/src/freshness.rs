//! Request validators and the freshness decision.
//!
//! A response is *fresh* when either validator matches:
//!
//! - the response `ETag` equals the request `If-None-Match` byte for byte, or
//! - the request `If-Modified-Since` is not older than the response
//!   `Last-Modified` (see [`DateComparison`]).
//!
//! A missing header on either side means that validator does not match.

use http::header::{ETAG, IF_MODIFIED_SINCE, IF_NONE_MATCH, LAST_MODIFIED};
use http::{HeaderMap, HeaderValue, Method, Request, request::Parts};

use crate::date::DateComparison;

/// Validators captured from a request before it is handed to the downstream
/// service.
///
/// The request itself is moved into the downstream call, so the method and the
/// two conditional headers are cloned out up front. This is request-local state
/// and is dropped with the request's future.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestValidators {
    method: Method,
    if_none_match: Option<HeaderValue>,
    if_modified_since: Option<HeaderValue>,
}

impl RequestValidators {
    /// Captures validators from a request method and its headers.
    pub fn new(method: Method, headers: &HeaderMap) -> Self {
        Self {
            method,
            if_none_match: headers.get(IF_NONE_MATCH).cloned(),
            if_modified_since: headers.get(IF_MODIFIED_SINCE).cloned(),
        }
    }

    /// Captures validators from a full request without consuming it.
    pub fn from_request<B>(request: &Request<B>) -> Self {
        Self::new(request.method().clone(), request.headers())
    }

    /// Captures validators from request parts.
    pub fn from_parts(parts: &Parts) -> Self {
        Self::new(parts.method.clone(), &parts.headers)
    }

    /// The request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// The first `If-None-Match` value, if any.
    pub fn if_none_match(&self) -> Option<&HeaderValue> {
        self.if_none_match.as_ref()
    }

    /// The first `If-Modified-Since` value, if any.
    pub fn if_modified_since(&self) -> Option<&HeaderValue> {
        self.if_modified_since.as_ref()
    }

    /// `ETag` present, `If-None-Match` present, and both equal.
    pub fn matches_etag(&self, response: &HeaderMap) -> bool {
        match (response.get(ETAG), &self.if_none_match) {
            (Some(etag), Some(none_match)) => etag == none_match,
            _ => false,
        }
    }

    /// `Last-Modified` present, `If-Modified-Since` present, and
    /// `If-Modified-Since >= Last-Modified` under `comparison`.
    pub fn matches_modified_since(&self, response: &HeaderMap, comparison: DateComparison) -> bool {
        match (response.get(LAST_MODIFIED), &self.if_modified_since) {
            (Some(last_modified), Some(since)) => {
                comparison.not_modified_since(since, last_modified)
            }
            _ => false,
        }
    }

    /// Computes freshness of `response` headers against these validators.
    pub fn freshness(&self, response: &HeaderMap, comparison: DateComparison) -> Freshness {
        if self.matches_etag(response) {
            Freshness::Fresh(Validator::EntityTag)
        } else if self.matches_modified_since(response, comparison) {
            Freshness::Fresh(Validator::LastModified)
        } else {
            Freshness::Stale
        }
    }
}

/// The validator that proved a response fresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validator {
    /// `ETag` matched `If-None-Match`.
    EntityTag,
    /// `Last-Modified` was not newer than `If-Modified-Since`.
    LastModified,
}

/// Outcome of comparing request validators with response validators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Freshness {
    /// The client's cached copy is still current.
    Fresh(Validator),
    /// No validator matched; the full response must be sent.
    Stale,
}

impl Freshness {
    /// Whether any validator matched.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Freshness::Fresh(_))
    }
}
