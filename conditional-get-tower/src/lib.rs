//! Tower middleware for HTTP conditional GET.
//!
//! This crate provides [`ConditionalGet`], a Tower [`Layer`] that turns
//! responses the client already has into empty `304 Not Modified` responses.
//! The wrapped service keeps producing full responses with `ETag` and/or
//! `Last-Modified` headers; the middleware compares them with the request's
//! `If-None-Match` / `If-Modified-Since` and drops the body when they match.
//!
//! # When to Use This Crate
//!
//! Use `conditional-get-tower` when a Tower-based HTTP service (Axum, Hyper,
//! tonic-web, ...) already sets validators and you want clients revalidating
//! their caches to receive `304`s without touching every handler.
//!
//! # Rules
//!
//! A response is rewritten only when all of these hold:
//!
//! - the request method is eligible (`GET` or `HEAD` by default),
//! - the upstream status is `200 OK`,
//! - `ETag` equals `If-None-Match`, **or** `If-Modified-Since` is not older
//!   than `Last-Modified`.
//!
//! The rewritten response keeps every upstream header except `Content-Type`
//! and `Content-Length`. In every other case the upstream response is returned
//! untouched. The upstream service is called exactly once per request either
//! way, and the upstream body is dropped exactly once.
//!
//! # Quick Start
//!
//! ```
//! use bytes::Bytes;
//! use conditional_get_tower::ConditionalGet;
//! use http::{Request, Response, StatusCode};
//! use http_body_util::Full;
//! use tower::{ServiceBuilder, ServiceExt, service_fn};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let service = ServiceBuilder::new()
//!     .layer(ConditionalGet::new())
//!     .service(service_fn(|_req: Request<()>| async {
//!         Ok::<_, std::convert::Infallible>(
//!             Response::builder()
//!                 .header("etag", "\"v1\"")
//!                 .body(Full::new(Bytes::from("Hello")))
//!                 .unwrap(),
//!         )
//!     }));
//!
//! let request = Request::get("/")
//!     .header("if-none-match", "\"v1\"")
//!     .body(())
//!     .unwrap();
//! let response = service.oneshot(request).await.unwrap();
//! assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
//! # }
//! ```
//!
//! # Configuration
//!
//! Use [`ConditionalGet::builder()`] to restrict eligible methods or switch to
//! parsed HTTP-date comparison, or load a
//! [`ConfigConditional`](conditional_get::ConfigConditional) from YAML and
//! pass it to [`ConditionalGetBuilder::config`].
//!
//! # Main Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConditionalGet`] | Tower `Layer`, the main entry point |
//! | [`ConditionalGetBuilder`] | Fluent builder for the layer |
//! | [`ConditionalGetService`] | The Tower `Service` wrapping upstream |
//! | [`ConditionalGetFuture`] | Response future applying the rewrite |
//!
//! [`Layer`]: tower::Layer

#![warn(missing_docs)]

/// Response future of the conditional GET service.
pub mod future;
/// Tower layer and builder.
pub mod layer;
/// The Tower service performing conditional GET evaluation.
pub mod service;

pub use conditional_get::{ConditionalBody, ConditionalConfig, DateComparison};
pub use future::ConditionalGetFuture;
pub use layer::{ConditionalGet, ConditionalGetBuilder};
pub use service::ConditionalGetService;
