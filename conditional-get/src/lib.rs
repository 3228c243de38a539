//! HTTP conditional GET evaluation.
//!
//! Given the response a downstream handler produced for a request, this crate
//! decides whether the client's cached copy is still current and, if so,
//! replaces the response with an empty `304 Not Modified`.
//!
//! # Core Concepts
//!
//! - **[`RequestValidators`]**: method plus `If-None-Match` / `If-Modified-Since`
//!   captured from the request before it is handed downstream.
//! - **[`Freshness`]**: the outcome of comparing request validators with the
//!   response's `ETag` / `Last-Modified`.
//! - **[`ConditionalEvaluator`]**: applies the eligibility rules (method, `200 OK`)
//!   and rewrites fresh responses.
//! - **[`ConditionalBody`]**: the body type of every evaluated response. On the
//!   `304` path it owns and releases the discarded downstream body.
//!
//! This crate only consumes validators. Generating `ETag` or `Last-Modified`
//! is left to the downstream handler.
//!
//! For a Tower middleware built on top of this crate see
//! `conditional-get-tower`.

#![warn(missing_docs)]

pub mod body;
pub mod config;
pub mod date;
pub mod error;
mod evaluator;
pub mod freshness;

pub use body::{ConditionalBody, NotModifiedBody};
pub use config::{ConditionalConfig, ConditionalConfigBuilder, ConfigConditional};
pub use date::DateComparison;
pub use error::ConfigError;
pub use evaluator::ConditionalEvaluator;
pub use freshness::{Freshness, RequestValidators, Validator};
