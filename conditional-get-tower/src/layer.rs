use std::sync::Arc;

use conditional_get::{
    ConditionalConfig, ConditionalConfigBuilder, ConditionalEvaluator, DateComparison,
};
use http::Method;
use tower::Layer;

use crate::service::ConditionalGetService;

/// Tower [`Layer`] adding conditional GET handling to a service.
///
/// The layer is cheap to clone: every service it produces shares the same
/// immutable [`ConditionalEvaluator`].
#[derive(Debug, Clone, Default)]
pub struct ConditionalGet {
    evaluator: Arc<ConditionalEvaluator>,
}

impl ConditionalGet {
    /// Layer with the default configuration: `GET` and `HEAD` eligible,
    /// lexical date comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Layer with an explicit configuration.
    pub fn with_config(config: ConditionalConfig) -> Self {
        Self {
            evaluator: Arc::new(ConditionalEvaluator::new(config)),
        }
    }

    /// Creates a builder starting from the default configuration.
    pub fn builder() -> ConditionalGetBuilder {
        ConditionalGetBuilder::default()
    }

    /// The evaluator shared by every service this layer produces.
    pub fn evaluator(&self) -> &ConditionalEvaluator {
        &self.evaluator
    }
}

impl<S> Layer<S> for ConditionalGet {
    type Service = ConditionalGetService<S>;

    fn layer(&self, upstream: S) -> Self::Service {
        ConditionalGetService::new(upstream, Arc::clone(&self.evaluator))
    }
}

/// Fluent builder for the [`ConditionalGet`] layer.
#[derive(Debug, Clone, Default)]
pub struct ConditionalGetBuilder {
    config: ConditionalConfigBuilder,
}

impl ConditionalGetBuilder {
    /// Methods eligible for the `304` rewrite.
    ///
    /// Only `GET` and `HEAD` can be eligible; anything else is ignored.
    pub fn methods<I>(self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        ConditionalGetBuilder {
            config: self.config.methods(methods),
        }
    }

    /// How `If-Modified-Since` is compared with `Last-Modified`.
    pub fn date_comparison(self, date_comparison: DateComparison) -> Self {
        ConditionalGetBuilder {
            config: self.config.date_comparison(date_comparison),
        }
    }

    /// Replaces the whole configuration, e.g. one loaded with
    /// [`ConfigConditional`](conditional_get::ConfigConditional).
    pub fn config(self, config: ConditionalConfig) -> Self {
        ConditionalGetBuilder {
            config: config.into_builder(),
        }
    }

    /// Builds the layer.
    pub fn build(self) -> ConditionalGet {
        ConditionalGet::with_config(self.config.build())
    }
}
