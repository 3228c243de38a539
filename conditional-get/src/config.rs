//! Evaluator configuration.
//!
//! [`ConditionalConfig`] is the validated, runtime form used by
//! [`ConditionalEvaluator`](crate::ConditionalEvaluator). [`ConfigConditional`]
//! is its serializable counterpart for loading from YAML or any other serde
//! format.
//!
//! ```
//! use conditional_get::{ConfigConditional, DateComparison};
//!
//! let config = ConfigConditional::from_yaml(
//!     r#"
//! methods: [GET]
//! date_comparison: HttpDate
//! "#,
//! )
//! .unwrap()
//! .into_config()
//! .unwrap();
//!
//! assert_eq!(config.methods(), &[http::Method::GET]);
//! assert_eq!(config.date_comparison(), DateComparison::HttpDate);
//! ```

use http::Method;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::DateComparison;
use crate::error::ConfigError;

/// Methods that may ever receive a `304` rewrite.
pub const SUPPORTED_METHODS: [Method; 2] = [Method::GET, Method::HEAD];

/// Validated configuration for conditional GET evaluation.
///
/// The default makes `GET` and `HEAD` eligible for the `304` rewrite and
/// compares `If-Modified-Since` against `Last-Modified` lexically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionalConfig {
    methods: Vec<Method>,
    date_comparison: DateComparison,
}

impl ConditionalConfig {
    /// Creates a builder starting from the default configuration.
    pub fn builder() -> ConditionalConfigBuilder {
        ConditionalConfigBuilder::default()
    }

    /// Returns a builder seeded with this configuration.
    pub fn into_builder(self) -> ConditionalConfigBuilder {
        ConditionalConfigBuilder { config: self }
    }

    /// Methods eligible for the `304` rewrite.
    ///
    /// Always a subset of [`SUPPORTED_METHODS`].
    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    /// How `If-Modified-Since` is compared with `Last-Modified`.
    pub fn date_comparison(&self) -> DateComparison {
        self.date_comparison
    }
}

impl Default for ConditionalConfig {
    fn default() -> Self {
        Self {
            methods: vec![Method::GET, Method::HEAD],
            date_comparison: DateComparison::default(),
        }
    }
}

/// Fluent builder for [`ConditionalConfig`].
#[derive(Debug, Clone, Default)]
pub struct ConditionalConfigBuilder {
    config: ConditionalConfig,
}

impl ConditionalConfigBuilder {
    /// Replaces the set of eligible methods.
    ///
    /// Methods outside [`SUPPORTED_METHODS`] are dropped, so the set can only
    /// be narrowed. Use [`ConfigConditional::into_config`] to have them
    /// reported as errors instead.
    pub fn methods<I>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = Method>,
    {
        self.config.methods = methods
            .into_iter()
            .filter(|method| {
                let supported = SUPPORTED_METHODS.contains(method);
                if !supported {
                    warn!(%method, "ignoring method not eligible for conditional GET");
                }
                supported
            })
            .collect();
        self
    }

    /// Sets the date comparison mode.
    pub fn date_comparison(mut self, date_comparison: DateComparison) -> Self {
        self.config.date_comparison = date_comparison;
        self
    }

    /// Finishes the configuration.
    pub fn build(self) -> ConditionalConfig {
        self.config
    }
}

/// Serializable form of [`ConditionalConfig`].
///
/// Every field is optional; missing fields take the [`ConditionalConfig`]
/// defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConfigConditional {
    /// Method names eligible for the `304` rewrite, e.g. `GET`.
    pub methods: Vec<String>,
    /// How `If-Modified-Since` is compared with `Last-Modified`.
    pub date_comparison: DateComparison,
}

impl Default for ConfigConditional {
    fn default() -> Self {
        Self {
            methods: vec![Method::GET.to_string(), Method::HEAD.to_string()],
            date_comparison: DateComparison::default(),
        }
    }
}

impl ConfigConditional {
    /// Parses a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] on malformed YAML or unknown fields.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        Ok(serde_saphyr::from_str(yaml)?)
    }

    /// Validates method names and produces the runtime configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMethod`] for the first method name that is
    /// not a valid HTTP token, and [`ConfigError::UnsupportedMethod`] for the
    /// first one outside [`SUPPORTED_METHODS`].
    pub fn into_config(self) -> Result<ConditionalConfig, ConfigError> {
        let methods = self
            .methods
            .into_iter()
            .map(|name| {
                let method = Method::from_bytes(name.as_bytes()).map_err(|source| {
                    ConfigError::InvalidMethod {
                        method: name,
                        source,
                    }
                })?;
                if SUPPORTED_METHODS.contains(&method) {
                    Ok(method)
                } else {
                    Err(ConfigError::UnsupportedMethod { method })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ConditionalConfig {
            methods,
            date_comparison: self.date_comparison,
        })
    }
}

impl From<&ConditionalConfig> for ConfigConditional {
    fn from(config: &ConditionalConfig) -> Self {
        Self {
            methods: config.methods.iter().map(ToString::to_string).collect(),
            date_comparison: config.date_comparison,
        }
    }
}
