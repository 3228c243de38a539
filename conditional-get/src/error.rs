//! Configuration errors.
//!
//! The request path never fails: missing or mismatched validators simply mean
//! the response is passed through. Errors only arise while turning
//! user-supplied configuration into a [`ConditionalConfig`].
//!
//! [`ConditionalConfig`]: crate::ConditionalConfig

/// Error produced while building a [`ConditionalConfig`](crate::ConditionalConfig)
/// from its serializable form.
///
/// # When You'll Encounter This
///
/// - [`ConfigConditional::into_config`] with a method name that is not a valid
///   HTTP token, or a method other than `GET` and `HEAD`
/// - [`ConfigConditional::from_yaml`] with malformed YAML or unknown fields
///
/// [`ConfigConditional::into_config`]: crate::ConfigConditional::into_config
/// [`ConfigConditional::from_yaml`]: crate::ConfigConditional::from_yaml
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A configured method name could not be parsed as an HTTP method.
    #[error("invalid HTTP method {method:?}: {source}")]
    InvalidMethod {
        /// The offending method string.
        method: String,
        /// Underlying parse error.
        #[source]
        source: http::method::InvalidMethod,
    },

    /// A configured method is valid HTTP but can never receive a `304`.
    #[error("method {method} is not eligible for conditional GET, only GET and HEAD are")]
    UnsupportedMethod {
        /// The rejected method.
        method: http::Method,
    },

    /// The configuration document could not be deserialized.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_saphyr::Error),
}
