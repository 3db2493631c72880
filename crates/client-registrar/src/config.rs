//! # Registration Configuration
//!
//! The per-call configuration accepted by [`register`](crate::register):
//! the two core fields (`api_key`, optional `name`) plus whatever options
//! the wrapped client understands, forwarded verbatim.

use serde::{Deserialize, Serialize};

/// Configuration for one registration call.
///
/// `O` is the integration's passthrough options type
/// ([`ClientFactory::Options`](crate::ClientFactory::Options)); it is
/// flattened when (de)serialized so a config file reads as one flat table,
/// the way the wrapped SDK's own configuration does.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistrationConfig<O> {
    /// Credential handed to the client factory. Required and non-empty.
    pub api_key: String,

    /// Instance name. `None` selects default mode; `Some` selects named
    /// mode and is checked against the integration's reserved-name set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Options forwarded verbatim to the client factory.
    #[serde(flatten)]
    pub options: O,
}

impl<O: Default> RegistrationConfig<O> {
    /// Default-mode configuration with default client options.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            name: None,
            options: O::default(),
        }
    }

    /// Named-mode configuration with default client options.
    pub fn named(api_key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            name: Some(name.into()),
            options: O::default(),
        }
    }

    /// Replaces the passthrough options.
    pub fn with_options(mut self, options: O) -> Self {
        self.options = options;
        self
    }
}
