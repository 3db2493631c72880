//! # Mock Integration & Testing Guide
//!
//! A minimal [`ClientFactory`] whose client does nothing but remember how
//! it was built. It lets you exercise the full registration protocol
//! (reserved names, duplicate guards, factory failures, completion
//! channels) without wiring a real SDK integration.
//!
//! Exported from the library proper instead of `#[cfg(test)]` so it works
//! with integration tests and downstream crates' test suites.
//!
//! ## Error injection
//!
//! Construction failures are driven through the options, so no shared
//! state is needed:
//!
//! ```rust
//! use client_registrar::mock::{MockFactory, MockOptions};
//! use client_registrar::{register, AppContext, RegistrationConfig, RegistrationError};
//!
//! let ctx = AppContext::new();
//! let config = RegistrationConfig::new("sk_test").with_options(MockOptions {
//!     fail_with: Some("credentials rejected".to_string()),
//!     ..MockOptions::default()
//! });
//!
//! let err = register::<MockFactory>(&ctx, config).unwrap_err();
//! assert!(matches!(err, RegistrationError::Client { .. }));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::BoxError;
use crate::factory::ClientFactory;

/// Passthrough options understood by [`MockFactory`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MockOptions {
    /// Free-form label echoed back by the client.
    pub label: String,
    /// When set, [`MockFactory::build`] fails with this message.
    pub fail_with: Option<String>,
}

/// The failure produced when [`MockOptions::fail_with`] is set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mock client rejected configuration: {0}")]
pub struct MockBuildError(pub String);

/// A client handle that records its construction inputs.
#[derive(Debug)]
pub struct MockClient {
    api_key: String,
    options: MockOptions,
}

impl MockClient {
    /// The credential the client was built with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The passthrough options the client was built with.
    pub fn options(&self) -> &MockOptions {
        &self.options
    }

    /// A stand-in for a real client member; its name is reserved.
    pub fn ping(&self) -> &'static str {
        "pong"
    }
}

/// Factory instantiating the registration protocol for [`MockClient`].
pub struct MockFactory;

impl ClientFactory for MockFactory {
    const NAMESPACE: &'static str = "mock";
    const RESERVED_NAMES: &'static [&'static str] = &["api_key", "options", "ping"];
    type Options = MockOptions;
    type Client = MockClient;

    fn build(api_key: &str, options: MockOptions) -> Result<MockClient, BoxError> {
        if let Some(message) = options.fail_with.clone() {
            return Err(Box::new(MockBuildError(message)));
        }
        Ok(MockClient {
            api_key: api_key.to_owned(),
            options,
        })
    }
}
