//! # Payments Integration
//!
//! An in-process payment-processing client and its thin instantiation of
//! the registration protocol. The client itself is a
//! stand-in for the wrapped SDK: it validates its configuration at
//! construction time and exposes resource accessors whose names form the
//! integration's reserved set.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use client_registrar::{namespace, AppContext, BoxError, ClientFactory, Namespace};

/// Passthrough options forwarded verbatim to the payments client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentsOptions {
    /// Pinned API version, `YYYY-MM-DD`. `None` uses the account default.
    pub api_version: Option<String>,
    /// How many times a failed network call is retried.
    pub max_network_retries: u32,
    /// Per-request timeout in milliseconds. Must be non-zero.
    pub timeout_ms: u64,
    /// API host.
    pub host: String,
    /// API port.
    pub port: u16,
}

impl Default for PaymentsOptions {
    fn default() -> Self {
        Self {
            api_version: None,
            max_network_retries: 0,
            timeout_ms: 80_000,
            host: "api.payments.example".to_string(),
            port: 443,
        }
    }
}

/// Configuration errors raised by [`PaymentsClient::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaymentsError {
    /// The pinned API version is not a `YYYY-MM-DD` date.
    #[error("invalid API version '{0}': expected YYYY-MM-DD")]
    InvalidApiVersion(String),

    /// A zero timeout would make every request fail immediately.
    #[error("timeout must be greater than zero")]
    InvalidTimeout,
}

/// Handle to the payment-processing API.
#[derive(Debug)]
pub struct PaymentsClient {
    api_key: String,
    options: PaymentsOptions,
}

impl PaymentsClient {
    /// Validates the options and builds a client.
    pub fn new(api_key: impl Into<String>, options: PaymentsOptions) -> Result<Self, PaymentsError> {
        if let Some(version) = &options.api_version {
            if !is_version_date(version) {
                return Err(PaymentsError::InvalidApiVersion(version.clone()));
            }
        }
        if options.timeout_ms == 0 {
            return Err(PaymentsError::InvalidTimeout);
        }
        Ok(Self {
            api_key: api_key.into(),
            options,
        })
    }

    /// The credential the client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The options the client was built with.
    pub fn config(&self) -> &PaymentsOptions {
        &self.options
    }

    /// The balance resource.
    pub fn balance(&self) -> Resource<'_> {
        self.resource("balance")
    }

    /// The charges resource.
    pub fn charges(&self) -> Resource<'_> {
        self.resource("charges")
    }

    /// The customers resource.
    pub fn customers(&self) -> Resource<'_> {
        self.resource("customers")
    }

    /// The refunds resource.
    pub fn refunds(&self) -> Resource<'_> {
        self.resource("refunds")
    }

    fn resource(&self, path: &'static str) -> Resource<'_> {
        Resource { client: self, path }
    }
}

/// One addressable resource of the payments API.
#[derive(Debug, Clone, Copy)]
pub struct Resource<'a> {
    client: &'a PaymentsClient,
    path: &'static str,
}

impl Resource<'_> {
    /// The resource's path segment.
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// Fully qualified endpoint URL for this resource.
    pub fn url(&self) -> String {
        let options = &self.client.options;
        format!("https://{}:{}/v1/{}", options.host, options.port, self.path)
    }
}

fn is_version_date(version: &str) -> bool {
    let bytes = version.as_bytes();
    bytes.len() == 10
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| if i == 4 || i == 7 { *b == b'-' } else { b.is_ascii_digit() })
}

/// Instantiation of the registration protocol for [`PaymentsClient`].
pub struct PaymentsRegistration;

impl ClientFactory for PaymentsRegistration {
    const NAMESPACE: &'static str = "payments";
    // Every public member of PaymentsClient; a named instance may not
    // shadow any of them.
    const RESERVED_NAMES: &'static [&'static str] =
        &["api_key", "config", "balance", "charges", "customers", "refunds"];
    type Options = PaymentsOptions;
    type Client = PaymentsClient;

    fn build(api_key: &str, options: PaymentsOptions) -> Result<PaymentsClient, BoxError> {
        PaymentsClient::new(api_key, options).map_err(Into::into)
    }
}

/// Typed accessor for the payments namespace on a context.
pub trait PaymentsExt {
    /// The payments namespace attached to this scope chain, if any.
    fn payments(&self) -> Option<Arc<Namespace<PaymentsClient>>>;
}

impl PaymentsExt for AppContext {
    fn payments(&self) -> Option<Arc<Namespace<PaymentsClient>>> {
        namespace::<PaymentsRegistration>(self)
    }
}
