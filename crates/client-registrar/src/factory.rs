//! # ClientFactory Trait
//!
//! The contract an SDK integration implements to be driven by the generic
//! [`register`](crate::register) routine.
//!
//! # Architecture Note
//! Why do we need this trait?
//! The registration protocol (key validation, reserved-name check,
//! duplicate guards, namespace mutation) is identical for every wrapped
//! SDK; only three things differ per integration: the decoration key, the
//! client constructor, and the set of member names that must not be
//! shadowed. By moving exactly those three things behind a trait, the
//! protocol is written *once* and each integration becomes a thin, mostly
//! declarative instantiation.
//!
//! The reserved-name set is a `const` rather than a runtime reflection over
//! the constructed client: the public members of a client type are known
//! when the integration is written, so they are enumerated once, at compile
//! time.

use std::fmt::Debug;

use crate::error::BoxError;

/// Factory seam between the registration protocol and a wrapped SDK.
///
/// # Example
///
/// ```rust
/// use client_registrar::{ClientFactory, BoxError};
///
/// struct Echo {
///     api_key: String,
/// }
///
/// impl Echo {
///     fn ping(&self) -> &str {
///         &self.api_key
///     }
/// }
///
/// struct EchoRegistration;
///
/// impl ClientFactory for EchoRegistration {
///     const NAMESPACE: &'static str = "echo";
///     const RESERVED_NAMES: &'static [&'static str] = &["ping"];
///     type Options = ();
///     type Client = Echo;
///
///     fn build(api_key: &str, _options: ()) -> Result<Echo, BoxError> {
///         Ok(Echo { api_key: api_key.to_owned() })
///     }
/// }
/// ```
pub trait ClientFactory {
    /// The decoration key the namespace lives under on the context.
    const NAMESPACE: &'static str;

    /// Instance names that would shadow an accessible member of
    /// [`Client`](Self::Client). Enumerate every public method and
    /// accessor of the client type here.
    const RESERVED_NAMES: &'static [&'static str];

    /// Passthrough configuration forwarded verbatim to [`build`](Self::build).
    type Options: Default + Clone + Debug + Send + Sync;

    /// The opaque client handle this integration attaches.
    type Client: Send + Sync + 'static;

    /// Constructs a client. May fail on invalid credentials or options;
    /// the failure is propagated unchanged by the registrar.
    fn build(api_key: &str, options: Self::Options) -> Result<Self::Client, BoxError>;
}
