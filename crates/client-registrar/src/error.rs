//! # Registrar Errors
//!
//! This module defines the common error types used throughout the registrar.
//! By centralizing error definitions, we ensure every integration surfaces
//! the same failure taxonomy through the same completion channel.

/// Boxed error type used to carry opaque client-construction failures.
///
/// The registrar never reinterprets a factory error; it is propagated
/// verbatim as the `source` of [`RegistrationError::Client`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can terminate a registration call.
///
/// Every variant is terminal and non-retriable: a failed call leaves the
/// namespace exactly as it found it, because all checks run strictly before
/// the single mutating step.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    /// The configuration carried no API key (or an empty one). Checked
    /// before any client is constructed.
    #[error("{namespace}: an API key must be provided")]
    MissingApiKey {
        /// Decoration key of the integration that was being registered.
        namespace: &'static str,
    },

    /// The client factory rejected the supplied credentials or options.
    #[error("{namespace}: failed to construct client")]
    Client {
        /// Decoration key of the integration that was being registered.
        namespace: &'static str,
        /// The factory's own error, unchanged.
        #[source]
        source: BoxError,
    },

    /// The chosen instance name would shadow a member of the client type.
    #[error("{namespace}: '{name}' is a reserved keyword")]
    ReservedName {
        /// Decoration key of the integration that was being registered.
        namespace: &'static str,
        /// The rejected instance name.
        name: String,
    },

    /// The instance name is already taken in this (possibly inherited)
    /// namespace.
    #[error("{namespace}: '{name}' instance name has already been registered")]
    DuplicateName {
        /// Decoration key of the integration that was being registered.
        namespace: &'static str,
        /// The rejected instance name.
        name: String,
    },

    /// The namespace key is already populated on this scope chain, so no
    /// further default registration may claim it.
    #[error("{namespace} has already been registered")]
    DuplicateDefault {
        /// Decoration key of the integration that was being registered.
        namespace: &'static str,
    },

    /// The host decoration contract was violated: the key already exists as
    /// an own field of the scope. Unreachable from the registrar itself
    /// (its checks run under the registration lock), but [`decorate`]
    /// is public API.
    ///
    /// [`decorate`]: crate::AppContext::decorate
    #[error(transparent)]
    Decorate(#[from] DecorateError),
}

impl RegistrationError {
    /// The decoration key of the integration the failure belongs to.
    pub fn namespace(&self) -> &'static str {
        match self {
            Self::MissingApiKey { namespace }
            | Self::Client { namespace, .. }
            | Self::ReservedName { namespace, .. }
            | Self::DuplicateName { namespace, .. }
            | Self::DuplicateDefault { namespace } => namespace,
            Self::Decorate(e) => e.key,
        }
    }
}

/// Error raised when [`AppContext::decorate`](crate::AppContext::decorate)
/// is asked to introduce a key that is already an own field of the scope.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{key}' has already been decorated on this scope")]
pub struct DecorateError {
    /// The colliding decoration key.
    pub key: &'static str,
}

/// Errors surfaced by the startup barrier while draining completion
/// channels.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// A registration reported a failure; startup aborts on the first one,
    /// in registration order.
    #[error(transparent)]
    Registration(#[from] RegistrationError),

    /// A completion sender was dropped without firing. The exactly-once
    /// contract of the completion channel was violated.
    #[error("a registration completed without signalling its outcome")]
    CompletionDropped,
}
