//! # Client Registrar
//!
//! This crate provides the building blocks for attaching named client-SDK
//! instances (a payment-processing client, an analytics client) onto a
//! shared application context, for use by downstream request handlers.
//! The heart of it is the **instance-registration protocol**: the rules
//! governing how multiple registrations (default and named) coexist on
//! one decoration namespace without colliding, across nested scopes of an
//! application.
//!
//! ## The Two Registration Modes
//!
//! - **Default mode** (no instance name): the constructed client handle
//!   becomes the namespace itself. Exactly one default registration may
//!   succeed per context.
//! - **Named mode** (instance name given): the namespace becomes a
//!   name → handle map, created lazily on the first named registration.
//!   Each name may be used once, and may not shadow a member of the client
//!   type (the integration's reserved-name set).
//!
//! Once a namespace exists in either shape, the other mode can no longer
//! claim the same key.
//!
//! ## Write the Protocol Once, Instantiate Per SDK
//!
//! Every wrapped SDK runs the identical protocol; only the decoration key,
//! the client constructor, and the reserved-name set differ. Those three
//! things live behind the [`ClientFactory`] trait, so an integration is a
//! thin, mostly declarative instantiation:
//!
//! ```rust
//! use client_registrar::{
//!     namespace, register, AppContext, BoxError, ClientFactory, RegistrationConfig,
//! };
//!
//! // 1. The client handle (normally the wrapped SDK's client type).
//! struct Weather {
//!     api_key: String,
//! }
//!
//! impl Weather {
//!     fn forecast(&self) -> &'static str {
//!         "sunny"
//!     }
//! }
//!
//! // 2. The factory: decoration key, reserved names, constructor.
//! struct WeatherRegistration;
//!
//! impl ClientFactory for WeatherRegistration {
//!     const NAMESPACE: &'static str = "weather";
//!     const RESERVED_NAMES: &'static [&'static str] = &["forecast"];
//!     type Options = ();
//!     type Client = Weather;
//!
//!     fn build(api_key: &str, _options: ()) -> Result<Weather, BoxError> {
//!         Ok(Weather { api_key: api_key.to_owned() })
//!     }
//! }
//!
//! // 3. Register instances against a context.
//! let ctx = AppContext::new();
//! register::<WeatherRegistration>(&ctx, RegistrationConfig::named("key-eu", "eu")).unwrap();
//! register::<WeatherRegistration>(&ctx, RegistrationConfig::named("key-us", "us")).unwrap();
//!
//! let ns = namespace::<WeatherRegistration>(&ctx).unwrap();
//! assert_eq!(ns.named("eu").unwrap().forecast(), "sunny");
//! assert!(ns.named("ap").is_none());
//! ```
//!
//! ## Scopes
//!
//! [`AppContext::child`] creates a nested scope that inherits its
//! ancestors' decorations by reference: a child may add a *different* name
//! to an inherited namespace (shared mutation, visible tree-wide), while
//! redeclaring an ancestor's default or name fails exactly as it would in
//! the ancestor's own scope. Sibling branches share nothing and may each
//! register their own default.
//!
//! ## Completion & Startup
//!
//! Hosts that queue registrations before a ready barrier drive
//! [`register_with_completion`], which reports through a one-shot channel
//! exactly once, success or failure alike; [`Startup`] drains those
//! channels and fails on the first error. The [`Plugin`] trait wraps the
//! same convention behind an object-safe interface for heterogeneous
//! queues.
//!
//! ## Concurrency
//!
//! Registration calls may be issued concurrently. Each call holds its
//! context tree's registration lock across the whole validate-then-mutate
//! sequence, with no await point inside, so the existence checks and the
//! insertion always observe a consistent snapshot. A failed call performs
//! no mutation at all.
//!
//! ## Testing
//!
//! The [`mock`] module ships a `MockFactory` whose client records its
//! construction inputs and whose failures are injected through its
//! options, so protocol behavior can be tested without a real SDK.

pub mod config;
pub mod context;
pub mod error;
pub mod factory;
pub mod mock;
pub mod namespace;
pub mod plugin;
pub mod registrar;
pub mod startup;
pub mod tracing;

// Re-export core types for convenience
pub use config::RegistrationConfig;
pub use context::{AppContext, Decoration};
pub use error::{BoxError, DecorateError, RegistrationError, StartupError};
pub use factory::ClientFactory;
pub use namespace::Namespace;
pub use plugin::{InstancePlugin, Plugin};
pub use registrar::{namespace, register, register_with_completion, Completion};
pub use startup::Startup;
