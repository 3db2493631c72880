//! # Plugin Trait
//!
//! The inbound registration-call convention a host framework drives:
//! `(context, completion)` with the configuration captured at plugin
//! construction. Hosts collect boxed plugins, run them against a context,
//! and await the startup barrier.
//!
//! [`InstancePlugin`] is the only implementation most integrations need:
//! it simply forwards to the generic registrar. The trait exists so a host
//! can queue heterogeneous registrations (payments next to analytics)
//! behind one object-safe interface.

use std::marker::PhantomData;

use async_trait::async_trait;

use crate::config::RegistrationConfig;
use crate::context::AppContext;
use crate::factory::ClientFactory;
use crate::registrar::{register_with_completion, Completion};

/// An independently registrable unit, in the host's queue-then-ready
/// convention.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable name used in host logs; integrations use their namespace key.
    fn name(&self) -> &'static str;

    /// Performs the registration against `context`, reporting the outcome
    /// through `completion` exactly once.
    ///
    /// Implementations must not suspend between their namespace existence
    /// check and the corresponding write; [`InstancePlugin`] delegates to
    /// the registrar, which holds the registration lock across both.
    async fn register(&self, context: &AppContext, completion: Completion);
}

/// [`Plugin`] adapter for one [`ClientFactory`] instantiation.
pub struct InstancePlugin<F: ClientFactory> {
    config: RegistrationConfig<F::Options>,
    _factory: PhantomData<fn() -> F>,
}

impl<F: ClientFactory> InstancePlugin<F> {
    /// Captures the configuration this plugin will register with.
    pub fn new(config: RegistrationConfig<F::Options>) -> Self {
        Self {
            config,
            _factory: PhantomData,
        }
    }
}

#[async_trait]
impl<F: ClientFactory> Plugin for InstancePlugin<F> {
    fn name(&self) -> &'static str {
        F::NAMESPACE
    }

    async fn register(&self, context: &AppContext, completion: Completion) {
        register_with_completion::<F>(context, self.config.clone(), completion);
    }
}
