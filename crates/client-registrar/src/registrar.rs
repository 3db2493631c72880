//! # Instance Registrar
//!
//! The generic registration routine. It runs once per registration call:
//! validate the configuration, construct a client through the integration's
//! factory, and attach the handle to the context's namespace, either as
//! the namespace itself (default mode) or under a named entry (named mode).
//!
//! # Architecture Note
//! The whole validate-then-mutate sequence runs under the context tree's
//! registration lock, so an existence check and the insertion it guards
//! always observe a consistent snapshot; two concurrent registrations can
//! never both pass the "does not yet exist" check for the same key. There
//! is no await point between check and write; the factory call and the
//! map mutation are synchronous.
//!
//! A failed call performs no mutation: every check runs strictly before
//! the single mutating step, so the namespace is left exactly as the call
//! found it.

use std::sync::Arc;

use tokio::sync::oneshot;
use tracing::{info, warn};

use crate::config::RegistrationConfig;
use crate::context::AppContext;
use crate::error::RegistrationError;
use crate::factory::ClientFactory;
use crate::namespace::{InsertRejected, Namespace};

/// One-shot channel over which a registration call reports its outcome.
///
/// Fired exactly once, success or failure alike, so the host can fail its
/// startup sequence identically regardless of which step failed.
pub type Completion = oneshot::Sender<Result<(), RegistrationError>>;

/// Registers one client instance on `context`.
///
/// Default mode (`config.name` absent or empty) attaches the constructed
/// handle as the namespace itself; named mode stores it under its name in a
/// lazily created map. The call fails, without mutating anything, when the API
/// key is missing, the factory rejects the options, the name is reserved,
/// or the (inherited) namespace already holds the default or that name.
pub fn register<F: ClientFactory>(
    context: &AppContext,
    config: RegistrationConfig<F::Options>,
) -> Result<(), RegistrationError> {
    let name = config.name.clone();
    let result = try_register::<F>(context, config);
    match &result {
        Ok(()) => info!(
            namespace = F::NAMESPACE,
            name = name.as_deref(),
            "Registered client instance"
        ),
        Err(e) => warn!(
            namespace = F::NAMESPACE,
            name = name.as_deref(),
            error = %e,
            "Registration failed"
        ),
    }
    result
}

/// Like [`register`], but reports the outcome through `completion` instead
/// of returning it. This is the inbound convention a host framework drives.
///
/// The channel fires exactly once. A receiver that has already gone away
/// only costs a warning; the registration itself still took effect (or
/// not) as usual.
pub fn register_with_completion<F: ClientFactory>(
    context: &AppContext,
    config: RegistrationConfig<F::Options>,
    completion: Completion,
) {
    let outcome = register::<F>(context, config);
    if completion.send(outcome).is_err() {
        warn!(
            namespace = F::NAMESPACE,
            "Completion receiver dropped before the outcome was delivered"
        );
    }
}

/// Looks up the namespace an integration has attached to `context` (or to
/// one of its ancestors), if any.
pub fn namespace<F: ClientFactory>(context: &AppContext) -> Option<Arc<Namespace<F::Client>>> {
    context.lookup_as::<Namespace<F::Client>>(F::NAMESPACE)
}

fn try_register<F: ClientFactory>(
    context: &AppContext,
    config: RegistrationConfig<F::Options>,
) -> Result<(), RegistrationError> {
    let RegistrationConfig {
        api_key,
        name,
        options,
    } = config;

    if api_key.is_empty() {
        return Err(RegistrationError::MissingApiKey {
            namespace: F::NAMESPACE,
        });
    }

    // An empty instance name is no name at all.
    let name = name.filter(|n| !n.is_empty());

    // Held across every check and the single mutating step below.
    let _guard = context.registration_guard();

    let client = F::build(&api_key, options).map_err(|source| RegistrationError::Client {
        namespace: F::NAMESPACE,
        source,
    })?;
    let client = Arc::new(client);

    match name {
        Some(name) => {
            if F::RESERVED_NAMES.contains(&name.as_str()) {
                return Err(RegistrationError::ReservedName {
                    namespace: F::NAMESPACE,
                    name,
                });
            }

            let ns = match context.lookup(F::NAMESPACE) {
                Some(existing) => existing
                    .downcast::<Namespace<F::Client>>()
                    // The key is taken by a foreign decoration; treat it
                    // the same as an occupied namespace.
                    .map_err(|_| RegistrationError::DuplicateDefault {
                        namespace: F::NAMESPACE,
                    })?,
                None => {
                    let ns = Arc::new(Namespace::<F::Client>::named_map());
                    let decoration: crate::context::Decoration = ns.clone();
                    context.decorate(F::NAMESPACE, decoration)?;
                    ns
                }
            };

            ns.try_insert(&name, client)
                .map_err(|rejected| match rejected {
                    InsertRejected::AlreadyNamed => RegistrationError::DuplicateName {
                        namespace: F::NAMESPACE,
                        name: name.clone(),
                    },
                    InsertRejected::DefaultOccupied => RegistrationError::DuplicateDefault {
                        namespace: F::NAMESPACE,
                    },
                })
        }
        None => {
            if context.lookup(F::NAMESPACE).is_some() {
                return Err(RegistrationError::DuplicateDefault {
                    namespace: F::NAMESPACE,
                });
            }
            context.decorate(F::NAMESPACE, Arc::new(Namespace::default_instance(client)))?;
            Ok(())
        }
    }
}
