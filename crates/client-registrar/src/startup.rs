//! # Startup Barrier
//!
//! Hosts queue independent registrations before their ready barrier
//! resolves. [`Startup`] is that barrier: it hands out the sender half of
//! each completion channel and, at [`ready`](Startup::ready), drains the
//! receiver halves in registration order, failing on the first reported
//! error, so one bad registration fails the whole startup sequence, the
//! way the surrounding application expects.

use tokio::sync::oneshot;
use tracing::{debug, info};

use crate::error::{RegistrationError, StartupError};
use crate::registrar::Completion;

/// Collects completion channels for registrations issued before startup.
#[derive(Default)]
pub struct Startup {
    pending: Vec<oneshot::Receiver<Result<(), RegistrationError>>>,
}

impl Startup {
    /// Creates an empty barrier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a completion channel, keeping the receiver half for
    /// [`ready`](Self::ready). Hand the returned sender to
    /// [`register_with_completion`](crate::register_with_completion).
    pub fn completion(&mut self) -> Completion {
        let (sender, receiver) = oneshot::channel();
        self.pending.push(receiver);
        sender
    }

    /// Number of registrations still awaited.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Resolves once every registration has reported.
    ///
    /// Returns the first failure in registration order; a completion
    /// sender dropped without firing surfaces as
    /// [`StartupError::CompletionDropped`].
    pub async fn ready(self) -> Result<(), StartupError> {
        let total = self.pending.len();
        debug!(total, "Awaiting registrations");
        for receiver in self.pending {
            match receiver.await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => return Err(StartupError::Registration(e)),
                Err(_) => return Err(StartupError::CompletionDropped),
            }
        }
        info!(total, "All registrations resolved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RegistrationConfig;
    use crate::context::AppContext;
    use crate::mock::{MockFactory, MockOptions};
    use crate::registrar::register_with_completion;

    #[tokio::test]
    async fn ready_resolves_when_all_registrations_succeed() {
        let ctx = AppContext::new();
        let mut startup = Startup::new();

        let done = startup.completion();
        register_with_completion::<MockFactory>(&ctx, RegistrationConfig::named("sk_1", "eu"), done);
        let done = startup.completion();
        register_with_completion::<MockFactory>(&ctx, RegistrationConfig::named("sk_2", "us"), done);

        assert_eq!(startup.pending(), 2);
        startup.ready().await.expect("startup should succeed");
    }

    #[tokio::test]
    async fn ready_reports_the_first_failure_in_order() {
        let ctx = AppContext::new();
        let mut startup = Startup::new();

        let done = startup.completion();
        register_with_completion::<MockFactory>(&ctx, RegistrationConfig::new("sk_1"), done);
        // Duplicate default: fails.
        let done = startup.completion();
        register_with_completion::<MockFactory>(&ctx, RegistrationConfig::new("sk_2"), done);

        let err = startup.ready().await.unwrap_err();
        match err {
            StartupError::Registration(RegistrationError::DuplicateDefault { namespace }) => {
                assert_eq!(namespace, "mock");
            }
            other => panic!("expected DuplicateDefault, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn dropped_completion_sender_fails_startup() {
        let mut startup = Startup::new();
        let sender = startup.completion();
        drop(sender);

        let err = startup.ready().await.unwrap_err();
        assert!(matches!(err, StartupError::CompletionDropped));
    }

    #[tokio::test]
    async fn factory_failure_fails_startup() {
        let ctx = AppContext::new();
        let mut startup = Startup::new();

        let config = RegistrationConfig::new("sk_1").with_options(MockOptions {
            fail_with: Some("nope".to_string()),
            ..MockOptions::default()
        });
        let done = startup.completion();
        register_with_completion::<MockFactory>(&ctx, config, done);

        let err = startup.ready().await.unwrap_err();
        assert!(matches!(
            err,
            StartupError::Registration(RegistrationError::Client { .. })
        ));
    }
}
