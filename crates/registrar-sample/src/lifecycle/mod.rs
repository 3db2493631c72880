//! # Application Lifecycle
//!
//! The host-side wiring: an [`App`] collects plugins, runs them against a
//! fresh root context in registration order, and resolves its ready
//! barrier once every registration has reported, failing startup on the
//! first error, whatever step produced it.

use client_registrar::{AppContext, Plugin, Startup, StartupError};
use tracing::{debug, info};

/// Minimal application harness in the queue-then-ready convention.
///
/// # Example
///
/// ```rust
/// use client_registrar::{InstancePlugin, RegistrationConfig};
/// use registrar_sample::clients::{PaymentsExt, PaymentsRegistration};
/// use registrar_sample::lifecycle::App;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let mut app = App::new();
/// app.register(InstancePlugin::<PaymentsRegistration>::new(
///     RegistrationConfig::new("sk_test"),
/// ));
///
/// let ctx = app.ready().await.expect("startup failed");
/// assert!(ctx.payments().is_some());
/// # }
/// ```
pub struct App {
    context: AppContext,
    plugins: Vec<Box<dyn Plugin>>,
}

impl App {
    /// Creates an app with a fresh root context and no plugins.
    pub fn new() -> Self {
        Self {
            context: AppContext::new(),
            plugins: Vec::new(),
        }
    }

    /// The app's root context.
    pub fn context(&self) -> &AppContext {
        &self.context
    }

    /// Queues a plugin. Nothing runs until [`ready`](Self::ready).
    pub fn register(&mut self, plugin: impl Plugin + 'static) -> &mut Self {
        self.plugins.push(Box::new(plugin));
        self
    }

    /// Runs every queued plugin in order and awaits the startup barrier.
    ///
    /// On success the root context, now carrying all decorations, is
    /// handed back for use by request handlers.
    pub async fn ready(self) -> Result<AppContext, StartupError> {
        let mut startup = Startup::new();
        for plugin in &self.plugins {
            debug!(plugin = plugin.name(), "Registering plugin");
            let completion = startup.completion();
            plugin.register(&self.context, completion).await;
        }
        startup.ready().await?;
        info!(plugins = self.plugins.len(), "Application ready");
        Ok(self.context)
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
