//! # Analytics Integration
//!
//! An in-process product-analytics client and its instantiation of the
//! registration protocol. Unlike the payments client
//! it carries real state (an event queue), so the demo and the tests can
//! observe distinct named instances behaving independently.

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use client_registrar::{namespace, AppContext, BoxError, ClientFactory, Namespace};

/// Passthrough options forwarded verbatim to the analytics client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsOptions {
    /// Ingestion host events are flushed to.
    pub host: String,
    /// Queue size that triggers an automatic flush. Must be non-zero.
    pub flush_at: usize,
    /// Flush interval in milliseconds.
    pub flush_interval_ms: u64,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            host: "events.analytics.example".to_string(),
            flush_at: 20,
            flush_interval_ms: 10_000,
        }
    }
}

/// Configuration errors raised by [`AnalyticsClient::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalyticsError {
    /// The ingestion host may not be empty.
    #[error("an ingestion host must be provided")]
    EmptyHost,

    /// A zero batch size would never flush.
    #[error("flush_at must be greater than zero")]
    ZeroBatchSize,
}

/// One queued analytics event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Event name (`$identify` and `$create_alias` are emitted by the
    /// dedicated methods).
    pub name: String,
    /// The subject of the event.
    pub distinct_id: String,
}

/// Handle to the analytics API, queueing events until flushed.
#[derive(Debug)]
pub struct AnalyticsClient {
    api_key: String,
    options: AnalyticsOptions,
    queue: Mutex<Vec<Event>>,
}

impl AnalyticsClient {
    /// Validates the options and builds a client with an empty queue.
    pub fn new(
        api_key: impl Into<String>,
        options: AnalyticsOptions,
    ) -> Result<Self, AnalyticsError> {
        if options.host.is_empty() {
            return Err(AnalyticsError::EmptyHost);
        }
        if options.flush_at == 0 {
            return Err(AnalyticsError::ZeroBatchSize);
        }
        Ok(Self {
            api_key: api_key.into(),
            options,
            queue: Mutex::new(Vec::new()),
        })
    }

    /// The credential the client authenticates with.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// The options the client was built with.
    pub fn config(&self) -> &AnalyticsOptions {
        &self.options
    }

    /// Queues a custom event.
    pub fn capture(&self, distinct_id: impl Into<String>, name: impl Into<String>) {
        self.push(Event {
            name: name.into(),
            distinct_id: distinct_id.into(),
        });
    }

    /// Queues an identify event for `distinct_id`.
    pub fn identify(&self, distinct_id: impl Into<String>) {
        self.capture(distinct_id, "$identify");
    }

    /// Queues an alias event linking `distinct_id` to `alias`.
    pub fn alias(&self, distinct_id: impl Into<String>, alias: impl Into<String>) {
        let distinct_id = distinct_id.into();
        self.push(Event {
            name: format!("$create_alias:{}", alias.into()),
            distinct_id,
        });
    }

    /// Number of queued events awaiting a flush.
    pub fn pending(&self) -> usize {
        self.lock_queue().len()
    }

    /// Drains the queue, returning the events that would be shipped to
    /// the ingestion host.
    pub fn flush(&self) -> Vec<Event> {
        std::mem::take(&mut *self.lock_queue())
    }

    fn push(&self, event: Event) {
        self.lock_queue().push(event);
    }

    fn lock_queue(&self) -> std::sync::MutexGuard<'_, Vec<Event>> {
        self.queue.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Instantiation of the registration protocol for [`AnalyticsClient`].
pub struct AnalyticsRegistration;

impl ClientFactory for AnalyticsRegistration {
    const NAMESPACE: &'static str = "analytics";
    // Every public member of AnalyticsClient.
    const RESERVED_NAMES: &'static [&'static str] =
        &["api_key", "config", "capture", "identify", "alias", "pending", "flush"];
    type Options = AnalyticsOptions;
    type Client = AnalyticsClient;

    fn build(api_key: &str, options: AnalyticsOptions) -> Result<AnalyticsClient, BoxError> {
        AnalyticsClient::new(api_key, options).map_err(Into::into)
    }
}

/// Typed accessor for the analytics namespace on a context.
pub trait AnalyticsExt {
    /// The analytics namespace attached to this scope chain, if any.
    fn analytics(&self) -> Option<Arc<Namespace<AnalyticsClient>>>;
}

impl AnalyticsExt for AppContext {
    fn analytics(&self) -> Option<Arc<Namespace<AnalyticsClient>>> {
        namespace::<AnalyticsRegistration>(self)
    }
}
