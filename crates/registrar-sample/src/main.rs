//! # Registrar Sample
//!
//! Demonstrates the instance-registration protocol end to end:
//!
//! 1. Queue a default payments registration and two named analytics
//!    registrations (`eu`, `us`) on one [`App`].
//! 2. Await the ready barrier.
//! 3. Use the attached handles the way request handlers would.

use client_registrar::tracing::setup_tracing;
use client_registrar::{InstancePlugin, RegistrationConfig};
use registrar_sample::clients::{
    AnalyticsExt, AnalyticsOptions, AnalyticsRegistration, PaymentsExt, PaymentsOptions,
    PaymentsRegistration,
};
use registrar_sample::lifecycle::App;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Setup tracing once for the entire application
    setup_tracing();

    info!("Starting sample application");

    let mut app = App::new();

    // Default mode: the payments handle becomes the namespace itself.
    let payments_config = RegistrationConfig::new("sk_test_sample").with_options(PaymentsOptions {
        api_version: Some("2024-04-10".to_string()),
        max_network_retries: 3,
        timeout_ms: 20_000,
        ..PaymentsOptions::default()
    });
    app.register(InstancePlugin::<PaymentsRegistration>::new(payments_config));

    // Named mode: two analytics instances under one namespace.
    let eu_config = RegistrationConfig::named("ph_eu_sample", "eu").with_options(AnalyticsOptions {
        host: "eu.events.analytics.example".to_string(),
        ..AnalyticsOptions::default()
    });
    app.register(InstancePlugin::<AnalyticsRegistration>::new(eu_config));
    app.register(InstancePlugin::<AnalyticsRegistration>::new(
        RegistrationConfig::named("ph_us_sample", "us"),
    ));

    let ctx = app.ready().await?;

    let payments = ctx
        .payments()
        .and_then(|ns| ns.default_client())
        .ok_or("payments namespace missing")?;
    info!(
        url = %payments.balance().url(),
        retries = payments.config().max_network_retries,
        "Payments client attached"
    );

    let analytics = ctx.analytics().ok_or("analytics namespace missing")?;
    let eu = analytics.named("eu").ok_or("eu instance missing")?;
    let us = analytics.named("us").ok_or("us instance missing")?;

    eu.capture("user-1", "checkout_started");
    eu.identify("user-1");
    us.capture("user-2", "checkout_started");

    info!(
        eu_pending = eu.pending(),
        us_pending = us.pending(),
        "Events queued per instance"
    );

    let shipped = eu.flush();
    info!(count = shipped.len(), host = %eu.config().host, "Flushed EU events");

    Ok(())
}
