//! End-to-end registration tests with the real SDK integrations, driven
//! through the same queue-then-ready convention a host application uses.

use std::sync::Arc;

use client_registrar::{
    register, AppContext, InstancePlugin, RegistrationConfig, RegistrationError, StartupError,
};
use registrar_sample::clients::{
    AnalyticsExt, AnalyticsOptions, AnalyticsRegistration, PaymentsError, PaymentsExt,
    PaymentsOptions, PaymentsRegistration,
};
use registrar_sample::lifecycle::App;

fn payments_config() -> RegistrationConfig<PaymentsOptions> {
    RegistrationConfig::new("sk_test_api_key").with_options(PaymentsOptions {
        api_version: Some("2024-04-10".to_string()),
        max_network_retries: 3,
        timeout_ms: 20_000,
        port: 8080,
        ..PaymentsOptions::default()
    })
}

#[tokio::test]
async fn default_registration_exposes_the_client_directly() {
    let mut app = App::new();
    app.register(InstancePlugin::<PaymentsRegistration>::new(payments_config()));
    let ctx = app.ready().await.expect("startup should succeed");

    let ns = ctx.payments().expect("payments namespace should exist");
    let client = ns.default_client().expect("default client should exist");

    // Built-in members are reachable through the handle.
    assert_eq!(client.balance().path(), "balance");
    assert_eq!(client.customers().path(), "customers");

    // Passthrough options reached the client verbatim.
    assert_eq!(client.config().max_network_retries, 3);
    assert_eq!(client.config().timeout_ms, 20_000);
    assert_eq!(client.config().api_version.as_deref(), Some("2024-04-10"));
    assert_eq!(client.config().port, 8080);
}

#[tokio::test]
async fn named_registration_replaces_the_default_surface() {
    let mut config = payments_config();
    config.name = Some("test_instance".to_string());

    let mut app = App::new();
    app.register(InstancePlugin::<PaymentsRegistration>::new(config));
    let ctx = app.ready().await.expect("startup should succeed");

    let ns = ctx.payments().expect("namespace should exist");
    assert!(ns.named("test_instance").is_some());
    // No default instance coexists with named ones.
    assert!(ns.default_client().is_none());
}

#[tokio::test]
async fn two_named_instances_are_independently_reachable() {
    let ctx = AppContext::new();
    register::<AnalyticsRegistration>(
        &ctx,
        RegistrationConfig::named("ph_eu_key", "eu").with_options(AnalyticsOptions {
            host: "eu.events.analytics.example".to_string(),
            ..AnalyticsOptions::default()
        }),
    )
    .expect("eu registration");
    register::<AnalyticsRegistration>(&ctx, RegistrationConfig::named("ph_us_key", "us"))
        .expect("us registration");

    let ns = ctx.analytics().expect("namespace should exist");
    let eu = ns.named("eu").expect("eu instance");
    let us = ns.named("us").expect("us instance");

    assert!(!Arc::ptr_eq(&eu, &us));
    assert_eq!(eu.api_key(), "ph_eu_key");
    assert_eq!(us.api_key(), "ph_us_key");

    // State stays per-instance.
    eu.capture("user-1", "signed_up");
    assert_eq!(eu.pending(), 1);
    assert_eq!(us.pending(), 0);
}

#[tokio::test]
async fn startup_fails_without_an_api_key() {
    let mut app = App::new();
    app.register(InstancePlugin::<PaymentsRegistration>::new(
        RegistrationConfig::new(""),
    ));

    let err = app.ready().await.unwrap_err();
    assert!(matches!(
        err,
        StartupError::Registration(RegistrationError::MissingApiKey { namespace: "payments" })
    ));
}

#[tokio::test]
async fn missing_api_key_leaves_no_namespace_behind() {
    let ctx = AppContext::new();
    let err = register::<PaymentsRegistration>(&ctx, RegistrationConfig::new("")).unwrap_err();
    assert!(matches!(err, RegistrationError::MissingApiKey { .. }));
    assert!(ctx.payments().is_none());
}

#[tokio::test]
async fn reserved_keyword_is_rejected_as_instance_name() {
    let ctx = AppContext::new();

    // 'customers' is a member of the payments client.
    let err = register::<PaymentsRegistration>(
        &ctx,
        RegistrationConfig::named("sk_test_api_key", "customers"),
    )
    .unwrap_err();
    assert!(
        matches!(err, RegistrationError::ReservedName { ref name, .. } if name == "customers")
    );

    // 'capture' is a member of the analytics client.
    let err = register::<AnalyticsRegistration>(
        &ctx,
        RegistrationConfig::named("ph_test_api_key", "capture"),
    )
    .unwrap_err();
    assert!(matches!(err, RegistrationError::ReservedName { ref name, .. } if name == "capture"));

    assert!(ctx.payments().is_none());
    assert!(ctx.analytics().is_none());
}

#[tokio::test]
async fn the_same_named_instance_cannot_register_twice() {
    let ctx = AppContext::new();
    register::<PaymentsRegistration>(
        &ctx,
        RegistrationConfig::named("sk_first_key", "test_instance"),
    )
    .expect("first registration");

    let err = register::<PaymentsRegistration>(
        &ctx,
        RegistrationConfig::named("sk_second_key", "test_instance"),
    )
    .unwrap_err();
    assert!(
        matches!(err, RegistrationError::DuplicateName { ref name, .. } if name == "test_instance")
    );

    // The first instance is intact.
    let ns = ctx.payments().expect("namespace");
    assert_eq!(ns.named("test_instance").unwrap().api_key(), "sk_first_key");
}

#[tokio::test]
async fn a_second_default_registration_fails_and_preserves_the_first() {
    let ctx = AppContext::new();
    register::<PaymentsRegistration>(&ctx, payments_config()).expect("first registration");
    let first = ctx.payments().unwrap().default_client().unwrap();

    let err = register::<PaymentsRegistration>(&ctx, RegistrationConfig::new("sk_other_key"))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistrationError::DuplicateDefault { namespace: "payments" }
    ));

    let still_there = ctx.payments().unwrap().default_client().unwrap();
    assert!(Arc::ptr_eq(&first, &still_there));
    assert_eq!(still_there.api_key(), "sk_test_api_key");
}

#[tokio::test]
async fn default_and_named_modes_exclude_each_other() {
    // Named after default.
    let ctx = AppContext::new();
    register::<PaymentsRegistration>(&ctx, payments_config()).expect("default registration");
    let err =
        register::<PaymentsRegistration>(&ctx, RegistrationConfig::named("sk_eu_key", "eu"))
            .unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateDefault { .. }));

    // Default after named.
    let ctx = AppContext::new();
    register::<PaymentsRegistration>(&ctx, RegistrationConfig::named("sk_eu_key", "eu"))
        .expect("named registration");
    let err = register::<PaymentsRegistration>(&ctx, payments_config()).unwrap_err();
    assert!(matches!(err, RegistrationError::DuplicateDefault { .. }));
}

#[tokio::test]
async fn factory_rejection_is_surfaced_verbatim_through_startup() {
    let mut app = App::new();
    app.register(InstancePlugin::<PaymentsRegistration>::new(
        RegistrationConfig::new("sk_test_api_key").with_options(PaymentsOptions {
            timeout_ms: 0,
            ..PaymentsOptions::default()
        }),
    ));

    let err = app.ready().await.unwrap_err();
    match err {
        StartupError::Registration(RegistrationError::Client { source, .. }) => {
            let inner = source.downcast::<PaymentsError>().expect("payments error");
            assert_eq!(*inner, PaymentsError::InvalidTimeout);
        }
        other => panic!("expected a client construction failure, got {other:?}"),
    }
}

#[tokio::test]
async fn a_flat_payments_config_deserializes_and_registers() {
    // Connection settings sit at the same level as the credential, the way
    // a host's config file lays them out.
    let config: RegistrationConfig<PaymentsOptions> = serde_json::from_str(
        r#"{
            "api_key": "sk_live_key",
            "name": "eu",
            "api_version": "2024-04-10",
            "max_network_retries": 3,
            "timeout_ms": 20000,
            "host": "eu.api.payments.example",
            "port": 8443
        }"#,
    )
    .expect("flat config should deserialize");

    assert_eq!(config.api_key, "sk_live_key");
    assert_eq!(config.name.as_deref(), Some("eu"));
    assert_eq!(config.options.api_version.as_deref(), Some("2024-04-10"));
    assert_eq!(config.options.max_network_retries, 3);
    assert_eq!(config.options.port, 8443);

    let ctx = AppContext::new();
    register::<PaymentsRegistration>(&ctx, config).expect("registration");
    let client = ctx.payments().unwrap().named("eu").expect("eu instance");
    assert_eq!(client.config().host, "eu.api.payments.example");
}

#[tokio::test]
async fn a_flat_analytics_config_fills_omitted_options_with_defaults() {
    let config: RegistrationConfig<AnalyticsOptions> = serde_json::from_str(
        r#"{
            "api_key": "ph_live_key",
            "flush_at": 50
        }"#,
    )
    .expect("flat config should deserialize");

    assert_eq!(config.api_key, "ph_live_key");
    assert!(config.name.is_none());
    assert_eq!(config.options.flush_at, 50);
    assert_eq!(config.options.host, AnalyticsOptions::default().host);

    let ctx = AppContext::new();
    register::<AnalyticsRegistration>(&ctx, config).expect("registration");
    let client = ctx.analytics().unwrap().default_client().expect("default instance");
    assert_eq!(client.config().flush_at, 50);
}

#[tokio::test]
async fn different_integrations_share_one_context_without_colliding() {
    let mut app = App::new();
    app.register(InstancePlugin::<PaymentsRegistration>::new(payments_config()));
    app.register(InstancePlugin::<AnalyticsRegistration>::new(
        RegistrationConfig::named("ph_eu_key", "eu"),
    ));

    let ctx = app.ready().await.expect("startup should succeed");
    assert!(ctx.payments().unwrap().default_client().is_some());
    assert!(ctx.analytics().unwrap().named("eu").is_some());
}
