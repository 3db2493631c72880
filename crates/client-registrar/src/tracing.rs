/// Initializes the tracing/logging infrastructure for the application.
///
/// Structured logging via the `tracing` crate with environment-based
/// filtering: set `RUST_LOG` to control verbosity
/// (`RUST_LOG=client_registrar=debug` shows every decoration and
/// registration outcome).
///
/// # Example
///
/// ```ignore
/// setup_tracing();
/// tracing::info!("Application started");
/// ```
pub fn setup_tracing() {
    // Initialize the tracing subscriber with environment-based filtering
    // so users control log levels via the RUST_LOG env var.
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}
