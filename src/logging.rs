use tracing_subscriber::{fmt, EnvFilter};

/// Install the global fmt subscriber; `RUST_LOG` overrides the default filter.
/// Binaries call this once; the library itself never installs a subscriber.
pub fn init() {
    let env = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,rosterscraper=info"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}

/// Route logs through the test harness; safe to call from every test.
pub fn init_test_logging() {
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,rosterscraper=debug")),
        )
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}
