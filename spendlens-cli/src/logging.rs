use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable that overrides the configured level.
pub const LOG_ENV: &str = "SPENDLENS_LOG";

/// Install the global `tracing` subscriber.
///
/// `SPENDLENS_LOG`, then `RUST_LOG`, take precedence over `level`. Output goes
/// to stderr so `--json` output on stdout stays machine readable.
pub fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .or_else(|_| EnvFilter::try_new(normalise_level(level)))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    // A second init (tests) is harmless.
    let _ = tracing_subscriber::registry().with(filter).with(layer).try_init();
}

/// Accept the level names people type in config files.
fn normalise_level(level: &str) -> String {
    match level.trim().to_lowercase().as_str() {
        "warning" => "warn".to_string(),
        "critical" | "fatal" => "error".to_string(),
        "" => "info".to_string(),
        other => other.to_string(),
    }
}
