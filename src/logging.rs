use tracing_subscriber::{filter::ParseError, fmt, EnvFilter};

const FALLBACK_FILTER: &str = "warn";

/// Installs the global subscriber. Filter precedence: `level`, then `RUST_LOG`,
/// then `warn`. Output goes to stderr so `--json` stdout stays parseable.
pub fn init(level: Option<&str>) {
    let (filter, rejected) = match level {
        Some(l) => match parse_filter(l) {
            Ok(f) => (f, None),
            Err(e) => (EnvFilter::new(FALLBACK_FILTER), Some((l, e))),
        },
        None => (
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER)),
            None,
        ),
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    if let Some((l, e)) = rejected {
        tracing::warn!(filter = l, error = %e, "invalid log filter, falling back to {}", FALLBACK_FILTER);
    }
}

fn parse_filter(level: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(level)
}
