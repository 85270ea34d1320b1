use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Level used when neither `RUST_LOG` nor `--log-level` is given. Results go to
/// stdout, so anything chattier than warnings stays off by default.
const DEFAULT_DIRECTIVE: &str = "warn";

/// An explicit `--log-level` wins over `RUST_LOG`.
fn build_filter(log_level: Option<&str>) -> EnvFilter {
    match log_level {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE)),
    }
}

/// Install the global subscriber. Logs always go to stderr.
pub fn init(log_level: Option<&str>, json: bool) {
    let subscriber = tracing_subscriber::registry().with(build_filter(log_level));

    if json {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        let _ = subscriber.with(fmt_layer).try_init();
    }
}
