// Start of file: /src/core/logging.rs

use tracing_subscriber::{fmt, EnvFilter};
use tracing_subscriber::fmt::format::FmtSpan;

const DEFAULT_FILTER: &str = "org_stats_app=info,tower_http=debug,axum=trace";

// * Span lifecycle events written alongside regular log lines
const SPAN_EVENTS: FmtSpan = FmtSpan::FULL;

// Initialize the tracing subscriber with default configuration
pub fn init_tracing() {
    let env_filter: EnvFilter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    fmt()
        .with_env_filter(env_filter)
        .with_span_events(SPAN_EVENTS)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spans_log_every_lifecycle_event() {
        for event in [FmtSpan::NEW, FmtSpan::ENTER, FmtSpan::EXIT, FmtSpan::CLOSE] {
            assert_eq!(SPAN_EVENTS.clone() & event.clone(), event);
        }
    }
}

// End of file: /src/core/logging.rs
