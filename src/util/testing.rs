//! Tracing setup for tests

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{fmt::format::FmtSpan, prelude::*, EnvFilter};

static TRACING: Once = Once::new();

/// Route `wmsloc` spans and events into the test harness output.
///
/// Safe to call from every test; only the first call installs a subscriber.
/// `RUST_LOG` overrides the default `wmsloc=debug` filter.
pub fn init_test_setup() {
    TRACING.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("wmsloc=debug"));
        let layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        if tracing::dispatcher::has_been_set() {
            debug!("subscriber already installed");
        } else if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("tracing setup failed: {e}");
        }
    });
}
