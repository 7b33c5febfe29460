//! Shared helpers for buildgraph's integration tests.

pub mod actions;
pub mod builders;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use buildgraph::logging::LOG_ENV_VAR;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Upper bound for a single build round in tests.
pub const ROUND_TIMEOUT: Duration = Duration::from_secs(5);

/// Install a test subscriber once per test binary.
///
/// Output is captured by the harness and only shown for failing tests.
/// The filter comes from `BUILDGRAPH_LOG`, defaulting to `warn`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));

        let _ = fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Await `round`, failing the test if it outlives [`ROUND_TIMEOUT`].
pub async fn with_timeout<F, T>(round: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(ROUND_TIMEOUT, round).await {
        Ok(value) => value,
        Err(_) => panic!("build round did not finish within {ROUND_TIMEOUT:?}"),
    }
}

/// Drive `round` to completion on a fresh single-threaded runtime.
///
/// For tests that cannot be `#[tokio::test]`, such as proptest bodies.
pub fn block_on_round<F, T>(round: F) -> T
where
    F: Future<Output = T>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap_or_else(|e| panic!("building test runtime: {e}"));
    runtime.block_on(with_timeout(round))
}
