//! Shared fixtures for monobuild's integration tests: config and target
//! builders, fake collaborators, and tracing/timeout helpers.

pub mod builders;
pub mod fake_executor;
pub mod fakes;

use std::future::Future;
use std::sync::Once;
use std::time::Duration;

use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Upper bound for any single test future; real-process tests included.
pub const TEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Install a test-captured tracing subscriber once per test binary.
///
/// Honours the same `MB_LOG` variable as the binary, e.g.
/// `MB_LOG=monobuild=debug cargo test -- --nocapture`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = std::env::var("MB_LOG")
            .ok()
            .and_then(|s| EnvFilter::try_new(s).ok())
            .unwrap_or_else(|| EnvFilter::new("warn"));

        let _ = fmt().with_env_filter(filter).with_test_writer().try_init();
    });
}

/// Await `f`, failing the test if it takes longer than [`TEST_TIMEOUT`].
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: Future<Output = T>,
{
    match tokio::time::timeout(TEST_TIMEOUT, f).await {
        Ok(v) => v,
        Err(_) => panic!("test timed out after {TEST_TIMEOUT:?}"),
    }
}
