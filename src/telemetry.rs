//! Structured logging setup.
//!
//! The crate itself only emits `tracing` events. Binaries and tests that want
//! to see them call [`init_tracing`] once; `RUST_LOG` picks the level, e.g.
//! `RUST_LOG=u_race=debug` for search statistics.

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber filtered by `RUST_LOG`.
///
/// Returns `false` when a global subscriber was already in place, in which
/// case nothing changes.
pub fn init_tracing() -> bool {
    if tracing::dispatcher::has_been_set() {
        return false;
    }
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
        .is_ok()
}
