// Common test utilities

#![allow(dead_code)]

pub mod backend;
pub mod fixtures;

pub use backend::*;
pub use fixtures::*;

/// Route `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
