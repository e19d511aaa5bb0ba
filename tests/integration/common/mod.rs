#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::EnvFilter;

/// Installs a stderr subscriber once per test binary. `RUST_LOG` overrides
/// the default filter.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("slotgraph=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_ansi(false)
            .try_init();
    });
}
