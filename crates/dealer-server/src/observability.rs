//! Log output for the server.
//!
//! The subscriber is installed before the config is read, at `info`, and the
//! filter is swapped for `logging.level` once it is known. `RUST_LOG` pins the
//! filter for the whole run.

use std::sync::OnceLock;
use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

type FilterHandle = reload::Handle<EnvFilter, Registry>;

static FILTER: OnceLock<FilterHandle> = OnceLock::new();

fn env_override() -> Option<EnvFilter> {
    std::env::var_os("RUST_LOG")?;
    EnvFilter::try_from_default_env().ok()
}

pub fn init_tracing() {
    init_tracing_with_level("info");
}

pub fn init_tracing_with_level(level: &str) {
    let filter = env_override().unwrap_or_else(|| EnvFilter::new(level));
    let (filter_layer, handle) = reload::Layer::new(filter);
    let _ = FILTER.set(handle);

    let _ = tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer())
        .try_init();
}

/// Switch to `level` unless `RUST_LOG` is set.
pub fn apply_logging_level(level: &str) {
    if env_override().is_some() {
        return;
    }
    let Some(handle) = FILTER.get() else {
        return;
    };
    if let Err(e) = handle.reload(EnvFilter::new(level)) {
        tracing::warn!(error = %e, level, "could not apply logging.level");
    }
}
