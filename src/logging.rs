//! Logger setup for the demo binary and tests
//!
//! The library itself only emits through `log`:
//! - `trace`: body/layer registration, entity spawn/despawn
//! - `debug`: state transitions, skipped bodies, damage
//! - `warn`: rejected transitions, missing components
//!
//! `RUST_LOG` overrides the level picked here.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Default level when `RUST_LOG` is unset
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    let mut builder = Builder::from_env(env);
    // Frame numbers are logged instead of wall-clock time
    builder.format_timestamp(None).format_target(false);

    if builder.try_init().is_err() {
        log::trace!("Logger already installed");
    }
}
