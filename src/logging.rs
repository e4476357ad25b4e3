//! Process-wide logger setup.

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Crates whose info-level chatter drowns out the scene's own messages.
const NOISY_CRATES: [&str; 3] = ["wgpu", "naga", "bevy_render"];

/// Initializes the global logger.
///
/// When `verbose` is `true`, debug messages from this crate are printed,
/// including one line per spawned and removed bee. Otherwise only info level
/// and above are shown. `RUST_LOG` replaces the default level.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    for noisy in NOISY_CRATES {
        builder.filter_module(noisy, LevelFilter::Warn);
    }

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
}
