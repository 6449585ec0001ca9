//! Logging setup.
//!
//! The crate itself only uses the `log` facade; embedding programs
//! initialize a backend once at startup, typically through one of the
//! helpers below.

use env_logger::Env;

/// Initializes the logger with the `env_logger` crate, reading
/// `RUST_LOG` from the environment.
pub fn init_logger() {
    env_logger::init();
}

/// Initializes `env_logger` with a default filter used when `RUST_LOG`
/// is unset, e.g. `"knx_values=debug"`.
pub fn init_logger_with_filter(filter: &str) {
    env_logger::Builder::from_env(Env::default().default_filter_or(filter)).init();
}
