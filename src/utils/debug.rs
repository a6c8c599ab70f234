//! Debug logging setup.

use tracing_subscriber::EnvFilter;

/// Initialize logging. Events go to stderr so stdout carries only the report.
pub fn init_debug_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("seccomp_probe=debug,warn")
    } else {
        EnvFilter::new("seccomp_probe=info,warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(debug)
        .with_ansi(false)
        .try_init()
        .ok();
}
