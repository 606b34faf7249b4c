mod args;
mod commands;
mod dispatch;


pub use commands::build_cli;
pub use dispatch::{BuildersParams, ResolveParams, WalkParams};

use tracing::Level;

/// Maps `-v` occurrences to the most detailed level printed.
pub fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install the stderr subscriber. Stdout stays reserved for results.
pub fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(log_level(verbose))
        .with_target(false)
        .init();
}
