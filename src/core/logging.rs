//! Tracing subscriber setup
//!
//! Logs always go to stderr so stdout stays machine-readable.

use tracing_subscriber::EnvFilter;

/// Map `-v`/`-q` to a default filter directive
fn default_directive(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize the global subscriber.
///
/// Explicit `-v`/`-q` flags win over `RUST_LOG`; without them `RUST_LOG` is honored
/// and falls back to `warn`.
pub fn init_tracing(verbose: u8, quiet: bool) {
    let directive = default_directive(verbose, quiet);
    let filter = if verbose > 0 || quiet {
        EnvFilter::new(directive)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive))
    };

    // A second init (e.g. from tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}
