use tracing_subscriber::EnvFilter;

/// Level used when `RUST_LOG` is unset. Kept quiet so log lines do not land
/// in the middle of a chat transcript.
pub const DEFAULT_FILTER: &str = "warn";

/// Installs the stderr subscriber. `verbose` forces `debug` for this crate.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("poop_lib=debug,poop=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    };
    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
