use tracing_subscriber::{fmt, EnvFilter};

/// Install the global tracing subscriber, writing to stderr.
///
/// `RUST_LOG` is honoured unless `verbose` is set, which forces debug output
/// for this crate. Calling it twice is a no-op.
pub fn init(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("impensa=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("impensa=warn"))
    };

    let _ = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
