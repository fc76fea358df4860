use tracing_subscriber::EnvFilter;

/// Initializes a tracing Subscriber for logging, filtered by `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Loads the `.env` file of the current directory, if any. Variables already set win.
pub fn load_dotenv() {
    if let Err(err) = dotenvy::dotenv()
        && !err.not_found()
    {
        warn!("failed to load .env: {err}");
    }
}

/// Colors output only when stdout is a terminal that supports it.
pub fn enable_paint() {
    let enable = yansi::Condition::os_support() && yansi::Condition::tty_and_color_live();
    yansi::whenever(yansi::Condition::cached(enable));
}
