use tracing::dispatcher::{Dispatch, set_global_default};
use tracing_subscriber::FmtSubscriber;

/// Installs the global `tracing` subscriber.
///
/// `levels` is an env-filter directive such as `info` or `dendrite=debug,warn`. Initializing more
/// than once keeps the first subscriber.
pub fn init(color: bool, json: bool, levels: &str) {
    let dispatch = if json {
        let formatter = FmtSubscriber::builder()
            .with_env_filter(levels)
            .json()
            .flatten_event(true)
            .finish();

        Dispatch::new(formatter)
    } else {
        let formatter = FmtSubscriber::builder()
            .with_ansi(color)
            .with_env_filter(levels)
            .finish();

        Dispatch::new(formatter)
    };

    // Ignore errors, since tests can initialize this multiple times.
    let _ = set_global_default(dispatch);
}
