//! Tracing subscriber setup for binaries embedding the controls.

/// Default filter when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "error,tdbu_ui=info,tdbu_components=info,tdbu_demo=info";

/// Installs a global `fmt` subscriber.
///
/// The filter comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Calling this more than once, or after another subscriber was installed, is
/// a no-op.
pub fn init_tracing() {
    let filter = match tracing_subscriber::EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match tracing_subscriber::EnvFilter::try_new(DEFAULT_FILTER) {
            Ok(filter) => filter,
            Err(_) => tracing_subscriber::EnvFilter::new("error"),
        },
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init();
}
