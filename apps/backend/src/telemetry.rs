use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global JSON subscriber for the lobby process.
///
/// `RUST_LOG` overrides the default filter; the default keeps engine
/// and request logs at info while silencing per-query chatter from the
/// database stack.
pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,backend=info,sqlx=warn,sea_orm=warn"));

    let fmt_layer = fmt::layer()
        .json()
        .with_current_span(false)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();
}
