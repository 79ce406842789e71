// LogPane - util/logging.rs
//
// Structured logging with runtime-selectable debug mode.
//
// Activation:
//   - Environment variable: RUST_LOG=debug (or trace)
//   - CLI flag: --debug (sets the filter to debug)
//   - Config file: [logging] level = "debug"
//
// Output: stderr, plus an optional extra layer supplied by the caller (the
// demo host passes the console capture layer so its own logs show up in the
// on-screen console).
//
// The env filter is attached to the stderr formatter only. The extra layer
// sees every event and applies its own level cap.

use tracing::Subscriber;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// Extra layer installed next to the stderr formatter.
pub type ExtraLayer = Box<dyn Layer<Registry> + Send + Sync + 'static>;

/// Build the env filter.
///
/// Priority: RUST_LOG env var > CLI --debug flag > config level > default "info".
pub fn build_filter(debug_flag: bool, config_level: Option<&str>) -> EnvFilter {
    if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if debug_flag {
        EnvFilter::new("debug")
    } else if let Some(level) = config_level {
        EnvFilter::new(level)
    } else {
        EnvFilter::new(super::constants::DEFAULT_LOG_LEVEL)
    }
}

/// Assemble the subscriber that `init` installs globally.
pub fn build_subscriber(
    debug_flag: bool,
    config_level: Option<&str>,
    extra: Option<ExtraLayer>,
) -> impl Subscriber + Send + Sync + 'static {
    let filter = build_filter(debug_flag, config_level);

    tracing_subscriber::registry().with(extra).with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
            .compact()
            .with_filter(filter),
    )
}

/// Initialise the logging subsystem.
///
/// `debug_flag` is true when the user passed --debug on the CLI.
/// `config_level` is the level from config.toml (if present).
/// `extra` is an optional additional layer, e.g. the console capture layer.
///
/// Calling this twice is harmless: the second global subscriber is rejected
/// and a warning is emitted through the first.
pub fn init(debug_flag: bool, config_level: Option<&str>, extra: Option<ExtraLayer>) {
    let result = build_subscriber(debug_flag, config_level, extra).try_init();

    if let Err(e) = result {
        tracing::warn!(error = %e, "Logging already initialised");
        return;
    }

    tracing::debug!(
        app = super::constants::APP_NAME,
        version = super::constants::APP_VERSION,
        "Logging initialised"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::Event;
    use tracing_subscriber::filter::LevelFilter;
    use tracing_subscriber::layer::Context;

    struct CountEvents(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for CountEvents {
        fn on_event(&self, _event: &Event<'_>, _ctx: Context<'_, S>) {
            self.0.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_env_filter_does_not_gate_extra_layer() {
        let seen = Arc::new(AtomicUsize::new(0));
        let subscriber = build_subscriber(
            false,
            Some("error"),
            Some(CountEvents(Arc::clone(&seen)).boxed()),
        );

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(target: "host", "below the stderr level");
            tracing::trace!(target: "host", "also below");
        });

        assert_eq!(seen.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_debug_flag_beats_config_level() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter(true, Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_config_level_used_without_flag() {
        if std::env::var("RUST_LOG").is_ok() {
            return;
        }
        let filter = build_filter(false, Some("warn"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
