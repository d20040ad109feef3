use std::sync::Once;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Installs the global `fmt` subscriber writing to stderr.
///
/// Directives come from `RUST_LOG` when set, `info` otherwise; `verbose`
/// raises the default to `debug` either way. Calling this more than once, or
/// after another subscriber was installed, is a no-op.
pub fn init_logging(verbose: bool) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    INIT.call_once(|| {
        let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = build_filter(directives.as_deref(), verbose);

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
    });
}

fn build_filter(directives: Option<&str>, verbose: bool) -> EnvFilter {
    let filter = directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    if verbose {
        filter.add_directive(LevelFilter::DEBUG.into())
    } else {
        filter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_is_idempotent() {
        init_logging(false);
        init_logging(true);
        tracing::info!("logging initialised");
        assert!(tracing::dispatcher::has_been_set());
    }

    #[test]
    fn test_build_filter_defaults() {
        assert_eq!(build_filter(None, false).max_level_hint(), Some(LevelFilter::INFO));
        assert_eq!(build_filter(None, true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_verbose_overrides_env_directives() {
        assert_eq!(build_filter(Some("warn"), false).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(build_filter(Some("warn"), true).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_unparsable_env_directives_fall_back() {
        assert_eq!(
            build_filter(Some("!!!"), false).max_level_hint(),
            Some(LevelFilter::INFO)
        );
    }
}
