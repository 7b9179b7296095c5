//! Log subscriber setup for binaries.

use tracing_subscriber::fmt::{self, time::uptime};
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{EnvFilter, Registry};

/// Default filter: our crates at debug, everything else at warn.
pub const DEFAULT_FILTER: &str = "warn,sgui=debug,sgui_ui=info,sgui_render=info";

/// Installs a stdout `tracing` subscriber.
///
/// `RUST_LOG` directives are appended to [`DEFAULT_FILTER`], so they override
/// it target by target.
///
/// # Errors
///
/// Fails if a global subscriber is already installed.
pub fn init_logging() -> Result<(), TryInitError> {
    let format = fmt::format().compact().with_timer(uptime()).with_line_number(true);
    let stdout_log = fmt::layer().event_format(format);

    Registry::default()
        .with(EnvFilter::new(filter_directives(
            std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref(),
        )))
        .with(stdout_log)
        .try_init()?;
    tracing::trace!("log subscriber installed");
    Ok(())
}

fn filter_directives(env: Option<&str>) -> String {
    let mut filter = DEFAULT_FILTER.to_owned();
    if let Some(extra) = env.filter(|extra| !extra.trim().is_empty()) {
        filter.push(',');
        filter.push_str(extra);
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_directives_are_appended() {
        assert_eq!(filter_directives(None), DEFAULT_FILTER);
        assert_eq!(filter_directives(Some("  ")), DEFAULT_FILTER);
        assert_eq!(
            filter_directives(Some("sgui_ui=trace")),
            format!("{DEFAULT_FILTER},sgui_ui=trace")
        );
    }
}
