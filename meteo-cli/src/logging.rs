use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive string.
pub const LOG_ENV: &str = "METEO_LOG_LEVEL";

/// Directives used when `-v` is given or the environment variable is unset.
pub fn default_directives(verbosity: u8) -> String {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    format!("{level},hyper=warn,hyper_util=warn,reqwest=warn,rustls=warn")
}

fn filter(verbosity: u8) -> EnvFilter {
    if verbosity == 0 {
        if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
            return filter;
        }
    }
    EnvFilter::new(default_directives(verbosity))
}

/// Install the stderr subscriber. Safe to call more than once.
pub fn init(verbosity: u8) {
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter(verbosity))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();

    // A subscriber already exists when init runs twice; it keeps receiving events.
    if let Err(e) = installed {
        tracing::debug!(error = %e, "tracing subscriber already installed");
    }
}
