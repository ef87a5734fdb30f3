use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "COURSEHUB_LOG";

/// Install the global subscriber. `COURSEHUB_LOG` takes `EnvFilter` directives.
pub fn init_tracing() {
    let directives = std::env::var(LOG_ENV).unwrap_or_else(|_| "info".to_string());
    let filter = EnvFilter::try_new(&directives).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}
