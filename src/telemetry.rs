use tracing_subscriber::{fmt, EnvFilter};

use crate::settings::AppEnvironment;

/// Installs the global subscriber. `RUST_LOG` wins over the default `info`
/// filter; production logs are JSON lines.
pub fn init_tracing(env: &AppEnvironment) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let result = match env {
        AppEnvironment::Production => fmt()
            .with_env_filter(filter)
            .json()
            .with_current_span(true)
            .try_init(),
        _ => fmt().with_env_filter(filter).with_target(false).try_init(),
    };

    if let Err(e) = result {
        eprintln!("Tracing subscriber already installed: {}", e);
    }
}
