use std::io;
use tracing_subscriber::{fmt, EnvFilter};

const DEFAULT_FILTER: &str = "info,tower_http=info,axum=info";
const JSON_FILTER: &str = "info,service::devices=debug";

/// Human-readable logs for local runs (`logging.format = "compact"`).
///
/// `RUST_LOG` wins when set; otherwise request spans from the trace layer
/// and device create/delete events are shown at INFO.
pub fn init_logging_default() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .with_writer(io::stdout)
        .try_init();
}

/// One JSON object per event on stdout (`logging.format = "json"`).
///
/// Without `RUST_LOG` the device service also logs rejected creates at
/// DEBUG, and each line carries its target so log pipelines can split
/// store events from HTTP access lines.
pub fn init_logging_json() {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(JSON_FILTER));
    let _ = fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .json()
        .with_writer(io::stdout)
        .try_init();
}
