//! Logging and tracing bootstrap.

use tracing_subscriber::EnvFilter;
use wrp_kernel::settings::{LogFormat, TelemetrySettings};

const DEFAULT_FILTER: &str = "info";

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter. Installing twice is not an
/// error; the second call is ignored so tests and binaries can both call it.
pub fn init(settings: &TelemetrySettings) {
    let filter = filter(settings);
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let installed = match settings.log_format {
        LogFormat::Pretty => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    if installed.is_ok() {
        tracing::debug!(
            target: "wrp-telemetry",
            format = ?settings.log_format,
            "telemetry initialized"
        );
    }
}

fn filter(settings: &TelemetrySettings) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = settings.filter.as_deref().unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|error| {
            eprintln!("invalid telemetry filter '{directive}': {error}; using '{DEFAULT_FILTER}'");
            EnvFilter::new(DEFAULT_FILTER)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_twice_is_harmless() {
        let settings = TelemetrySettings::default();
        init(&settings);
        init(&TelemetrySettings {
            log_format: LogFormat::Json,
            filter: Some("debug".to_string()),
        });
    }
}
