use std::backtrace::Backtrace;

use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LoggingConfig;

/// `RUST_LOG` wins over the configured filter when present.
pub fn init_tracing(cfg: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.rust_log));
    if fmt().with_env_filter(filter).with_target(false).try_init().is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    install_panic_hook();
}

fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let message = payload
            .downcast_ref::<&str>()
            .copied()
            .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
            .unwrap_or("unknown panic");
        let location = info
            .location()
            .map(|location| location.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());

        tracing::error!(
            panic = %message,
            location = %location,
            backtrace = %Backtrace::capture(),
            "handler panicked"
        );
    }));
}
