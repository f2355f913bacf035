mod app_state;
mod backend;
mod cli;

use mosaic_config::schema::LogLevel;
use tracing_subscriber::EnvFilter;
use winit::event_loop::EventLoop;

fn install_panic_hook() {
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        tracing::error!(panic = %info, "Mosaic crashed");

        eprintln!("\n--- Mosaic crashed ---");
        if let Ok(dir) = mosaic_platform::data_dir() {
            eprintln!("Session state is kept under: {}", dir.display());
        }
        eprintln!("----------------------\n");

        default_hook(info);
    }));
}

/// Filter directive for the subscriber. `--log-level` wins over
/// `RUST_LOG`, which wins over the config file.
fn log_directive(cli: Option<&str>, rust_log: Option<String>, level: LogLevel) -> String {
    if let Some(cli) = cli.filter(|s| !s.trim().is_empty()) {
        return cli.to_string();
    }
    if let Some(env) = rust_log.filter(|s| !s.trim().is_empty()) {
        return env;
    }
    format!("mosaic={}", level.as_directive())
}

fn main() {
    install_panic_hook();

    let args = cli::parse();

    // Config is read before logging starts so its level applies; the
    // outcome is reported once the subscriber is up.
    let config_result = mosaic_config::load_config(args.config.as_deref());
    let level = config_result
        .as_ref()
        .map(|c| c.logging.level)
        .unwrap_or_default();

    let directive = log_directive(
        args.log_level.as_deref(),
        std::env::var("RUST_LOG").ok(),
        level,
    );
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_new(&directive).unwrap_or_else(|_| EnvFilter::new("mosaic=info")),
        )
        .init();

    tracing::info!("Mosaic v{} starting...", env!("CARGO_PKG_VERSION"));

    if let Some(ref path) = args.config {
        tracing::info!(path = %path.display(), "Using config override");
    }
    let config = config_result.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        mosaic_config::MosaicConfig::default()
    });

    if let Err(e) = mosaic_platform::ensure_dirs() {
        tracing::warn!("Failed to create directories: {e}");
    }

    let state_path = match args.state_file.clone() {
        Some(path) => Some(path),
        None => match mosaic_config::state::default_state_path() {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("No state file location, session will not be saved: {e}");
                None
            }
        },
    };

    let snapshot = match (&state_path, args.fresh) {
        (Some(path), false) => mosaic_config::state::load_snapshot(path),
        (_, true) => {
            tracing::info!("Starting fresh, saved session ignored");
            None
        }
        (None, false) => None,
    };
    if snapshot.is_some() {
        tracing::info!("Restoring saved session");
    }

    let shell = app_state::MosaicApp::build_shell(config, state_path, args.chrome_dir.as_deref());
    let mut app = app_state::MosaicApp::new(shell, snapshot);

    let event_loop = EventLoop::new().expect("failed to create event loop");

    tracing::info!("Entering event loop");
    if let Err(e) = event_loop.run_app(&mut app) {
        tracing::error!("Event loop error: {e}");
    }
    tracing::info!("Shutdown complete");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_level_is_the_default() {
        assert_eq!(log_directive(None, None, LogLevel::Debug), "mosaic=debug");
        assert_eq!(log_directive(None, None, LogLevel::Warning), "mosaic=warn");
    }

    #[test]
    fn rust_log_overrides_config() {
        assert_eq!(
            log_directive(None, Some("mosaic_shell=trace".into()), LogLevel::Info),
            "mosaic_shell=trace"
        );
    }

    #[test]
    fn cli_overrides_everything() {
        assert_eq!(
            log_directive(Some("debug"), Some("warn".into()), LogLevel::Error),
            "debug"
        );
    }

    #[test]
    fn blank_values_are_ignored() {
        assert_eq!(
            log_directive(Some(" "), Some(String::new()), LogLevel::Info),
            "mosaic=info"
        );
    }
}
