//! Gesture replay entry point
//!
//! Usage: `hm-replay [SCRIPT.ron] [CONFIG.ron]`. Without a script the
//! built-in demo gesture is replayed. A config file overrides the script's
//! manipulation settings.

use std::process::ExitCode;

use hm_core::ManipulationConfig;
use hm_replay::{ReplayError, ReplayScript, Replayer};

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "hm_core=debug,hm_replay=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut args = std::env::args().skip(1);
    let script = match load_script(args.next(), args.next()) {
        Ok(script) => script,
        Err(e) => {
            tracing::error!("Failed to load replay: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = Replayer::run(&script);
    match report.final_transform() {
        Some(t) => tracing::info!(
            "'{}' finished: position={:?} rotation={:?} scale={:?}",
            report.name,
            t.position,
            t.rotation,
            t.scale
        ),
        None => tracing::info!("'{}' has no frames", report.name),
    }
    tracing::info!(
        "Focus acquired {} time(s), released {} time(s)",
        report.focus.acquired,
        report.focus.released
    );

    ExitCode::SUCCESS
}

fn load_script(
    script_path: Option<String>,
    config_path: Option<String>,
) -> Result<ReplayScript, ReplayError> {
    let mut script = match script_path {
        Some(path) => {
            tracing::info!("Loading script {}", path);
            ReplayScript::load(&path)?
        }
        None => ReplayScript::demo(),
    };
    if let Some(path) = config_path {
        tracing::info!("Overriding config from {}", path);
        script.config = ManipulationConfig::load(&path)?;
    }
    Ok(script)
}
