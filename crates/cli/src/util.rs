use std::{
    fs::read_to_string,
    io::{self, IsTerminal},
    path::Path,
};

use eyre::{Context, Result};
use ls8_vm::arch::MachineConfig;
use serde::de::DeserializeOwned;
use tracing::Level;
use tracing_forest::ForestLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

pub fn read_to_struct_toml<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let toml = read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let ret = toml::from_str(&toml).wrap_err_with(|| format!("parsing {}", path.display()))?;
    Ok(ret)
}

pub fn read_config_toml_or_default(config: Option<&Path>) -> Result<MachineConfig> {
    match config {
        Some(path) => read_to_struct_toml(path),
        None => Ok(MachineConfig::default()),
    }
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over `level`.
///
/// Logs share stdout with program output. On a terminal they are printed as a forest; when
/// stdout is redirected they are plain lines without ANSI escapes.
pub fn setup_tracing_with_log_level(level: Level) {
    let env_filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let (forest_layer, plain_layer) = if io::stdout().is_terminal() {
        (Some(ForestLayer::default()), None)
    } else {
        let plain = tracing_subscriber::fmt::layer()
            .with_writer(io::stdout)
            .with_ansi(false)
            .with_target(false)
            .without_time();
        (None, Some(plain))
    };
    let _ = Registry::default()
        .with(env_filter)
        .with(forest_layer)
        .with(plain_layer)
        .try_init();
}
