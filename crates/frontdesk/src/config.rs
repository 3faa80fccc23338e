//! CLI configuration: thin wrapper around `frontdesk_config` shared types.
//!
//! Re-exports the shared types and adds resolution that respects
//! `GlobalOpts` flag overrides (--config, --data, --property, --output).

use std::path::PathBuf;

use clap::ValueEnum;

use frontdesk_config::ConfigError;

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use frontdesk_config::{Config, Property, config_dir, load_config_from, save_config_to};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Config file in effect: `--config` / `FRONTDESK_CONFIG`, else the platform path.
pub fn config_file(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(frontdesk_config::config_path)
}

pub fn load(global: &GlobalOpts) -> Result<Config, CliError> {
    Ok(load_config_from(&config_file(global))?)
}

/// Dataset path: `--data` wins, then the selected or default property.
pub fn resolve_data_path(global: &GlobalOpts, cfg: &Config) -> Result<PathBuf, CliError> {
    if let Some(path) = &global.data {
        return Ok(path.clone());
    }

    match cfg.property(global.property.as_deref()) {
        Ok((_, property)) => Ok(property.data_path(&config_dir(&config_file(global)))),
        Err(ConfigError::UnknownProperty { name }) if global.property.is_some() => {
            let mut available: Vec<&str> = cfg.properties.keys().map(String::as_str).collect();
            available.sort_unstable();
            Err(CliError::PropertyNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            })
        }
        Err(ConfigError::UnknownProperty { .. } | ConfigError::NoProperty) => Err(CliError::NoData),
        Err(other) => Err(other.into()),
    }
}

/// Output format: flag / env, then `defaults.output`, then table.
pub fn output_format(global: &GlobalOpts, cfg: &Config) -> OutputFormat {
    global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    })
}

pub fn color_mode(global: &GlobalOpts, cfg: &Config) -> ColorMode {
    global
        .color
        .unwrap_or_else(|| ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto))
}
