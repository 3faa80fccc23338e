//! Shared configuration for frontdesk tools.
//!
//! TOML properties (one per hotel, each pointing at its dataset file),
//! display defaults, desk tuning, and translation to
//! `frontdesk_core::DeskConfig`. The CLI adds `GlobalOpts`-aware wrappers
//! on top.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use frontdesk_core::DeskConfig;
use frontdesk_core::view::{PAGE_SIZES, PageSize};

/// Prefix for environment overrides. Nested keys use `__`, e.g.
/// `FRONTDESK_DESK__ASSIGNMENT_CAP=8`.
pub const ENV_PREFIX: &str = "FRONTDESK_";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("property '{name}' is not configured")]
    UnknownProperty { name: String },

    #[error("no property selected and no default_property configured")]
    NoProperty,

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Property used when `--property` is not given.
    pub default_property: Option<String>,

    /// Display defaults.
    #[serde(default)]
    pub defaults: Defaults,

    /// Business-rule tuning shared by every property.
    #[serde(default)]
    pub desk: DeskSettings,

    /// Named hotel properties.
    #[serde(default)]
    pub properties: HashMap<String, Property>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_property: Some("default".into()),
            defaults: Defaults::default(),
            desk: DeskSettings::default(),
            properties: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            page_size: default_page_size(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_page_size() -> usize {
    PageSize::default().get()
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DeskSettings {
    #[serde(default = "default_assignment_cap")]
    pub assignment_cap: u32,

    #[serde(default = "default_balance_tolerance")]
    pub balance_tolerance: f64,

    #[serde(default = "default_min_journal_lines")]
    pub min_journal_lines: usize,

    #[serde(default = "default_reconcile_window_days")]
    pub reconcile_window_days: i64,
}

impl Default for DeskSettings {
    fn default() -> Self {
        Self {
            assignment_cap: default_assignment_cap(),
            balance_tolerance: default_balance_tolerance(),
            min_journal_lines: default_min_journal_lines(),
            reconcile_window_days: default_reconcile_window_days(),
        }
    }
}

fn default_assignment_cap() -> u32 {
    DeskConfig::default().assignment_cap
}
fn default_balance_tolerance() -> f64 {
    DeskConfig::default().balance_tolerance
}
fn default_min_journal_lines() -> usize {
    DeskConfig::default().min_journal_lines
}
fn default_reconcile_window_days() -> i64 {
    DeskConfig::default().reconcile_window_days
}

/// A named hotel property.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Property {
    /// Display name (e.g., "Harbor View Inn").
    pub name: Option<String>,

    /// Dataset file (JSON or YAML). Relative paths resolve against the
    /// config file's directory.
    pub data_file: PathBuf,
}

impl Property {
    /// Absolute dataset path for this property.
    pub fn data_path(&self, base: &Path) -> PathBuf {
        if self.data_file.is_absolute() {
            self.data_file.clone()
        } else {
            base.join(&self.data_file)
        }
    }
}

impl Config {
    /// Resolve a property by explicit name, falling back to `default_property`.
    pub fn property(&self, name: Option<&str>) -> Result<(&str, &Property), ConfigError> {
        let name = name
            .or(self.default_property.as_deref())
            .ok_or(ConfigError::NoProperty)?;
        self.properties
            .get_key_value(name)
            .map(|(k, v)| (k.as_str(), v))
            .ok_or_else(|| ConfigError::UnknownProperty { name: name.into() })
    }

    /// Validated `DeskConfig` built from `[desk]` and `defaults.page_size`.
    pub fn desk_config(&self) -> Result<DeskConfig, ConfigError> {
        let desk = &self.desk;
        let default_page_size =
            PageSize::new(self.defaults.page_size).ok_or_else(|| ConfigError::Validation {
                field: "defaults.page_size".into(),
                reason: format!(
                    "expected one of {PAGE_SIZES:?}, got {}",
                    self.defaults.page_size
                ),
            })?;
        if !desk.balance_tolerance.is_finite() || desk.balance_tolerance < 0.0 {
            return Err(ConfigError::Validation {
                field: "desk.balance_tolerance".into(),
                reason: format!("must be a non-negative number, got {}", desk.balance_tolerance),
            });
        }
        if desk.min_journal_lines < 2 {
            return Err(ConfigError::Validation {
                field: "desk.min_journal_lines".into(),
                reason: "a journal entry needs at least 2 lines".into(),
            });
        }
        if desk.reconcile_window_days < 0 {
            return Err(ConfigError::Validation {
                field: "desk.reconcile_window_days".into(),
                reason: "must not be negative".into(),
            });
        }

        Ok(DeskConfig {
            assignment_cap: desk.assignment_cap,
            balance_tolerance: desk.balance_tolerance,
            min_journal_lines: desk.min_journal_lines,
            reconcile_window_days: desk.reconcile_window_days,
            default_page_size,
        })
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "frontdesk", "frontdesk").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("frontdesk");
    p
}

/// Directory relative property paths resolve against.
pub fn config_dir(path: &Path) -> PathBuf {
    path.parent().map_or_else(|| PathBuf::from("."), Path::to_path_buf)
}

// ── Config loading ──────────────────────────────────────────────────

/// Load from a specific file. A missing file yields the defaults.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed(ENV_PREFIX).split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        Jail::expect_with(|jail| {
            let cfg = load_config_from(&jail.directory().join("absent.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            assert_eq!(cfg.desk_config().unwrap(), DeskConfig::default());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "config.toml",
                r#"
                default_property = "harbor"

                [defaults]
                page_size = 20

                [desk]
                assignment_cap = 3

                [properties.harbor]
                name = "Harbor View Inn"
                data_file = "harbor.json"
                "#,
            )?;
            jail.set_env("FRONTDESK_DESK__ASSIGNMENT_CAP", "8");

            let cfg = load_config_from(&jail.directory().join("config.toml")).unwrap();
            let desk = cfg.desk_config().unwrap();
            assert_eq!(desk.assignment_cap, 8);
            assert_eq!(desk.default_page_size.get(), 20);
            assert_eq!(desk.min_journal_lines, 2);

            let (name, property) = cfg.property(None).unwrap();
            assert_eq!(name, "harbor");
            assert_eq!(
                property.data_path(Path::new("/etc/frontdesk")),
                PathBuf::from("/etc/frontdesk/harbor.json")
            );
            Ok(())
        });
    }

    #[test]
    fn unknown_property_is_reported() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.property(Some("nowhere")),
            Err(ConfigError::UnknownProperty { name }) if name == "nowhere"
        ));
        let cfg = Config {
            default_property: None,
            ..Config::default()
        };
        assert!(matches!(cfg.property(None), Err(ConfigError::NoProperty)));
    }

    #[test]
    fn desk_settings_are_validated() {
        let mut cfg = Config::default();
        cfg.defaults.page_size = 7;
        assert!(matches!(
            cfg.desk_config(),
            Err(ConfigError::Validation { field, .. }) if field == "defaults.page_size"
        ));

        let mut cfg = Config::default();
        cfg.desk.min_journal_lines = 1;
        assert!(cfg.desk_config().is_err());

        let mut cfg = Config::default();
        cfg.desk.balance_tolerance = -0.5;
        assert!(cfg.desk_config().is_err());
    }

    #[test]
    fn saved_config_loads_back() {
        Jail::expect_with(|jail| {
            let path = jail.directory().join("nested").join("config.toml");
            let mut cfg = Config::default();
            cfg.properties.insert(
                "default".into(),
                Property {
                    name: Some("Main".into()),
                    data_file: PathBuf::from("main.yaml"),
                },
            );
            save_config_to(&cfg, &path).unwrap();
            assert_eq!(load_config_from(&path).unwrap(), cfg);
            Ok(())
        });
    }
}
