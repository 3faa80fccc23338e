//! Config subcommand handlers.

use std::path::PathBuf;

use dialoguer::{Input, Select};
use tabled::Tabled;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts, OutputFormat};
use crate::config::{self, Config, Property};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Helpers ─────────────────────────────────────────────────────────

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn save(cfg: &Config, global: &GlobalOpts) -> Result<PathBuf, CliError> {
    let path = config::config_file(global);
    config::save_config_to(cfg, &path)?;
    Ok(path)
}

fn note(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

#[derive(Tabled)]
struct PropertyRow {
    #[tabled(rename = "")]
    marker: String,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Data file")]
    data_file: String,
}

/// Properties sorted by key, with the default flagged.
fn property_rows(cfg: &Config) -> Vec<PropertyRow> {
    let mut keys: Vec<&String> = cfg.properties.keys().collect();
    keys.sort();
    keys.into_iter()
        .map(|key| {
            let p = &cfg.properties[key];
            PropertyRow {
                marker: if cfg.default_property.as_deref() == Some(key.as_str()) {
                    "*".into()
                } else {
                    String::new()
                },
                key: key.clone(),
                name: p.name.clone().unwrap_or_default(),
                data_file: p.data_file.display().to_string(),
            }
        })
        .collect()
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init: interactive wizard ────────────────────────────────
        ConfigCommand::Init => {
            let path = config::config_file(global);
            if path.exists()
                && !util::confirm(
                    &format!("{} exists. Replace it?", path.display()),
                    global.yes,
                )?
            {
                return Ok(());
            }
            eprintln!("frontdesk configuration wizard");
            eprintln!("   Config path: {}\n", path.display());

            let key: String = Input::new()
                .with_prompt("Property key")
                .default("default".into())
                .interact_text()
                .map_err(prompt_err)?;

            let display_name: String = Input::new()
                .with_prompt("Hotel name")
                .allow_empty(true)
                .interact_text()
                .map_err(prompt_err)?;

            let data_file: String = Input::new()
                .with_prompt("Dataset file (JSON or YAML)")
                .default("hotel.json".into())
                .interact_text()
                .map_err(prompt_err)?;

            let formats = ["table", "json", "yaml", "plain"];
            let format = Select::new()
                .with_prompt("Default output format")
                .items(&formats)
                .default(0)
                .interact()
                .map_err(prompt_err)?;

            let mut cfg = Config::default();
            cfg.defaults.output = formats[format].into();
            cfg.properties.insert(
                key.clone(),
                Property {
                    name: (!display_name.trim().is_empty()).then_some(display_name),
                    data_file: PathBuf::from(data_file),
                },
            );
            cfg.default_property = Some(key);

            let path = save(&cfg, global)?;
            eprintln!("\n   Config saved to {}", path.display());
            Ok(())
        }

        ConfigCommand::Show => {
            let cfg = config::load(global)?;
            let format = config::output_format(global, &cfg);
            let out = match format {
                OutputFormat::Table | OutputFormat::Plain => {
                    toml::to_string_pretty(&cfg).map_err(frontdesk_config::ConfigError::from)?
                }
                other => output::render_single(other, &cfg, |_| String::new(), |_| String::new())?,
            };
            output::print_output(out.trim_end(), global.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            output::print_output(&config::config_file(global).display().to_string(), global.quiet);
            Ok(())
        }

        ConfigCommand::Properties => {
            let cfg = config::load(global)?;
            let rows = property_rows(&cfg);
            let out = match config::output_format(global, &cfg) {
                OutputFormat::Table => output::render_table(&rows),
                OutputFormat::Plain => rows
                    .iter()
                    .map(|r| r.key.clone())
                    .collect::<Vec<_>>()
                    .join("\n"),
                other => output::render_single(
                    other,
                    &cfg.properties,
                    |_| String::new(),
                    |_| String::new(),
                )?,
            };
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ConfigCommand::AddProperty {
            name,
            data_file,
            display_name,
            default,
        } => {
            let mut cfg = config::load(global)?;
            let make_default = default
                || cfg
                    .default_property
                    .as_deref()
                    .is_none_or(|d| !cfg.properties.contains_key(d));
            cfg.properties.insert(
                name.clone(),
                Property {
                    name: display_name,
                    data_file,
                },
            );
            if make_default {
                cfg.default_property = Some(name.clone());
            }
            save(&cfg, global)?;
            note(
                global,
                &if make_default {
                    format!("Property '{name}' saved and set as default")
                } else {
                    format!("Property '{name}' saved")
                },
            );
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load(global)?;
            if !cfg.properties.contains_key(&name) {
                let mut available: Vec<&str> = cfg.properties.keys().map(String::as_str).collect();
                available.sort_unstable();
                return Err(CliError::PropertyNotFound {
                    available: if available.is_empty() {
                        "(none)".into()
                    } else {
                        available.join(", ")
                    },
                    name,
                });
            }
            cfg.default_property = Some(name.clone());
            save(&cfg, global)?;
            note(global, &format!("Default property set to '{name}'"));
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn property_rows_are_sorted_and_mark_the_default() {
        let mut cfg = Config::default();
        for key in ["harbor", "alpine"] {
            cfg.properties.insert(
                key.into(),
                Property {
                    name: None,
                    data_file: PathBuf::from(format!("{key}.json")),
                },
            );
        }
        cfg.default_property = Some("harbor".into());

        let rows = property_rows(&cfg);
        let keys: Vec<&str> = rows.iter().map(|r| r.key.as_str()).collect();
        assert_eq!(keys, ["alpine", "harbor"]);
        assert_eq!(rows[1].marker, "*");
        assert!(rows[0].marker.is_empty());
    }
}
