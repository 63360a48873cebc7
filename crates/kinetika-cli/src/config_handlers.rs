//! Handler functions for `kinetika config` commands.
//!
//! The `cmd_config_*` functions work for any [`ConfigManager`] type; the
//! dispatch function binds them to [`KinetikaConfig`]. `set` re-validates
//! the edited file against the config type before writing it back, so a
//! misspelled key or a wrongly typed value leaves the file untouched.

use crate::cli::ConfigAction;
use crate::config::KinetikaConfig;
use kinetika_core::{ConfigManager, Error, Result};
use std::path::{Path, PathBuf};

/// Handle a config subcommand against [`KinetikaConfig`].
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => {
            let (path, exists) = cmd_config_path::<KinetikaConfig>(config_path)?;
            println!("{}", path.display());
            if !exists {
                eprintln!("(file does not exist, run `kinetika config init` to create it)");
            }
            Ok(())
        }
        ConfigAction::Get { key } => {
            println!("{}", cmd_config_get::<KinetikaConfig>(config_path, &key)?);
            Ok(())
        }
        ConfigAction::Set { key, value } => {
            let path = cmd_config_set::<KinetikaConfig>(config_path, &key, &value)?;
            println!("Set {key} = {value} in {}", path.display());
            Ok(())
        }
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init::<KinetikaConfig>(file.as_deref(), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
        ConfigAction::Export { docker_env } => {
            let config = <KinetikaConfig as ConfigManager>::load(config_path)?;
            for line in cmd_config_export(&config, docker_env)? {
                println!("{line}");
            }
            Ok(())
        }
    }
}

// ============================================================================
// Generic command handlers
// ============================================================================

/// Resolved config file path and whether it exists.
pub fn cmd_config_path<C: ConfigManager>(config_path: Option<&str>) -> Result<(PathBuf, bool)> {
    let path = C::resolve_config_path(config_path).ok_or_else(|| {
        Error::config("Could not determine config directory for this platform")
    })?;
    let exists = path.exists();
    Ok((path, exists))
}

/// Value at a dotted key, formatted for display.
pub fn cmd_config_get<C: ConfigManager>(config_path: Option<&str>, key: &str) -> Result<String> {
    let config = C::load(config_path)?;
    let value = toml::Value::try_from(&config).map_err(|e| Error::config(e.to_string()))?;
    get_nested_value(&value, key)
        .map(format_toml_value)
        .ok_or_else(|| Error::config(format!("Key '{key}' not found in configuration")))
}

/// Set a dotted key in an existing config file. Returns the file path.
pub fn cmd_config_set<C: ConfigManager>(
    config_path: Option<&str>,
    key: &str,
    value: &str,
) -> Result<PathBuf> {
    let path = C::resolve_config_path(config_path)
        .ok_or_else(|| Error::config("Could not determine config directory"))?;
    if !path.exists() {
        return Err(Error::config(format!(
            "Config file does not exist at {}. Run `{} config init` first.",
            path.display(),
            C::project_name()
        )));
    }

    let doc = read_toml(&path)?;
    let parsed = parse_value(value);
    let rendered = match render_validated::<C>(&doc, key, value, parsed.clone()) {
        Ok(rendered) => rendered,
        // A single item where a list is expected
        Err(err) if !parsed.is_array() => {
            render_validated::<C>(&doc, key, value, toml::Value::Array(vec![parsed]))
                .map_err(|_| err)?
        }
        Err(err) => return Err(err),
    };

    std::fs::write(&path, rendered).map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Set `key` on a copy of `doc` and render it, if the result still
/// deserializes as `C`.
fn render_validated<C: ConfigManager>(
    doc: &toml::Value,
    key: &str,
    raw: &str,
    value: toml::Value,
) -> Result<String> {
    let mut doc = doc.clone();
    set_nested_value(&mut doc, key, value)?;
    let rendered = toml::to_string_pretty(&doc).map_err(|e| Error::config(e.to_string()))?;
    toml::from_str::<C>(&rendered)
        .map_err(|e| Error::validation_field(key, format!("rejected value '{raw}': {e}")))?;
    Ok(rendered)
}

/// Write a default config file. Returns the file path.
pub fn cmd_config_init<C: ConfigManager>(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = match file {
        Some(p) => PathBuf::from(p),
        None => C::default_config_path()
            .ok_or_else(|| Error::config("Could not determine config directory"))?,
    };

    if path.exists() && !force {
        return Err(Error::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| Error::io_with_path(e, parent))?;
    }
    std::fs::write(&path, C::default().to_toml_string()?)
        .map_err(|e| Error::io_with_path(e, &path))?;
    Ok(path)
}

/// Config rendered as `KEY=VALUE` (or `--env KEY=VALUE`) lines.
pub fn cmd_config_export<C: ConfigManager>(config: &C, docker_env: bool) -> Result<Vec<String>> {
    Ok(config
        .to_env_vars()?
        .into_iter()
        .map(|(key, value)| {
            if docker_env {
                format!("--env {key}={value}")
            } else {
                format!("{key}={value}")
            }
        })
        .collect())
}

// ============================================================================
// TOML dotted-key helpers
// ============================================================================

fn read_toml(path: &Path) -> Result<toml::Value> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io_with_path(e, path))?;
    toml::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))
}

/// Look up a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let (parents, leaf) = match key.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, key),
    };
    if leaf.is_empty() {
        return Err(Error::config("Empty key path"));
    }

    let mut current = root;
    for part in parents.into_iter().flat_map(|p| p.split('.')) {
        let table = current
            .as_table_mut()
            .ok_or_else(|| Error::config(format!("Cannot descend into '{part}': not a table")))?;
        current = table
            .entry(part.to_string())
            .or_insert_with(|| toml::Value::Table(toml::map::Map::new()));
    }

    current
        .as_table_mut()
        .ok_or_else(|| Error::config(format!("Cannot set '{leaf}' on a non-table value")))?
        .insert(leaf.to_string(), value);
    Ok(())
}

/// Interpret a command-line string as a TOML value.
///
/// Anything that is a TOML value on its own (`true`, `42`, `"a,b"`,
/// `["core.rooms"]`, `[]`) is taken as written. Otherwise a comma-separated
/// list (`a,b,c`) becomes an array of strings, and anything else a string.
pub fn parse_value(s: &str) -> toml::Value {
    if let Ok(mut table) = toml::from_str::<toml::Table>(&format!("v = {s}"))
        && table.len() == 1
        && let Some(value) = table.remove("v")
    {
        return value;
    }
    if s.contains(',') {
        return toml::Value::Array(
            s.split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(|item| toml::Value::String(item.to_string()))
                .collect(),
        );
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Array(items) if items.iter().all(toml::Value::is_str) => items
            .iter()
            .filter_map(toml::Value::as_str)
            .collect::<Vec<_>>()
            .join("\n"),
        toml::Value::Table(_) | toml::Value::Array(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
        other => other.to_string(),
    }
}

// ============================================================================
// Tests
// ============================================================================
