//! Configuration management trait.
//!
//! [`ConfigManager`] gives any serde-compatible config struct a standard
//! way to locate its file, load it (falling back to defaults), render it
//! as TOML, and flatten it into environment variables for deployment.

use std::path::PathBuf;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Shared behavior for project configuration files.
///
/// Resolution order for the config file is: an explicit path, then the
/// `<PREFIX>_CONFIG` environment variable, then
/// `<platform config dir>/<project>/config.toml`.
pub trait ConfigManager: Default + Serialize + DeserializeOwned {
    /// Short project name, used for the config directory and env prefix.
    fn project_name() -> &'static str;

    /// Prefix for exported environment variables (e.g. `KINETIKA`).
    fn env_prefix() -> String {
        Self::project_name().to_uppercase().replace('-', "_")
    }

    /// Platform default location of the config file.
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(Self::project_name()).join("config.toml"))
    }

    /// Resolve which config file should be used.
    fn resolve_config_path(explicit: Option<&str>) -> Option<PathBuf> {
        if let Some(path) = explicit {
            return Some(PathBuf::from(path));
        }
        match std::env::var(format!("{}_CONFIG", Self::env_prefix())) {
            Ok(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => Self::default_config_path(),
        }
    }

    /// Load the configuration.
    ///
    /// An explicitly named file must exist. When no file was named and the
    /// resolved default does not exist, defaults are returned.
    fn load(explicit: Option<&str>) -> Result<Self> {
        let Some(path) = Self::resolve_config_path(explicit) else {
            log::debug!("No config directory for this platform, using defaults");
            return Ok(Self::default());
        };

        if !path.exists() {
            if explicit.is_some() {
                return Err(Error::config(format!(
                    "Config file does not exist at {}",
                    path.display()
                )));
            }
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|e| Error::io_with_path(e, &path))?;
        let config = toml::from_str(&content)
            .map_err(|e| Error::config(format!("Failed to parse {}: {e}", path.display())))?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render the configuration as pretty TOML.
    fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Flatten the configuration into `PREFIX_SECTION_KEY=value` pairs.
    ///
    /// Arrays are joined with commas.
    fn to_env_vars(&self) -> Result<Vec<(String, String)>> {
        let value = toml::Value::try_from(self).map_err(|e| Error::config(e.to_string()))?;
        let mut vars = Vec::new();
        flatten_env(&Self::env_prefix(), &value, &mut vars);
        Ok(vars)
    }
}

fn flatten_env(prefix: &str, value: &toml::Value, out: &mut Vec<(String, String)>) {
    match value {
        toml::Value::Table(table) => {
            for (key, child) in table {
                let name = format!("{prefix}_{}", key.to_uppercase().replace(['-', '.'], "_"));
                flatten_env(&name, child, out);
            }
        }
        toml::Value::Array(items) => {
            let joined = items
                .iter()
                .map(scalar_to_string)
                .collect::<Vec<_>>()
                .join(",");
            out.push((prefix.to_string(), joined));
        }
        other => out.push((prefix.to_string(), scalar_to_string(other))),
    }
}

fn scalar_to_string(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
