//! Kinetika CLI configuration.
//!
//! ```toml
//! project_name = "kinetika"
//! restrictions_file = "/etc/kinetika/restrictions.toml"  # optional
//!
//! [logging]
//! level = "info"
//!
//! [plans]
//! starter = []
//! studio = ["core.rooms", "finance.invoicing", "compliance.waivers"]
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;

use kinetika_core::ConfigManager;
use kinetika_features::FeatureRestrictionMap;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Top-level configuration for the `kinetika` binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KinetikaConfig {
    /// Name shown in help and used for the config directory.
    pub project_name: String,

    /// TOML restriction table to use instead of the built-in one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub restrictions_file: Option<PathBuf>,

    /// Logging settings.
    pub logging: LoggingConfig,

    /// Subscription plans and the features each one enables.
    pub plans: BTreeMap<String, Vec<String>>,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for KinetikaConfig {
    fn default() -> Self {
        let studio = ["core.rooms", "finance.invoicing", "compliance.waivers"];
        let mut pro = studio.to_vec();
        pro.extend([
            "core.multi_studio",
            "core.ems_devices",
            "finance.reports",
            "finance.pos",
            "marketing.leads",
            "engagement.gamification",
            "support.tickets",
        ]);
        let enterprise: Vec<String> = FeatureRestrictionMap::builtin()
            .feature_keys()
            .map(ToString::to_string)
            .collect();

        let mut plans = BTreeMap::new();
        plans.insert("starter".to_string(), Vec::new());
        plans.insert("studio".to_string(), to_strings(&studio));
        plans.insert("pro".to_string(), to_strings(&pro));
        plans.insert("enterprise".to_string(), enterprise);

        Self {
            project_name: "kinetika".to_string(),
            restrictions_file: None,
            logging: LoggingConfig::default(),
            plans,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl ConfigManager for KinetikaConfig {
    fn project_name() -> &'static str {
        "kinetika"
    }
}

impl KinetikaConfig {
    /// Load configuration from an explicit path or the default location.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        Ok(<Self as ConfigManager>::load(config_path)?)
    }

    /// The restriction table this config points at.
    pub fn restriction_map(&self) -> Result<FeatureRestrictionMap> {
        match &self.restrictions_file {
            Some(path) => Ok(FeatureRestrictionMap::from_file(path)?),
            None => Ok(FeatureRestrictionMap::builtin()),
        }
    }

    /// Features enabled by `plan`.
    pub fn plan_features(&self, plan: &str) -> Result<&[String]> {
        self.plans
            .get(plan)
            .map(Vec::as_slice)
            .ok_or_else(|| Error::UnknownPlan {
                name: plan.to_string(),
                known: self.plans.keys().cloned().collect::<Vec<_>>().join(", "),
            })
    }
}
