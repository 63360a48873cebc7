//! `check`, `explain` and `features` command implementations.

use kinetika_features::{
    EnabledFeatureSet, FeatureGate, FeatureOverride, FeatureRestrictionMap, GateDecision,
};

use crate::Result;
use crate::cli::CheckArgs;
use crate::config::KinetikaConfig;

/// Result of `kinetika check`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckReport {
    /// Permission that was checked.
    pub permission: String,
    /// Features the check ran against.
    pub enabled: EnabledFeatureSet,
    /// Gate outcome.
    pub decision: GateDecision,
}

impl CheckReport {
    /// Human-readable multi-line summary.
    pub fn render(&self) -> String {
        let enabled = if self.enabled.is_empty() {
            "(none)".to_string()
        } else {
            join(self.enabled.iter())
        };
        match &self.decision {
            GateDecision::Allowed { required } if required.is_empty() => format!(
                "{}: allowed\n  not gated by any feature\n  enabled: {enabled}",
                self.permission
            ),
            GateDecision::Allowed { required } => format!(
                "{}: allowed\n  requires: {}\n  enabled: {enabled}",
                self.permission,
                join(required.iter())
            ),
            GateDecision::Denied { missing } => format!(
                "{}: denied\n  missing: {}\n  enabled: {enabled}",
                self.permission,
                join(missing.iter())
            ),
        }
    }
}

/// Build the feature set described by `args` and run the gate.
///
/// The set starts from the plan (if any) plus `--feature` entries, then
/// applies `--enable` and finally `--disable` as tenant overrides.
pub fn cmd_check(config: &KinetikaConfig, args: &CheckArgs) -> Result<CheckReport> {
    let gate = FeatureGate::new(config.restriction_map()?);

    let mut base: Vec<String> = match &args.plan {
        Some(plan) => config.plan_features(plan)?.to_vec(),
        None => Vec::new(),
    };
    base.extend(args.features.iter().cloned());

    let overrides: Vec<FeatureOverride> = args
        .enable
        .iter()
        .cloned()
        .map(FeatureOverride::enable)
        .chain(args.disable.iter().cloned().map(FeatureOverride::disable))
        .collect();

    let enabled = EnabledFeatureSet::resolve(base, &overrides);
    log::debug!(
        "Checking '{}' against {} enabled features",
        args.permission,
        enabled.len()
    );
    let decision = gate.evaluate(&args.permission, &enabled);

    Ok(CheckReport {
        permission: args.permission.clone(),
        enabled,
        decision,
    })
}

/// Lines describing which features gate `permission`, and through which patterns.
pub fn cmd_explain(map: &FeatureRestrictionMap, permission: &str) -> Vec<String> {
    let lines: Vec<String> = map
        .entries()
        .iter()
        .filter(|entry| entry.restricts(permission))
        .map(|entry| {
            let via = entry
                .patterns()
                .iter()
                .filter(|p| p.matches(permission))
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{} (via {via})", entry.feature())
        })
        .collect();

    if lines.is_empty() {
        vec![format!("{permission} is not gated by any feature")]
    } else {
        lines
    }
}

/// The effective restriction table as TOML.
pub fn cmd_features(config: &KinetikaConfig) -> Result<String> {
    Ok(config.restriction_map()?.to_toml_string()?)
}

fn join<'a, T: std::fmt::Display + 'a>(items: impl Iterator<Item = &'a T>) -> String {
    items.map(ToString::to_string).collect::<Vec<_>>().join(", ")
}
