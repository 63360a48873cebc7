//! Gate decisions against the built-in studio table.

use kinetika_features::{EnabledFeatureSet, FeatureGate, FeatureOverride, GateDecision};

use crate::common::features;

#[test]
fn test_coach_create_needs_no_feature() {
    let gate = FeatureGate::builtin();
    assert!(gate.is_permission_allowed("coach.create", &EnabledFeatureSet::new()));
}

#[test]
fn test_studio_create_needs_multi_studio() {
    let gate = FeatureGate::builtin();
    assert!(!gate.is_permission_allowed("studio.create", &EnabledFeatureSet::new()));
    assert!(gate.is_permission_allowed("studio.create", &features(&["core.multi_studio"])));
}

#[test]
fn test_invoice_create_needs_invoicing_not_reports() {
    let gate = FeatureGate::builtin();
    assert!(!gate.is_permission_allowed("finance.invoice.create", &features(&["finance.reports"])));
    assert!(gate.is_permission_allowed("finance.invoice.create", &features(&["finance.invoicing"])));
}

#[test]
fn test_every_exact_pattern_denied_without_feature_and_allowed_with_it() {
    let gate = FeatureGate::builtin();
    for entry in gate.restrictions().entries() {
        for pattern in entry.patterns().iter().filter(|p| !p.is_wildcard()) {
            let key = pattern.to_string();
            let others = gate
                .restrictions()
                .restricting_features(&key)
                .into_iter()
                .filter(|f| *f != entry.feature())
                .count();
            assert!(!gate.is_permission_allowed(&key, &EnabledFeatureSet::new()), "{key}");
            if others == 0 {
                assert!(
                    gate.is_permission_allowed(&key, &features(&[entry.feature().as_str()])),
                    "{key}"
                );
            }
        }
    }
}

#[test]
fn test_plan_with_override_revokes_feature() {
    let gate = FeatureGate::builtin();
    let enabled = EnabledFeatureSet::resolve(
        ["core.rooms", "finance.pos", "finance.invoicing"],
        &[FeatureOverride::disable("finance.pos")],
    );
    assert!(gate.is_permission_allowed("room.update", &enabled));
    assert!(!gate.is_permission_allowed("finance.pos.sale", &enabled));
    assert_eq!(
        gate.evaluate("product.create", &enabled),
        GateDecision::Denied {
            missing: vec!["finance.pos".into()]
        }
    );
}
