//! Built-in restriction table for the studio platform.
//!
//! Client, coach and session basics are deliberately absent so that every
//! plan can use them.

use crate::FeatureRestrictionMap;

/// `(feature, patterns)` rows of the default table, in evaluation order.
pub const BUILTIN_RESTRICTIONS: &[(&str, &[&str])] = &[
    ("core.multi_studio", &["studio.*"]),
    ("core.rooms", &["room.*"]),
    ("core.ems_devices", &["device.*", "ems.program.*"]),
    ("finance.invoicing", &["finance.invoice.*", "finance.credit_note.*"]),
    ("finance.reports", &["finance.report.*", "report.revenue"]),
    ("finance.pos", &["finance.pos.*", "product.*"]),
    ("finance.payroll", &["coach.payroll.*"]),
    ("marketing.leads", &["lead.*", "marketing.campaign.*"]),
    ("marketing.automation", &["automation.*", "marketing.campaign.send"]),
    (
        "engagement.gamification",
        &["gamification.*", "badge.*", "leaderboard.read"],
    ),
    ("compliance.waivers", &["waiver.*"]),
    ("support.tickets", &["ticket.*"]),
];

impl FeatureRestrictionMap {
    /// The platform's default restriction table.
    pub fn builtin() -> Self {
        Self::from_static(BUILTIN_RESTRICTIONS)
    }
}
