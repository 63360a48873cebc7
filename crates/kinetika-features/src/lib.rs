//! # kinetika-features
//!
//! Decides whether a tenant may use a permission given the product features
//! enabled by its subscription plan.
//!
//! - [`FeatureRestrictionMap`]: static `feature -> [permission patterns]` table
//! - [`EnabledFeatureSet`]: the features active for one tenant
//! - [`is_permission_allowed`] / [`FeatureGate`]: the check itself
//!
//! A permission matched by no entry is always allowed. A permission matched
//! by several entries needs every one of those features enabled.
//!
//! ```
//! use kinetika_features::{EnabledFeatureSet, FeatureGate};
//!
//! let gate = FeatureGate::builtin();
//! let none = EnabledFeatureSet::new();
//! assert!(gate.is_permission_allowed("coach.create", &none));
//! assert!(!gate.is_permission_allowed("studio.create", &none));
//!
//! let multi = EnabledFeatureSet::from_iter(["core.multi_studio"]);
//! assert!(gate.is_permission_allowed("studio.create", &multi));
//! ```

#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod enabled;
pub mod error;
pub mod gate;
pub mod key;
pub mod pattern;
pub mod restrictions;

mod proptests;

pub use enabled::{EnabledFeatureSet, FeatureOverride};
pub use error::{Error, Result};
pub use gate::{FeatureGate, GateDecision, is_permission_allowed};
pub use key::FeatureKey;
pub use pattern::PermissionPattern;
pub use restrictions::{FeatureRestriction, FeatureRestrictionMap, RestrictionMapBuilder};
