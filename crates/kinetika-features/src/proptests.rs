//! Property-based tests for the feature gate.
