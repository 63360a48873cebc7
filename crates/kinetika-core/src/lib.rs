//! Kinetika Core — shared errors and configuration plumbing.
//!
//! This crate has no internal Kinetika dependencies (dependency level 0).
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: The [`ConfigManager`](traits::ConfigManager) trait used by binaries

pub mod error;
pub mod traits;

pub use error::{Error, Result};
pub use traits::ConfigManager;
