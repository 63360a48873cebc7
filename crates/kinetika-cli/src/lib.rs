//! # kinetika-cli
//!
//! Admin CLI for Kinetika feature gating:
//! - Check whether a permission is usable with a plan or feature list
//! - Explain which features gate a permission
//! - Print the effective restriction table
//! - Manage the config file

#![warn(missing_docs)]
#![warn(clippy::all)]
#![forbid(unsafe_code)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod config_handlers;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
