//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig) and loading
//! - [`block`]: Generic ordered blocks with per-entry source positions
//! - [`relaymsg`]: Test and run phases for the `relaymsg` block
//! - [`validation`]: Startup validation and configuration diagnostics

pub mod block;
pub mod relaymsg;
mod types;
pub mod validation;

pub use block::{ConfigBlock, ConfigEntry};
pub use types::{Config, ConfigError, ServerConfig};
pub use validation::{Diagnostic, Severity, TestReport, ValidationError, validate};
