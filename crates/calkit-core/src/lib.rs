//! Calkit Core - Shared library for the calendar component installer
//!
//! This library provides the functionality behind the `calkit` CLI:
//! detecting a consuming web project's characteristics, fetching the
//! calendar component sources, and patching the project's Tailwind and
//! ESLint configuration idempotently.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Core Operations** - config patching (`patch`), date
//!   bucketing (`calendar`), project inspection (`project`)
//! - **Layer 2: Workflow Support** - the `module.json` manifest
//!   (`manifest`) and component fetch/install (`components`)
//! - **Layer 3: CLI/TUI Interface** - cliclack-based init/add prompt
//!   flows (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompt flows
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use calkit_core::patch::{tailwind, Mutation};
//!
//! let glob = tailwind::calendar_content_glob(true).to_string();
//! let mutation = tailwind::add_content_globs(config_path, &[glob])?;
//! assert_ne!(mutation, Mutation::Skipped);
//! ```

pub mod calendar;
pub mod components;
pub mod manifest;
pub mod patch;
pub mod project;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use calendar::{bucket_by_date, BucketMap, DateRecord, DateValue, InvalidDateError};
pub use manifest::{ModuleManifest, StyleChoice};
pub use patch::{ConfigDocument, Mutation, PatchError, PatchSeverity, QuoteStyle};
pub use project::{PackageManager, ProjectInfo};

#[cfg(feature = "tui")]
pub use tui::{run_add, run_init, AddArgs, InitArgs};

/// CLI version - binaries should define their own, this is a fallback
pub const DEFAULT_CLI_VERSION: &str = "0.1.0";
