//! Command handler layer.
//!
//! This module owns CLI-oriented orchestration and output wiring.
//!
//! ## Files
//! - `check.rs`: `check` (theme scan) and `range` (single declaration).
//! - `catalog.rs`: `vocab` and `rules` listings.
//!
//! ## Principles
//! - Parse/match CLI inputs here.
//! - Delegate validation to `services/*`.
//! - Keep behavior, exit codes, and output schema stable.
//!
//! Each handler returns `Ok(None)` for commands it does not own, or the exit code.

pub mod catalog;
pub mod check;

pub use catalog::handle_catalog_commands;
pub use check::handle_check_commands;
