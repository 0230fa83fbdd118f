//! Service layer containing validation logic and side-effect helpers.
//!
//! ## Service map
//! - `config.rs`: TOML config file and range policy.
//! - `range.rs`: range declaration checks (step count, bounds, default).
//! - `vocabulary.rs`: accepted type vocabulary and the type check.
//! - `extract.rs`: `{% schema %}` extraction, setting references, path roles.
//! - `schema.rs`: per-schema rules (settings, blocks, presets, usage).
//! - `scanner.rs`: per-document validation and report aggregation.
//! - `loader.rs`: walking paths and reading documents.
//! - `output.rs`: JSON/text output helpers.
//!
//! ## Conventions
//! - Validators never fail: problems come back as findings.
//! - Filesystem access stays in `config.rs`, `vocabulary.rs` and `loader.rs`.
//! - Keep command handlers thin; delegate to services.

pub mod config;
pub mod extract;
pub mod loader;
pub mod output;
pub mod range;
pub mod scanner;
pub mod schema;
pub mod vocabulary;
