//! CLI exit code registry.
//!
//! Scripts and CI jobs branch on these, so treat them as part of the shell contract.
//!
//! | Code | Meaning                                                        |
//! |------|----------------------------------------------------------------|
//! | 0    | No failing findings                                            |
//! | 1    | At least one document or range declaration failed validation   |
//! | 2    | Usage or operational error (bad args, missing path, bad config)|

/// Clean run. With `--strict`, also means no warnings.
pub const EXIT_SUCCESS: u8 = 0;

/// Findings failed the run.
pub const EXIT_FINDINGS: u8 = 1;

/// Bad arguments, missing paths, unreadable config or vocabulary.
/// Matches the code clap uses for argument errors.
pub const EXIT_USAGE: u8 = 2;
