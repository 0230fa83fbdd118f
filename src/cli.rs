use crate::services::config::{Comparison, FractionalSteps, RangePolicy};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "schemalint",
    version,
    about = "Static checks for Shopify theme {% schema %} blocks"
)]
pub struct Cli {
    #[arg(long, global = true, help = "Output machine-readable JSON")]
    pub json: bool,
    #[arg(
        long,
        global = true,
        help = "Config file (defaults to ./.schemalint.toml when present)"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        global = true,
        help = "Log filter, e.g. debug or schemalint=trace (overrides RUST_LOG)"
    )]
    pub log_level: Option<String>,
    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides for the `[range]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct PolicyArgs {
    #[arg(long, help = "Maximum number of slider steps")]
    pub max_steps: Option<u32>,
    #[arg(long, value_enum)]
    pub comparison: Option<Comparison>,
    #[arg(long, value_enum)]
    pub fractional_steps: Option<FractionalSteps>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan theme files and directories.
    Check {
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,
        #[arg(long, help = "JSON vocabulary file replacing the built-in type list")]
        vocabulary: Option<PathBuf>,
        #[arg(long, default_value_t = false, help = "Fail on warnings too")]
        strict: bool,
        #[arg(
            long,
            default_value_t = 1,
            help = "Worker threads (0 = one per core, 1 = sequential)"
        )]
        jobs: usize,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Validate a single range declaration.
    #[command(allow_negative_numbers = true)]
    Range {
        #[arg(long)]
        min: f64,
        #[arg(long)]
        max: f64,
        #[arg(long)]
        step: Option<f64>,
        #[arg(long)]
        default: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
        #[command(flatten)]
        policy: PolicyArgs,
    },
    /// Print the effective type vocabulary.
    Vocab {
        #[arg(long)]
        vocabulary: Option<PathBuf>,
    },
    /// List every finding kind with its severity and remedy.
    Rules,
}

impl PolicyArgs {
    /// Layers the flags that were given over the configured policy.
    pub fn apply(&self, base: &RangePolicy) -> RangePolicy {
        RangePolicy {
            max_steps: self.max_steps.unwrap_or(base.max_steps),
            comparison: self.comparison.unwrap_or(base.comparison),
            fractional_steps: self.fractional_steps.unwrap_or(base.fractional_steps),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn range_accepts_negative_bounds() {
        let cli = Cli::try_parse_from(["schemalint", "range", "--min", "-10", "--max", "10"]).unwrap();
        match cli.command {
            Commands::Range { min, max, step, .. } => {
                assert_eq!(min, -10.0);
                assert_eq!(max, 10.0);
                assert!(step.is_none());
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn policy_flags_override_only_what_is_given() {
        let base = RangePolicy {
            max_steps: 50,
            ..RangePolicy::default()
        };
        let args = PolicyArgs {
            comparison: Some(Comparison::Strict),
            ..PolicyArgs::default()
        };
        let p = args.apply(&base);
        assert_eq!(p.max_steps, 50);
        assert_eq!(p.comparison, Comparison::Strict);
        assert_eq!(p.fractional_steps, FractionalSteps::Reject);
    }
}
