use crate::*;

pub fn handle_check_commands(cli: &Cli, config: &LintConfig) -> anyhow::Result<Option<u8>> {
    match &cli.command {
        Commands::Check {
            paths,
            vocabulary,
            strict,
            jobs,
            policy,
        } => {
            let vocab = Vocabulary::resolve(&config.vocabulary, vocabulary.as_deref())?;
            let rules = SchemaRules::new(
                RangeSettingValidator::new(policy.apply(&config.range)),
                vocab,
            );
            tracing::debug!(
                vocabulary = %rules.vocabulary().version,
                setting_types = rules.vocabulary().setting_types.len(),
                "resolved vocabulary"
            );
            let scanner = Scanner::new(rules, *strict || config.scan.strict);

            let documents = collect_documents(paths, &config.scan)?;
            let reports: Vec<DocumentReport> = if *jobs == 1 {
                scanner.scan(&documents).collect()
            } else {
                scanner.scan_parallel(&documents, *jobs)?
            };
            let report = build_report(reports, scanner.strict());
            let ok = report.overall == DocumentStatus::Pass;

            print_one(cli.json, ok, &report, |r| render_scan(r))?;
            Ok(Some(exit_code(ok)))
        }
        Commands::Range {
            min,
            max,
            step,
            default,
            unit,
            policy,
        } => {
            let step = step.unwrap_or(DEFAULT_RANGE_STEP);
            let finite = [*min, *max, step]
                .into_iter()
                .chain(*default)
                .all(f64::is_finite);
            if !finite {
                anyhow::bail!("range values must be finite numbers");
            }

            let setting = RangeSetting {
                id: None,
                min: *min,
                max: *max,
                step,
                unit: unit.clone(),
                default: *default,
            };
            let validator = RangeSettingValidator::new(policy.apply(&config.range));
            let result = validator.validate_setting(&setting);
            let ok = result.succeeded();
            let report = RangeReport {
                step_count: validator.step_count(&setting),
                max_steps: validator.policy().max_steps,
                status: if ok {
                    DocumentStatus::Pass
                } else {
                    DocumentStatus::Fail
                },
                findings: result.into_findings(),
                setting,
            };

            print_one(cli.json, ok, &report, |r| render_range(r))?;
            Ok(Some(exit_code(ok)))
        }
        _ => Ok(None),
    }
}

fn exit_code(ok: bool) -> u8 {
    if ok {
        EXIT_SUCCESS
    } else {
        EXIT_FINDINGS
    }
}
