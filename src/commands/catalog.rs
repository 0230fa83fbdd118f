use crate::*;

pub fn handle_catalog_commands(cli: &Cli, config: &LintConfig) -> anyhow::Result<Option<u8>> {
    match &cli.command {
        Commands::Vocab { vocabulary } => {
            let vocab = Vocabulary::resolve(&config.vocabulary, vocabulary.as_deref())?;
            print_one(cli.json, true, &vocab, |v| {
                let mut lines = vec![format!("vocabulary {}", v.version)];
                lines.push(format!("setting types ({}):", v.setting_types.len()));
                lines.extend(v.setting_types.iter().map(|t| format!("  {}", t)));
                lines.push(format!("block types ({}):", v.block_types.len()));
                lines.extend(v.block_types.iter().map(|t| format!("  {}", t)));
                lines.join("\n")
            })?;
            Ok(Some(EXIT_SUCCESS))
        }
        Commands::Rules => {
            let rules: Vec<RuleInfo> = FindingKind::ALL
                .iter()
                .map(|&kind| RuleInfo {
                    kind,
                    severity: kind.default_severity(),
                    remedy: kind.remedy(),
                })
                .collect();
            print_out(cli.json, &rules, |r| {
                format!("{}\t{}\t{}", r.kind, r.severity, r.remedy)
            })?;
            Ok(Some(EXIT_SUCCESS))
        }
        _ => Ok(None),
    }
}
