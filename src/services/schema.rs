use crate::domain::constants::SIDEBAR_SETTING_TYPES;
use crate::domain::models::{
    DocumentKind, Finding, FindingKind, SelectOption, SettingKind, Severity,
};
use crate::services::extract::{settings_references, SchemaBlock};
use crate::services::range::{fmt_num, parse_range, RangeSettingValidator};
use crate::services::vocabulary::{SettingTypeValidator, Vocabulary};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::{BTreeSet, HashSet};
use std::ops::Range;
use std::sync::OnceLock;

fn richtext_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(?:<[a-zA-Z][^>]*>.*</[a-zA-Z][^>]*>|<[a-zA-Z][^>]*/>)$")
            .expect("static richtext regex")
    })
}

/// Where a schema came from; drives the document-level relaxations.
pub struct DocumentContext<'a> {
    pub kind: DocumentKind,
    pub legacy: bool,
    pub text: &'a str,
    pub block: &'a SchemaBlock,
    /// Spans of every schema block in the document, excluded from usage scanning.
    pub schema_spans: &'a [Range<usize>],
}

struct Declared {
    id: String,
    index: usize,
    kind: SettingKind,
}

/// All per-schema rules. Findings are collected, never returned early.
#[derive(Debug, Clone)]
pub struct SchemaRules {
    range: RangeSettingValidator,
    vocabulary: Vocabulary,
}

impl SchemaRules {
    pub fn new(range: RangeSettingValidator, vocabulary: Vocabulary) -> Self {
        Self { range, vocabulary }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn check(&self, schema: &Map<String, Value>, ctx: &DocumentContext<'_>) -> Vec<Finding> {
        let mut findings = Vec::new();

        if ctx.kind.requires_schema() && !schema.contains_key("name") {
            findings.push(
                Finding::new(FindingKind::MissingSchemaName, "schema has no `name` property")
                    .at("name"),
            );
        }

        let top = self.check_settings(schema.get("settings"), "settings", &mut findings);
        let block_ids = self.check_blocks(schema.get("blocks"), &mut findings);
        self.check_presets(schema.get("presets"), &top, &mut findings);
        self.check_usage(&top, &block_ids, ctx, &mut findings);

        findings
            .into_iter()
            .map(|f| match f.line {
                Some(_) => f,
                None => f.on_line(ctx.block.line),
            })
            .collect()
    }

    fn check_settings(
        &self,
        list: Option<&Value>,
        prefix: &str,
        findings: &mut Vec<Finding>,
    ) -> Vec<Declared> {
        let items = match list {
            None => return Vec::new(),
            Some(Value::Array(items)) => items,
            Some(_) => {
                findings.push(
                    Finding::new(FindingKind::InvalidField, format!("`{}` must be an array", prefix))
                        .at(prefix),
                );
                return Vec::new();
            }
        };

        let mut declared = Vec::new();
        let mut seen = HashSet::new();
        for (i, decl) in items.iter().enumerate() {
            let path = format!("{}[{}]", prefix, i);
            if !decl.is_object() {
                findings.push(
                    Finding::new(FindingKind::InvalidField, "setting must be a JSON object")
                        .at(path.as_str()),
                );
                continue;
            }

            let kind = classify_setting(decl, &self.vocabulary);
            match &kind {
                SettingKind::Untyped => findings.push(
                    Finding::new(FindingKind::InvalidField, "setting is missing required `type`")
                        .at(format!("{}.type", path)),
                ),
                SettingKind::Unknown { type_name } => findings.extend(
                    SettingTypeValidator::validate(type_name, &self.vocabulary.setting_types)
                        .into_findings()
                        .into_iter()
                        .map(|f| f.under(&path)),
                ),
                SettingKind::Range(_) | SettingKind::MalformedRange => findings.extend(
                    self.range
                        .validate(decl)
                        .into_findings()
                        .into_iter()
                        .map(|f| f.under(&path)),
                ),
                SettingKind::Select { options } | SettingKind::Radio { options } => {
                    if options.is_empty() {
                        findings.push(
                            Finding::new(
                                FindingKind::InvalidField,
                                "option setting declares no `options`",
                            )
                            .at(format!("{}.options", path)),
                        );
                    }
                }
                SettingKind::Sidebar { type_name } => {
                    if decl.get("content").is_none() {
                        findings.push(
                            Finding::new(
                                FindingKind::InvalidField,
                                format!("{} setting is missing `content`", type_name),
                            )
                            .at(format!("{}.content", path))
                            .with_severity(Severity::Warning),
                        );
                    }
                    continue;
                }
                SettingKind::Plain { .. } => {}
            }

            let id = decl.get("id").and_then(Value::as_str);
            match id {
                None => findings.push(
                    Finding::new(FindingKind::InvalidField, "setting is missing required `id`")
                        .at(format!("{}.id", path)),
                ),
                Some(id) => {
                    if !seen.insert(id.to_string()) {
                        findings.push(
                            Finding::new(
                                FindingKind::DuplicateSettingId,
                                format!("duplicate setting id '{}'", id),
                            )
                            .at(format!("{}.id", path)),
                        );
                    }
                    declared.push(Declared {
                        id: id.to_string(),
                        index: i,
                        kind,
                    });
                }
            }
            if decl.get("label").is_none() {
                findings.push(
                    Finding::new(
                        FindingKind::InvalidField,
                        format!("setting '{}' has no `label`", id.unwrap_or("unknown")),
                    )
                    .at(format!("{}.label", path))
                    .with_severity(Severity::Warning),
                );
            }
        }
        declared
    }

    /// Validates block declarations and returns every setting id they declare.
    fn check_blocks(&self, blocks: Option<&Value>, findings: &mut Vec<Finding>) -> BTreeSet<String> {
        let mut ids = BTreeSet::new();
        let items = match blocks {
            None => return ids,
            Some(Value::Array(items)) => items,
            Some(_) => {
                findings.push(
                    Finding::new(FindingKind::InvalidField, "`blocks` must be an array").at("blocks"),
                );
                return ids;
            }
        };

        for (i, block) in items.iter().enumerate() {
            let path = format!("blocks[{}]", i);
            match block.get("type").and_then(Value::as_str) {
                None => findings.push(
                    Finding::new(FindingKind::InvalidField, "block is missing required `type`")
                        .at(format!("{}.type", path)),
                ),
                Some(t) if t.starts_with('@') && !self.vocabulary.accepts_block(t) => findings.extend(
                    SettingTypeValidator::validate(t, &self.vocabulary.block_types)
                        .into_findings()
                        .into_iter()
                        .map(|f| f.under(&path)),
                ),
                Some(_) => {}
            }
            let prefix = format!("{}.settings", path);
            for d in self.check_settings(block.get("settings"), &prefix, findings) {
                ids.insert(d.id);
            }
        }
        ids
    }

    fn check_presets(&self, presets: Option<&Value>, top: &[Declared], findings: &mut Vec<Finding>) {
        let presets = match presets {
            None => return,
            Some(Value::Array(items)) => items,
            Some(_) => {
                findings.push(
                    Finding::new(FindingKind::InvalidField, "`presets` must be an array").at("presets"),
                );
                return;
            }
        };
        for (i, preset) in presets.iter().enumerate() {
            let values = match preset.get("settings") {
                None => continue,
                Some(Value::Object(values)) => values,
                Some(_) => {
                    findings.push(
                        Finding::new(FindingKind::InvalidField, "preset `settings` must be an object")
                            .at(format!("presets[{}].settings", i)),
                    );
                    continue;
                }
            };
            let name = preset
                .get("name")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| format!("preset {}", i + 1));

            for (key, value) in values {
                let field = format!("presets[{}].settings.{}", i, key);
                let Some(decl) = top.iter().find(|d| &d.id == key) else {
                    findings.push(
                        Finding::new(
                            FindingKind::PresetUndefinedSetting,
                            format!("preset '{}' sets undefined setting '{}'", name, key),
                        )
                        .at(field),
                    );
                    continue;
                };
                if let Some(problem) = preset_value_problem(&decl.kind, value) {
                    findings.push(
                        Finding::new(
                            FindingKind::PresetInvalidValue,
                            format!("preset '{}' setting '{}': {}", name, key, problem),
                        )
                        .at(field),
                    );
                }
            }
        }
    }

    fn check_usage(
        &self,
        top: &[Declared],
        block_ids: &BTreeSet<String>,
        ctx: &DocumentContext<'_>,
        findings: &mut Vec<Finding>,
    ) {
        let refs = settings_references(ctx.text, ctx.schema_spans);
        let defined: HashSet<&str> = top
            .iter()
            .map(|d| d.id.as_str())
            .chain(block_ids.iter().map(String::as_str))
            .collect();

        let mut reported = HashSet::new();
        for r in &refs {
            if defined.contains(r.id.as_str()) || !reported.insert((r.scope.as_str(), r.id.as_str())) {
                continue;
            }
            let severity = if ctx.legacy {
                Severity::Warning
            } else {
                Severity::Error
            };
            findings.push(
                Finding::new(
                    FindingKind::UndefinedSetting,
                    format!("'{}.settings.{}' is used but not defined in the schema", r.scope, r.id),
                )
                .at(format!("{}.settings.{}", r.scope, r.id))
                .on_line(r.line)
                .with_severity(severity),
            );
        }

        let used: HashSet<&str> = refs.iter().map(|r| r.id.as_str()).collect();
        for d in top.iter().filter(|d| !used.contains(d.id.as_str())) {
            findings.push(
                Finding::new(
                    FindingKind::UnusedSetting,
                    format!("setting '{}' is defined but never referenced", d.id),
                )
                .at(format!("settings[{}].id", d.index)),
            );
        }
    }
}

/// Dispatches a raw declaration onto the closed set of setting kinds.
pub fn classify_setting(decl: &Value, vocabulary: &Vocabulary) -> SettingKind {
    let Some(type_name) = decl.get("type").and_then(Value::as_str) else {
        return SettingKind::Untyped;
    };
    if !vocabulary.accepts_setting(type_name) {
        return SettingKind::Unknown {
            type_name: type_name.to_string(),
        };
    }
    match type_name {
        "range" => match parse_range(decl) {
            Ok(parsed) => SettingKind::Range(parsed.setting),
            Err(_) => SettingKind::MalformedRange,
        },
        "select" => SettingKind::Select {
            options: options_of(decl),
        },
        "radio" => SettingKind::Radio {
            options: options_of(decl),
        },
        t if SIDEBAR_SETTING_TYPES.contains(&t) => SettingKind::Sidebar {
            type_name: t.to_string(),
        },
        t => SettingKind::Plain {
            type_name: t.to_string(),
        },
    }
}

fn options_of(decl: &Value) -> Vec<SelectOption> {
    decl.get("options")
        .and_then(Value::as_array)
        .map(|opts| {
            opts.iter()
                .filter_map(|o| o.get("value"))
                .map(|v| SelectOption { value: v.clone() })
                .collect()
        })
        .unwrap_or_default()
}

fn preset_value_problem(kind: &SettingKind, value: &Value) -> Option<String> {
    match kind {
        SettingKind::Range(s) => match value.as_f64() {
            None => Some(format!("range value {} is not a number", value)),
            Some(v) if v < s.min || v > s.max => Some(format!(
                "value {} outside range [{}, {}]",
                fmt_num(v),
                fmt_num(s.min),
                fmt_num(s.max)
            )),
            Some(_) => None,
        },
        SettingKind::Select { options } | SettingKind::Radio { options } => {
            if options.iter().any(|o| &o.value == value) {
                None
            } else {
                let allowed: Vec<String> = options.iter().map(|o| o.value.to_string()).collect();
                Some(format!(
                    "value {} is not one of the options [{}]",
                    value,
                    allowed.join(", ")
                ))
            }
        }
        SettingKind::Plain { type_name } if type_name == "richtext" => match value.as_str() {
            Some(text) if !text.trim().is_empty() && !richtext_re().is_match(text.trim()) => {
                Some(format!("richtext value '{}' must be wrapped in HTML tags", text))
            }
            _ => None,
        },
        _ => None,
    }
}
