use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

#[derive(Serialize)]
pub struct JsonOut<T: Serialize> {
    pub ok: bool,
    pub data: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => f.write_str("warning"),
            Severity::Error => f.write_str("error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    InvalidStepCount,
    NonPositiveStep,
    DefaultOutOfBounds,
    DefaultOffStep,
    UnknownType,
    MalformedDocument,
    MultipleDeclarations,
    MissingSchema,
    MissingSchemaName,
    InvalidField,
    DuplicateSettingId,
    PresetUndefinedSetting,
    PresetInvalidValue,
    UndefinedSetting,
    UnusedSetting,
}

impl FindingKind {
    pub const ALL: &'static [FindingKind] = &[
        FindingKind::InvalidStepCount,
        FindingKind::NonPositiveStep,
        FindingKind::DefaultOutOfBounds,
        FindingKind::DefaultOffStep,
        FindingKind::UnknownType,
        FindingKind::MalformedDocument,
        FindingKind::MultipleDeclarations,
        FindingKind::MissingSchema,
        FindingKind::MissingSchemaName,
        FindingKind::InvalidField,
        FindingKind::DuplicateSettingId,
        FindingKind::PresetUndefinedSetting,
        FindingKind::PresetInvalidValue,
        FindingKind::UndefinedSetting,
        FindingKind::UnusedSetting,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FindingKind::InvalidStepCount => "invalid_step_count",
            FindingKind::NonPositiveStep => "non_positive_step",
            FindingKind::DefaultOutOfBounds => "default_out_of_bounds",
            FindingKind::DefaultOffStep => "default_off_step",
            FindingKind::UnknownType => "unknown_type",
            FindingKind::MalformedDocument => "malformed_document",
            FindingKind::MultipleDeclarations => "multiple_declarations",
            FindingKind::MissingSchema => "missing_schema",
            FindingKind::MissingSchemaName => "missing_schema_name",
            FindingKind::InvalidField => "invalid_field",
            FindingKind::DuplicateSettingId => "duplicate_setting_id",
            FindingKind::PresetUndefinedSetting => "preset_undefined_setting",
            FindingKind::PresetInvalidValue => "preset_invalid_value",
            FindingKind::UndefinedSetting => "undefined_setting",
            FindingKind::UnusedSetting => "unused_setting",
        }
    }

    /// Severity used unless the rule downgrades it for a specific document.
    pub fn default_severity(self) -> Severity {
        match self {
            FindingKind::DefaultOffStep | FindingKind::UnusedSetting => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn remedy(self) -> &'static str {
        match self {
            FindingKind::InvalidStepCount => {
                "reduce step count below 101 by increasing `step` or narrowing `max - min`"
            }
            FindingKind::NonPositiveStep => "set `step` to a positive number",
            FindingKind::DefaultOutOfBounds => "move `default` inside [`min`, `max`]",
            FindingKind::DefaultOffStep => "pick a `default` equal to `min + k * step`",
            FindingKind::UnknownType => "use a type from the accepted vocabulary (see `schemalint vocab`)",
            FindingKind::MalformedDocument => "fix the JSON inside {% schema %} ... {% endschema %}",
            FindingKind::MultipleDeclarations => "merge into a single {% schema %} block",
            FindingKind::MissingSchema => "add a {% schema %} block; sections and blocks require one",
            FindingKind::MissingSchemaName => "add a `name` property to the schema",
            FindingKind::InvalidField => "add the missing field or correct its value",
            FindingKind::DuplicateSettingId => "give every setting in a list a unique `id`",
            FindingKind::PresetUndefinedSetting => "remove the key or declare the setting in `settings`",
            FindingKind::PresetInvalidValue => "use a value the setting declaration accepts",
            FindingKind::UndefinedSetting => "add the setting to the schema or fix the reference",
            FindingKind::UnusedSetting => "remove the setting or reference it from the template",
        }
    }
}

impl fmt::Display for FindingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub severity: Severity,
    pub message: String,
    pub field: Option<String>,
    pub line: Option<usize>,
    pub remedy: String,
}

impl Finding {
    pub fn new(kind: FindingKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: kind.default_severity(),
            message: message.into(),
            field: None,
            line: None,
            remedy: kind.remedy().to_string(),
        }
    }

    pub fn at(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    pub fn on_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_remedy(mut self, remedy: impl Into<String>) -> Self {
        self.remedy = remedy.into();
        self
    }

    /// Re-roots a relative field path under `prefix`, e.g. `step` -> `settings[2].step`.
    pub fn under(mut self, prefix: &str) -> Self {
        self.field = Some(match self.field.take() {
            Some(rel) if rel.starts_with('[') => format!("{}{}", prefix, rel),
            Some(rel) => format!("{}.{}", prefix, rel),
            None => prefix.to_string(),
        });
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Outcome of a single validator call.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationResult {
    Pass,
    Findings(Vec<Finding>),
}

impl ValidationResult {
    pub fn from_findings(findings: Vec<Finding>) -> Self {
        if findings.is_empty() {
            ValidationResult::Pass
        } else {
            ValidationResult::Findings(findings)
        }
    }

    pub fn findings(&self) -> &[Finding] {
        match self {
            ValidationResult::Pass => &[],
            ValidationResult::Findings(f) => f,
        }
    }

    pub fn into_findings(self) -> Vec<Finding> {
        match self {
            ValidationResult::Pass => Vec::new(),
            ValidationResult::Findings(f) => f,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, ValidationResult::Pass)
    }

    /// True when nothing of error severity was found.
    pub fn succeeded(&self) -> bool {
        self.is_pass() || !self.findings().iter().any(Finding::is_error)
    }

    #[cfg(test)]
    pub fn has_kind(&self, kind: FindingKind) -> bool {
        self.findings().iter().any(|f| f.kind == kind)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RangeSetting {
    pub id: Option<String>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub unit: Option<String>,
    pub default: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct SelectOption {
    pub value: serde_json::Value,
}

/// Setting declaration classified by its `type`.
#[derive(Debug, Clone)]
pub enum SettingKind {
    Range(RangeSetting),
    /// A range declaration whose `min`, `max` or `step` could not be read.
    MalformedRange,
    Select { options: Vec<SelectOption> },
    Radio { options: Vec<SelectOption> },
    Sidebar { type_name: String },
    Plain { type_name: String },
    Unknown { type_name: String },
    Untyped,
}

#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub text: Result<String, String>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: Ok(text.into()),
        }
    }

    /// A document whose contents could not be read.
    pub fn unreadable(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            text: Err(reason.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Section,
    Block,
    Snippet,
    Layout,
    Template,
    Other,
}

impl DocumentKind {
    pub fn requires_schema(self) -> bool {
        matches!(self, DocumentKind::Section | DocumentKind::Block)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Pass,
    Fail,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocumentReport {
    pub path: String,
    pub kind: DocumentKind,
    pub legacy: bool,
    pub status: DocumentStatus,
    pub findings: Vec<Finding>,
}

impl DocumentReport {
    pub fn error_count(&self) -> usize {
        self.findings.iter().filter(|f| f.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.findings.len() - self.error_count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ScanSummary {
    pub documents: usize,
    pub passed: usize,
    pub failed: usize,
    pub errors: usize,
    pub warnings: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScanReport {
    pub overall: DocumentStatus,
    pub strict: bool,
    pub summary: ScanSummary,
    pub documents: Vec<DocumentReport>,
}

#[derive(Serialize)]
pub struct RangeReport {
    pub setting: RangeSetting,
    pub step_count: Option<f64>,
    pub max_steps: u32,
    pub status: DocumentStatus,
    pub findings: Vec<Finding>,
}

#[derive(Serialize)]
pub struct RuleInfo {
    pub kind: FindingKind,
    pub severity: Severity,
    pub remedy: &'static str,
}
