use crate::domain::models::{
    Document, DocumentKind, DocumentReport, DocumentStatus, Finding, FindingKind, ScanReport,
    ScanSummary,
};
use crate::error::LintError;
use crate::services::extract::{classify_path, extract_schema_blocks, Extraction, SchemaBlock};
use crate::services::schema::{DocumentContext, SchemaRules};
use rayon::prelude::*;
use serde_json::Value;

/// Validates documents one at a time. Holds no per-run state, so a scan can be
/// repeated over the same documents and yields the same reports.
#[derive(Debug, Clone)]
pub struct Scanner {
    rules: SchemaRules,
    strict: bool,
}

impl Scanner {
    pub fn new(rules: SchemaRules, strict: bool) -> Self {
        Self { rules, strict }
    }

    pub fn strict(&self) -> bool {
        self.strict
    }

    /// Lazily validates `documents` in input order.
    pub fn scan<'a>(
        &'a self,
        documents: &'a [Document],
    ) -> impl Iterator<Item = DocumentReport> + 'a {
        documents.iter().map(move |d| self.validate_document(d))
    }

    /// Validates on a dedicated pool of `jobs` threads (0 = one per core).
    /// Report order matches `scan` once passed through [`build_report`].
    pub fn scan_parallel(
        &self,
        documents: &[Document],
        jobs: usize,
    ) -> Result<Vec<DocumentReport>, LintError> {
        let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
        Ok(pool.install(|| {
            documents
                .par_iter()
                .map(|d| self.validate_document(d))
                .collect()
        }))
    }

    pub fn validate_document(&self, doc: &Document) -> DocumentReport {
        let (kind, legacy) = classify_path(&doc.path);
        let findings = match &doc.text {
            Err(reason) => vec![Finding::new(
                FindingKind::MalformedDocument,
                format!("could not read document: {}", reason),
            )],
            Ok(text) => self.check_text(text, kind, legacy),
        };

        let status = if self.fails(&findings) {
            DocumentStatus::Fail
        } else {
            DocumentStatus::Pass
        };
        let path = doc.path.to_string_lossy().replace('\\', "/");
        tracing::debug!(path = %path, findings = findings.len(), ?status, "validated document");

        DocumentReport {
            path,
            kind,
            legacy,
            status,
            findings,
        }
    }

    fn fails(&self, findings: &[Finding]) -> bool {
        findings.iter().any(Finding::is_error) || (self.strict && !findings.is_empty())
    }

    fn check_text(&self, text: &str, kind: DocumentKind, legacy: bool) -> Vec<Finding> {
        match extract_schema_blocks(text) {
            Extraction::Unterminated { line } => vec![Finding::new(
                FindingKind::MalformedDocument,
                "{% schema %} is never closed by {% endschema %}",
            )
            .on_line(line)],
            Extraction::None if kind.requires_schema() => vec![Finding::new(
                FindingKind::MissingSchema,
                format!("{:?} documents require a {{% schema %}} block", kind).to_lowercase(),
            )],
            Extraction::None => Vec::new(),
            Extraction::One(block) => {
                self.check_block(text, std::slice::from_ref(&block), kind, legacy)
            }
            Extraction::Many(blocks) => {
                let mut findings = vec![Finding::new(
                    FindingKind::MultipleDeclarations,
                    format!(
                        "found {} schema blocks; multiple declarations are not allowed",
                        blocks.len()
                    ),
                )
                .on_line(blocks[1].line)];
                findings.extend(self.check_block(text, &blocks, kind, legacy));
                findings
            }
        }
    }

    /// Validates the first of `blocks`; the rest only shape usage scanning.
    fn check_block(
        &self,
        text: &str,
        blocks: &[SchemaBlock],
        kind: DocumentKind,
        legacy: bool,
    ) -> Vec<Finding> {
        let Some(block) = blocks.first() else {
            return Vec::new();
        };
        let parsed: Value = match serde_json::from_str(&block.body) {
            Ok(v) => v,
            Err(e) => {
                return vec![Finding::new(
                    FindingKind::MalformedDocument,
                    format!("invalid JSON in schema: {}", e),
                )
                .on_line(block.body_line + e.line().saturating_sub(1))];
            }
        };
        let Value::Object(schema) = parsed else {
            return vec![Finding::new(
                FindingKind::MalformedDocument,
                "schema must be a JSON object",
            )
            .on_line(block.line)];
        };

        let spans: Vec<_> = blocks.iter().map(|b| b.span.clone()).collect();
        let ctx = DocumentContext {
            kind,
            legacy,
            text,
            block,
            schema_spans: &spans,
        };
        self.rules.check(&schema, &ctx)
    }
}

/// Folds per-document reports into a run report, sorted by path.
pub fn build_report(reports: impl IntoIterator<Item = DocumentReport>, strict: bool) -> ScanReport {
    let mut documents: Vec<DocumentReport> = reports.into_iter().collect();
    documents.sort_by(|a, b| a.path.cmp(&b.path));

    let summary = documents.iter().fold(ScanSummary::default(), |mut s, d| {
        s.documents += 1;
        match d.status {
            DocumentStatus::Pass => s.passed += 1,
            DocumentStatus::Fail => s.failed += 1,
        }
        s.errors += d.error_count();
        s.warnings += d.warning_count();
        s
    });
    let overall = if summary.failed == 0 {
        DocumentStatus::Pass
    } else {
        DocumentStatus::Fail
    };
    tracing::info!(
        documents = summary.documents,
        failed = summary.failed,
        errors = summary.errors,
        warnings = summary.warnings,
        "scan complete"
    );

    ScanReport {
        overall,
        strict,
        summary,
        documents,
    }
}
