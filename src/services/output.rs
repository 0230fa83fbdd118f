use crate::domain::models::{
    DocumentKind, DocumentReport, DocumentStatus, Finding, JsonOut, RangeReport, ScanReport,
};
use crate::services::range::fmt_num;
use serde::Serialize;

pub fn print_out<T: Serialize>(
    json: bool,
    data: &[T],
    row: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok: true, data })?
        );
    } else {
        for d in data {
            println!("{}", row(d));
        }
    }
    Ok(())
}

/// Prints a single value; `ok` follows the caller's verdict.
pub fn print_one<T: Serialize>(
    json: bool,
    ok: bool,
    data: T,
    render: impl Fn(&T) -> String,
) -> anyhow::Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&JsonOut { ok, data })?
        );
    } else {
        println!("{}", render(&data));
    }
    Ok(())
}

fn status_label(status: DocumentStatus) -> &'static str {
    match status {
        DocumentStatus::Pass => "PASS",
        DocumentStatus::Fail => "FAIL",
    }
}

fn kind_label(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Section => "section",
        DocumentKind::Block => "block",
        DocumentKind::Snippet => "snippet",
        DocumentKind::Layout => "layout",
        DocumentKind::Template => "template",
        DocumentKind::Other => "other",
    }
}

pub fn render_finding(f: &Finding) -> String {
    let mut head = format!("  {}[{}]", f.severity, f.kind);
    if let Some(field) = &f.field {
        head.push(' ');
        head.push_str(field);
    }
    if let Some(line) = f.line {
        head.push_str(&format!(" line {}", line));
    }
    format!("{}: {}\n    fix: {}", head, f.message, f.remedy)
}

fn render_document(d: &DocumentReport) -> String {
    let mut out = format!(
        "{} {} ({}{})",
        status_label(d.status),
        d.path,
        kind_label(d.kind),
        if d.legacy { ", legacy" } else { "" }
    );
    for f in &d.findings {
        out.push('\n');
        out.push_str(&render_finding(f));
    }
    out
}

/// Text report: documents with findings, then a one-line summary.
pub fn render_scan(report: &ScanReport) -> String {
    let mut lines: Vec<String> = report
        .documents
        .iter()
        .filter(|d| !d.findings.is_empty())
        .map(render_document)
        .collect();
    let s = &report.summary;
    lines.push(format!(
        "{}: {} documents, {} passed, {} failed ({} errors, {} warnings){}",
        status_label(report.overall),
        s.documents,
        s.passed,
        s.failed,
        s.errors,
        s.warnings,
        if report.strict { " [strict]" } else { "" }
    ));
    lines.join("\n")
}

pub fn render_range(report: &RangeReport) -> String {
    let s = &report.setting;
    let mut out = format!(
        "{} range min={} max={} step={}",
        status_label(report.status),
        fmt_num(s.min),
        fmt_num(s.max),
        fmt_num(s.step)
    );
    if let Some(d) = s.default {
        out.push_str(&format!(" default={}", fmt_num(d)));
    }
    if let Some(unit) = &s.unit {
        out.push_str(&format!(" unit={}", unit));
    }
    match report.step_count {
        Some(c) => out.push_str(&format!(
            "\n  steps: {} (limit {})",
            if c.fract() == 0.0 { fmt_num(c) } else { format!("{:.2}", c) },
            report.max_steps
        )),
        None => out.push_str(&format!("\n  steps: n/a (limit {})", report.max_steps)),
    }
    for f in &report.findings {
        out.push('\n');
        out.push_str(&render_finding(f));
    }
    out
}
