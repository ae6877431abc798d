use std::io::Write;
use std::path::Path;

use serde::Serialize;

use refcheck_core::{Exemplar, RecordBody, RecordReport, Report, exemplars};

use crate::{ExportError, ExportFormat};

/// Render a report in the given format.
///
/// Exemplars are appended as remediation guidance when `with_exemplars` is
/// set and the report has errors.
pub fn render_report(
    report: &Report,
    format: ExportFormat,
    with_exemplars: bool,
) -> Result<String, ExportError> {
    let examples = (with_exemplars && !report.valid).then(exemplars);
    Ok(match format {
        ExportFormat::Text => export_text(report, examples),
        ExportFormat::Markdown => export_markdown(report, examples),
        ExportFormat::Json => export_json(report, examples)?,
    })
}

/// Render a report and write it to `path`.
pub fn export_report(
    report: &Report,
    format: ExportFormat,
    with_exemplars: bool,
    path: &Path,
) -> Result<(), ExportError> {
    let content = render_report(report, format, with_exemplars)?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn verdict_str(report: &Report) -> &'static str {
    if report.valid { "PASS" } else { "FAIL" }
}

fn summary_line(report: &Report) -> String {
    format!(
        "{} references | {} errors | {} warnings | {} unclassified",
        report.total_records,
        report.error_count(),
        report.warning_count(),
        report.unclassified_count(),
    )
}

fn record_label(r: &RecordReport) -> String {
    match &r.record.body {
        RecordBody::Classified(c) => c.kind().to_string(),
        RecordBody::Unclassified { .. } => "unclassified".to_string(),
    }
}

fn record_number(r: &RecordReport) -> String {
    match r.record.sequence_number {
        Some(n) => format!("[{}]", n),
        None => format!("#{}", r.index + 1),
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    #[serde(flatten)]
    report: &'a Report,
    #[serde(skip_serializing_if = "Option::is_none")]
    exemplars: Option<&'static [Exemplar]>,
}

fn export_json(
    report: &Report,
    examples: Option<&'static [Exemplar]>,
) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        report,
        exemplars: examples,
    })
}

fn md_escape(s: &str) -> String {
    s.replace('|', "\\|")
}

fn export_markdown(report: &Report, examples: Option<&'static [Exemplar]>) -> String {
    let badge = if report.valid { "\u{2713} PASS" } else { "\u{2717} FAIL" };
    let mut out = format!("# Reference Check Report \u{2014} {}\n\n", badge);
    out.push_str(&format!("**{}**\n\n", summary_line(report)));

    if !report.errors.is_empty() {
        out.push_str("## Errors\n\n");
        for e in &report.errors {
            out.push_str(&format!("- {}\n", md_escape(e)));
        }
        out.push('\n');
    }
    if !report.warnings.is_empty() {
        out.push_str("## Warnings\n\n");
        for w in &report.warnings {
            out.push_str(&format!("- {}\n", md_escape(w)));
        }
        out.push('\n');
    }

    if !report.records.is_empty() {
        out.push_str("## References\n\n");
        out.push_str("| # | Type | Errors | Warnings |\n|---|---|---|---|\n");
        for r in &report.records {
            let errors = r.findings.iter().filter(|f| f.is_error()).count();
            out.push_str(&format!(
                "| {} | {} | {} | {} |\n",
                record_number(r),
                record_label(r),
                errors,
                r.findings.len() - errors,
            ));
        }
        out.push('\n');
    }

    if let Some(examples) = examples {
        out.push_str("## Correctly Formatted Examples\n\n");
        for e in examples {
            out.push_str(&format!("- *{}*: `{}`\n", e.kind, e.text));
        }
        out.push('\n');
    }
    out
}

fn export_text(report: &Report, examples: Option<&'static [Exemplar]>) -> String {
    let mut out = String::from("Reference Check Report\n");
    out.push_str(&"=".repeat(60));
    out.push('\n');
    out.push_str(&format!("Verdict: {}\n", verdict_str(report)));
    out.push_str(&format!("  {}\n\n", summary_line(report)));

    for r in &report.records {
        out.push_str(&format!("  {} {}\n", record_number(r), record_label(r)));
        if let RecordBody::Unclassified { note } = &r.record.body {
            out.push_str(&format!("       Note: {}\n", note));
        }
        for f in &r.findings {
            out.push_str(&format!("       {}: {}\n", f.severity, f.message));
        }
    }

    if !report.errors.is_empty() {
        out.push_str("\nErrors\n");
        out.push_str(&"-".repeat(6));
        out.push('\n');
        for e in &report.errors {
            out.push_str(&format!("  {}\n", e));
        }
    }
    if !report.warnings.is_empty() {
        out.push_str("\nWarnings\n");
        out.push_str(&"-".repeat(8));
        out.push('\n');
        for w in &report.warnings {
            out.push_str(&format!("  {}\n", w));
        }
    }

    if let Some(examples) = examples {
        out.push_str("\nCorrectly formatted examples\n");
        out.push_str(&"-".repeat(28));
        out.push('\n');
        for e in examples {
            out.push_str(&format!("  ({}) {}\n", e.kind, e.text));
        }
    }
    out
}
