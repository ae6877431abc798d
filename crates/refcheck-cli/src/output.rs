use std::io::Write;

use owo_colors::OwoColorize;

use refcheck_core::{RecordBody, RecordReport, Report, Severity, exemplars};
use refcheck_metrics::{AbstractReport, MetricsConfig, TitleReport, WordCountReport};

/// Whether to use colored output.
#[derive(Debug, Clone, Copy)]
pub struct ColorMode(pub bool);

impl ColorMode {
    pub fn enabled(&self) -> bool {
        self.0
    }
}

fn print_banner(w: &mut dyn Write, heading: &str, color: ColorMode) -> std::io::Result<()> {
    let sep = "=".repeat(60);
    if color.enabled() {
        writeln!(w, "{}", sep.bold())?;
        writeln!(w, "{}", heading.bold())?;
        writeln!(w, "{}", sep.bold())?;
    } else {
        writeln!(w, "{}", sep)?;
        writeln!(w, "{}", heading)?;
        writeln!(w, "{}", sep)?;
    }
    Ok(())
}

fn print_verdict(w: &mut dyn Write, ok: bool, color: ColorMode) -> std::io::Result<()> {
    match (ok, color.enabled()) {
        (true, true) => writeln!(w, "{} {}", "Verdict:".bold(), "PASS".green().bold()),
        (false, true) => writeln!(w, "{} {}", "Verdict:".bold(), "FAIL".red().bold()),
        (true, false) => writeln!(w, "Verdict: PASS"),
        (false, false) => writeln!(w, "Verdict: FAIL"),
    }
}

fn print_suggestions(
    w: &mut dyn Write,
    suggestions: &[String],
    color: ColorMode,
) -> std::io::Result<()> {
    if suggestions.is_empty() {
        return Ok(());
    }
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}", "Suggestions:".bold())?;
    } else {
        writeln!(w, "Suggestions:")?;
    }
    for s in suggestions {
        writeln!(w, "  • {}", s)?;
    }
    Ok(())
}

fn record_heading(r: &RecordReport) -> String {
    let number = match r.record.sequence_number {
        Some(n) => format!("[{}]", n),
        None => format!("#{}", r.index + 1),
    };
    match &r.record.body {
        RecordBody::Classified(c) => format!("{} {}", number, c.kind()),
        RecordBody::Unclassified { .. } => format!("{} unclassified", number),
    }
}

/// Print the reference check report: one block per record, then the verdict.
pub fn print_report(
    w: &mut dyn Write,
    report: &Report,
    show_examples: bool,
    color: ColorMode,
) -> std::io::Result<()> {
    print_banner(w, "REFERENCE CHECK", color)?;
    writeln!(w)?;

    for r in &report.records {
        let heading = record_heading(r);
        if color.enabled() {
            if r.has_errors() {
                writeln!(w, "{}", heading.red())?;
            } else if r.findings.is_empty() {
                writeln!(w, "{}", heading.green())?;
            } else {
                writeln!(w, "{}", heading.yellow())?;
            }
        } else {
            writeln!(w, "{}", heading)?;
        }

        if let RecordBody::Unclassified { note } = &r.record.body {
            if color.enabled() {
                writeln!(w, "    {}", note.dimmed())?;
            } else {
                writeln!(w, "    {}", note)?;
            }
        }

        for f in &r.findings {
            match (f.severity, color.enabled()) {
                (Severity::Error, true) => writeln!(w, "    {} {}", "ERROR:".red(), f.message)?,
                (Severity::Warning, true) => {
                    writeln!(w, "    {} {}", "WARNING:".yellow(), f.message)?
                }
                (Severity::Error, false) => writeln!(w, "    ERROR: {}", f.message)?,
                (Severity::Warning, false) => writeln!(w, "    WARNING: {}", f.message)?,
            }
        }
    }

    writeln!(w)?;
    let summary = format!(
        "{} references | {} errors | {} warnings | {} unclassified",
        report.total_records,
        report.error_count(),
        report.warning_count(),
        report.unclassified_count(),
    );
    if color.enabled() {
        writeln!(w, "{}", summary.dimmed())?;
    } else {
        writeln!(w, "{}", summary)?;
    }
    print_verdict(w, report.valid, color)?;

    if show_examples && !report.valid {
        writeln!(w)?;
        print_exemplars(w, color)?;
    }
    Ok(())
}

/// Print the correctly formatted example for each literature type.
pub fn print_exemplars(w: &mut dyn Write, color: ColorMode) -> std::io::Result<()> {
    if color.enabled() {
        writeln!(w, "{}", "Correctly formatted examples (GB/T 7714):".bold())?;
    } else {
        writeln!(w, "Correctly formatted examples (GB/T 7714):")?;
    }
    for e in exemplars() {
        if color.enabled() {
            writeln!(w, "  {} {}", format!("({})", e.kind).dimmed(), e.text.cyan())?;
        } else {
            writeln!(w, "  ({}) {}", e.kind, e.text)?;
        }
    }
    Ok(())
}

pub fn print_title_report(
    w: &mut dyn Write,
    report: &TitleReport,
    color: ColorMode,
) -> std::io::Result<()> {
    print_banner(w, "TITLE CHECK", color)?;
    writeln!(w)?;
    if color.enabled() {
        writeln!(w, "{}:", "Title".bold())?;
        writeln!(w, "  {}", report.title.cyan())?;
    } else {
        writeln!(w, "Title:")?;
        writeln!(w, "  {}", report.title)?;
    }
    writeln!(w, "Chinese characters: {}", report.cjk_count)?;
    writeln!(w)?;

    for p in &report.problems {
        if color.enabled() {
            writeln!(w, "  {} {}", "✗".red(), p)?;
        } else {
            writeln!(w, "  ✗ {}", p)?;
        }
    }
    print_verdict(w, report.valid, color)?;
    print_suggestions(w, &report.suggestions, color)
}

pub fn print_abstract_report(
    w: &mut dyn Write,
    report: &AbstractReport,
    config: &MetricsConfig,
    color: ColorMode,
) -> std::io::Result<()> {
    print_banner(w, "ABSTRACT CHECK", color)?;
    writeln!(w)?;

    let checks = [
        (report.length_ok, report.length_message(config)),
        (report.first_person.is_empty(), report.person_message()),
        (report.missing_elements.is_empty(), report.structure_message()),
    ];
    for (ok, message) in &checks {
        match (ok, color.enabled()) {
            (true, true) => writeln!(w, "  {} {}", "✓".green(), message)?,
            (false, true) => writeln!(w, "  {} {}", "✗".red(), message)?,
            (true, false) => writeln!(w, "  ✓ {}", message)?,
            (false, false) => writeln!(w, "  ✗ {}", message)?,
        }
    }
    writeln!(w)?;
    print_verdict(w, report.valid, color)?;
    print_suggestions(w, &report.suggestions, color)
}

pub fn print_wordcount_report(
    w: &mut dyn Write,
    report: &WordCountReport,
    color: ColorMode,
) -> std::io::Result<()> {
    print_banner(w, "WORD COUNT", color)?;
    writeln!(w)?;

    let stats = &report.stats;
    writeln!(w, "Characters:        {}", stats.total_chars)?;
    writeln!(w, "Chinese:           {}", stats.cjk_chars)?;
    writeln!(w, "English words:     {}", stats.english_words)?;
    writeln!(w, "Digits:            {}", stats.digits)?;
    writeln!(w, "Punctuation:       {}", stats.punctuation)?;
    writeln!(
        w,
        "Estimated words:   {} ({:.1}% of {})",
        stats.estimated_words, report.percentage, report.limit
    )?;

    if !report.parts.is_empty() {
        writeln!(w)?;
        writeln!(w, "By part:")?;
        for (part, count) in &report.parts {
            writeln!(w, "  {:<12} {}", part.to_string(), count)?;
        }
    }

    writeln!(w)?;
    let message = report.message();
    match (report.within_limit, color.enabled()) {
        (true, true) => writeln!(w, "{}", message.green())?,
        (false, true) => writeln!(w, "{}", message.red())?,
        _ => writeln!(w, "{}", message)?,
    }
    print_suggestions(w, &report.suggestions, color)
}
