use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ValidationConfig;
use crate::finding::{Finding, Issue};
use crate::text_utils::{char_len, contains_latin};
use crate::{Record, RecordBody, SchemaKind};

static YEAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{4}$").unwrap());
static PAGES_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+(?:-[0-9]+)?$").unwrap());

/// Validate an ordered batch of records.
///
/// Every record is checked independently; the only positional rule is
/// sequence continuity, which compares each record's declared number with
/// its 1-based position in `records`. Findings come back grouped by record
/// in batch order, and in rule order within a record.
pub fn validate(records: &[Record], config: &ValidationConfig) -> Vec<Finding> {
    let findings: Vec<Finding> = records
        .iter()
        .enumerate()
        .flat_map(|(index, record)| validate_record(index, record, config))
        .collect();

    tracing::debug!(
        records = records.len(),
        findings = findings.len(),
        "validation complete"
    );
    findings
}

/// Validate the record at batch position `index` (0-based).
///
/// Rules run in a fixed order:
/// 1. sequence continuity
/// 2. classification (an unclassified record stops here)
/// 3. author presence and truncation
/// 4. title presence and length
/// 5. year presence and shape
/// 6. style heuristics (warnings only)
pub fn validate_record(index: usize, record: &Record, config: &ValidationConfig) -> Vec<Finding> {
    let seq = record.sequence_number;
    let mut issues = Vec::new();

    let citation = match &record.body {
        RecordBody::Classified(c) => c,
        RecordBody::Unclassified { .. } => {
            // A missing marker on an unrecognized entry is part of the same
            // problem, so only a wrong number is reported alongside it.
            if let Some(actual) = seq
                && actual as usize != index + 1
            {
                issues.push(Issue::SequenceMismatch {
                    expected: index + 1,
                    actual,
                });
            }
            issues.push(Issue::Unclassified);
            return into_findings(index, seq, issues);
        }
    };

    // 1. Sequence continuity
    match seq {
        None => issues.push(Issue::MissingSequence),
        Some(actual) if actual as usize != index + 1 => issues.push(Issue::SequenceMismatch {
            expected: index + 1,
            actual,
        }),
        Some(_) => {}
    }

    // 3. Authors
    let authors = &citation.authors;
    if authors.is_empty() {
        issues.push(Issue::MissingAuthors);
    } else if authors.source_count > config.max_authors && !authors.marked {
        issues.push(Issue::MissingEtAl {
            count: authors.source_count,
            max: config.max_authors,
        });
    }

    // 4. Title
    let title = citation.title.trim();
    if title.is_empty() {
        issues.push(Issue::MissingTitle);
    } else {
        let length = char_len(title);
        if length > config.max_title_chars {
            issues.push(Issue::TitleTooLong {
                length,
                max: config.max_title_chars,
            });
        }
    }

    // 5. Year
    match citation.year.as_deref().map(str::trim) {
        None | Some("") => issues.push(Issue::MissingYear),
        Some(year) if !YEAR_RE.is_match(year) => issues.push(Issue::MalformedYear {
            year: year.to_string(),
        }),
        Some(_) => {}
    }

    // 6. Heuristics
    if citation.kind() == SchemaKind::Journal {
        let length = char_len(citation.source.trim());
        if length > config.max_venue_chars {
            issues.push(Issue::LongVenue {
                length,
                max: config.max_venue_chars,
            });
        }
    }
    if let Some(pages) = citation.pages.as_deref().map(str::trim)
        && !pages.is_empty()
        && !PAGES_RE.is_match(pages)
    {
        issues.push(Issue::MalformedPages {
            pages: pages.to_string(),
        });
    }
    if authors.listed().iter().any(|name| contains_latin(name)) {
        issues.push(Issue::LatinAuthorOrder);
    }

    into_findings(index, seq, issues)
}

fn into_findings(index: usize, seq: Option<u32>, issues: Vec<Issue>) -> Vec<Finding> {
    issues
        .into_iter()
        .map(|issue| Finding::new(index, seq, issue))
        .collect()
}
