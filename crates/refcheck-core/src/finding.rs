use std::fmt;

use serde::Serialize;

/// How urgently a finding must be addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Must be fixed before submission.
    Error,
    /// Discouraged but not invalid.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("error"),
            Severity::Warning => f.write_str("warning"),
        }
    }
}

/// Broad class of a finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingCategory {
    /// The entry matched no schema.
    ClassificationFailure,
    /// A required field is absent or malformed.
    FieldError,
    /// A discouraged but non-fatal pattern.
    StyleWarning,
    /// The declared number does not match the entry's position.
    SequenceError,
}

/// A single problem detected by the validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum Issue {
    MissingSequence,
    SequenceMismatch { expected: usize, actual: u32 },
    Unclassified,
    MissingAuthors,
    MissingEtAl { count: usize, max: usize },
    MissingTitle,
    TitleTooLong { length: usize, max: usize },
    MissingYear,
    MalformedYear { year: String },
    LongVenue { length: usize, max: usize },
    MalformedPages { pages: String },
    LatinAuthorOrder,
}

impl Issue {
    pub fn severity(&self) -> Severity {
        match self {
            Issue::TitleTooLong { .. }
            | Issue::LongVenue { .. }
            | Issue::MalformedPages { .. }
            | Issue::LatinAuthorOrder => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn category(&self) -> FindingCategory {
        match self {
            Issue::MissingSequence | Issue::SequenceMismatch { .. } => {
                FindingCategory::SequenceError
            }
            Issue::Unclassified => FindingCategory::ClassificationFailure,
            Issue::MissingAuthors
            | Issue::MissingEtAl { .. }
            | Issue::MissingTitle
            | Issue::MissingYear
            | Issue::MalformedYear { .. } => FindingCategory::FieldError,
            Issue::TitleTooLong { .. }
            | Issue::LongVenue { .. }
            | Issue::MalformedPages { .. }
            | Issue::LatinAuthorOrder => FindingCategory::StyleWarning,
        }
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::MissingSequence => write!(f, "missing sequence number"),
            Issue::SequenceMismatch { expected, actual } => write!(
                f,
                "sequence number out of order: expected {}, found {}",
                expected, actual
            ),
            Issue::Unclassified => write!(f, "type not recognized"),
            Issue::MissingAuthors => write!(f, "missing authors"),
            Issue::MissingEtAl { count, max } => write!(
                f,
                "{} authors listed: more than {} authors must be marked with an et-al marker",
                count, max
            ),
            Issue::MissingTitle => write!(f, "missing title"),
            Issue::TitleTooLong { length, max } => write!(
                f,
                "title is {} characters long (recommended at most {})",
                length, max
            ),
            Issue::MissingYear => write!(f, "missing publication year"),
            Issue::MalformedYear { year } => write!(f, "malformed year: {}", year),
            Issue::LongVenue { length, max } => write!(
                f,
                "journal name is {} characters long (over {}); use its abbreviation",
                length, max
            ),
            Issue::MalformedPages { pages } => write!(
                f,
                "page range \"{}\" should be \"digits-digits\" or \"digits\"",
                pages
            ),
            Issue::LatinAuthorOrder => {
                write!(f, "foreign author names should be written family name first")
            }
        }
    }
}

/// One validator output unit, keyed by the record's position in the batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    /// 0-based position of the record in the batch.
    pub index: usize,
    /// Sequence number the record declared, for display.
    pub sequence_number: Option<u32>,
    pub severity: Severity,
    pub category: FindingCategory,
    pub issue: Issue,
    pub message: String,
}

impl Finding {
    pub fn new(index: usize, sequence_number: Option<u32>, issue: Issue) -> Self {
        Self {
            index,
            sequence_number,
            severity: issue.severity(),
            category: issue.category(),
            message: issue.to_string(),
            issue,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Message prefixed with the record's 1-based position.
    pub fn labeled(&self) -> String {
        format!("Reference {}: {}", self.index + 1, self.message)
    }
}
