use std::fmt;

use serde::Serialize;
use thiserror::Error;

pub mod config;
pub mod config_file;
pub mod finding;
pub mod render;
pub mod report;
pub mod text_utils;
pub mod validator;

// Re-export for convenience
pub use config::ValidationConfig;
pub use finding::{Finding, FindingCategory, Issue, Severity};
pub use report::{EXEMPLARS, Exemplar, RecordReport, Report, aggregate, exemplars};
pub use validator::{validate, validate_record};

/// Marker token appended to an author list that was cut down to the
/// first few authors.
pub const ET_AL: &str = "et al.";

/// The five literature types a reference entry can be classified as.
///
/// Declaration order is the classification priority order: when an entry
/// could satisfy more than one recognizer, the earliest kind wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    Journal,
    Monograph,
    ConferencePaper,
    Dissertation,
    Standard,
}

impl SchemaKind {
    /// All kinds in classification priority order.
    pub const PRIORITY: [SchemaKind; 5] = [
        SchemaKind::Journal,
        SchemaKind::Monograph,
        SchemaKind::ConferencePaper,
        SchemaKind::Dissertation,
        SchemaKind::Standard,
    ];

    /// The bracketed type marker that must appear inside an entry of this kind.
    pub fn type_marker(&self) -> &'static str {
        match self {
            Self::Journal => "[J]",
            Self::Monograph => "[M]",
            Self::ConferencePaper => "[C]",
            Self::Dissertation => "[D]",
            Self::Standard => "[S]",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Journal => "journal article",
            Self::Monograph => "monograph",
            Self::ConferencePaper => "conference paper",
            Self::Dissertation => "dissertation",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writing system of an author list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthorScript {
    /// At least one CJK ideograph; names are already surname-first.
    Cjk,
    #[default]
    Latin,
}

/// Normalized author list of one reference.
///
/// When the source listed more authors than the truncation threshold,
/// `names` holds the first `threshold` authors followed by [`ET_AL`] and
/// `truncated` is set. Otherwise `names` is the source list unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct AuthorList {
    pub names: Vec<String>,
    pub truncated: bool,
    /// Number of real authors in the source text (marker tokens excluded).
    pub source_count: usize,
    /// Whether the source text itself carried an et-al marker (`et al.`, `等`).
    pub marked: bool,
    pub script: AuthorScript,
}

impl AuthorList {
    /// Build a list from already-split author names.
    pub fn from_names(names: Vec<String>, marked: bool, max_listed: usize) -> Self {
        let script = if names.iter().any(|n| text_utils::contains_cjk(n)) {
            AuthorScript::Cjk
        } else {
            AuthorScript::Latin
        };
        let source_count = names.len();
        let truncated = source_count > max_listed;

        let mut names = names;
        if truncated {
            names.truncate(max_listed);
            names.push(ET_AL.to_string());
        }

        Self {
            names,
            truncated,
            source_count,
            marked,
            script,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.source_count == 0
    }

    /// Author names without the appended marker.
    pub fn listed(&self) -> &[String] {
        if self.truncated {
            &self.names[..self.names.len() - 1]
        } else {
            &self.names
        }
    }

    /// Whether the list, as cited, carries an et-al marker.
    pub fn has_marker(&self) -> bool {
        self.marked || self.truncated
    }
}

/// Schema-specific fields of a classified reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SchemaDetails {
    Journal {
        volume: Option<String>,
        issue: Option<String>,
    },
    Monograph {
        place: String,
    },
    ConferencePaper {
        editor: String,
        place: String,
        publisher: String,
    },
    Dissertation {
        place: String,
    },
    Standard {
        number: String,
        /// Year attached to the standard number (`GB/T 7714—2015`).
        issued: String,
        place: String,
    },
}

impl SchemaDetails {
    pub fn kind(&self) -> SchemaKind {
        match self {
            Self::Journal { .. } => SchemaKind::Journal,
            Self::Monograph { .. } => SchemaKind::Monograph,
            Self::ConferencePaper { .. } => SchemaKind::ConferencePaper,
            Self::Dissertation { .. } => SchemaKind::Dissertation,
            Self::Standard { .. } => SchemaKind::Standard,
        }
    }
}

/// Typed fields extracted from an entry that matched a schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub authors: AuthorList,
    pub title: String,
    /// Journal name, publisher, proceedings title or institution, depending on kind.
    pub source: String,
    pub year: Option<String>,
    pub pages: Option<String>,
    pub details: SchemaDetails,
}

impl Citation {
    pub fn kind(&self) -> SchemaKind {
        self.details.kind()
    }

    pub fn volume(&self) -> Option<&str> {
        match &self.details {
            SchemaDetails::Journal { volume, .. } => volume.as_deref(),
            _ => None,
        }
    }

    pub fn issue(&self) -> Option<&str> {
        match &self.details {
            SchemaDetails::Journal { issue, .. } => issue.as_deref(),
            _ => None,
        }
    }
}

/// Outcome of classifying one entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RecordBody {
    /// No schema matched. Only the sequence number and raw text are known.
    Unclassified { note: String },
    Classified(Citation),
}

/// Parsed representation of one raw reference entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    /// Number from the leading `[n]` marker, if present.
    pub sequence_number: Option<u32>,
    pub raw_text: String,
    pub body: RecordBody,
}

impl Record {
    pub fn classified(sequence_number: Option<u32>, raw_text: String, citation: Citation) -> Self {
        Self {
            sequence_number,
            raw_text,
            body: RecordBody::Classified(citation),
        }
    }

    pub fn unclassified(
        sequence_number: Option<u32>,
        raw_text: String,
        note: impl Into<String>,
    ) -> Self {
        Self {
            sequence_number,
            raw_text,
            body: RecordBody::Unclassified { note: note.into() },
        }
    }

    pub fn kind(&self) -> Option<SchemaKind> {
        self.citation().map(Citation::kind)
    }

    pub fn citation(&self) -> Option<&Citation> {
        match &self.body {
            RecordBody::Classified(c) => Some(c),
            RecordBody::Unclassified { .. } => None,
        }
    }

    pub fn is_classified(&self) -> bool {
        matches!(self.body, RecordBody::Classified(_))
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}
