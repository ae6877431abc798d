use std::path::{Path, PathBuf};

use thiserror::Error;

use refcheck_core::{Record, Report, ValidationConfig};

pub mod authors;
pub mod config;
pub mod parser;
pub mod schema;
pub mod section;

pub use authors::normalize_authors;
pub use config::{ListOverride, ParsingConfig, ParsingConfigBuilder};
pub use parser::ReferenceParser;
pub use schema::{RawFields, Recognizer, SCHEMA_TABLE, classify};
pub use section::{find_references_section, split_entries};

#[derive(Error, Debug)]
pub enum ParsingError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no reference entries found")]
    NoEntries,
}

/// Split a reference block into entries and parse each one.
pub fn parse_references(block: &str, config: &ParsingConfig) -> Vec<Record> {
    let parser = ReferenceParser::with_config(config.clone());
    let entries = parser.split_entries(block);
    parser.parse_all(&entries)
}

/// Run the whole pipeline on manuscript or reference-list text.
///
/// Pipeline:
/// 1. Locate the reference section (whole text if there is no heading)
/// 2. Split it into raw entries
/// 3. Classify each entry and extract its fields
/// 4. Validate the ordered batch
/// 5. Aggregate findings into a report
pub fn check_references(
    text: &str,
    parsing: &ParsingConfig,
    validation: &ValidationConfig,
) -> Report {
    let parser = ReferenceParser::with_config(parsing.clone());
    let block = parser.find_references_section(text);
    let entries = parser.split_entries(&block);
    let records = parser.parse_all(&entries);

    let findings = refcheck_core::validate(&records, validation);
    let report = refcheck_core::aggregate(records, findings);

    tracing::info!(
        records = report.total_records,
        unclassified = report.unclassified_count(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        valid = report.valid,
        "reference check complete"
    );
    report
}

/// Like [`check_references`], but rejects text that contains no entries.
pub fn check_references_text(
    text: &str,
    parsing: &ParsingConfig,
    validation: &ValidationConfig,
) -> Result<Report, ParsingError> {
    let report = check_references(text, parsing, validation);
    if report.total_records == 0 {
        return Err(ParsingError::NoEntries);
    }
    Ok(report)
}

/// Read a UTF-8 text file and check its reference list.
pub fn check_references_file(
    path: &Path,
    parsing: &ParsingConfig,
    validation: &ValidationConfig,
) -> Result<Report, ParsingError> {
    let text = std::fs::read_to_string(path).map_err(|source| ParsingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    check_references_text(&text, parsing, validation)
}
