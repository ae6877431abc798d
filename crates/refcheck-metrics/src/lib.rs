//! Manuscript-level scalar checks: title wording and length, abstract
//! length, person and structure, and overall word count.
//!
//! These checks are independent of the reference engine and of each other.

use refcheck_core::config_file::ConfigFile;

pub mod abstract_check;
pub mod sections;
pub mod title;
pub mod wordcount;

pub use abstract_check::{AbstractReport, StructureElement, check_abstract};
pub use sections::{ManuscriptPart, ManuscriptParts, split_manuscript};
pub use title::{EXAMPLE_TITLES, TitleProblem, TitleReport, check_title, title_from_text};
pub use wordcount::{TextStats, WordCountReport, check_wordcount, count_text};

/// Limits used by the manuscript checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricsConfig {
    /// Maximum CJK characters in a title.
    pub title_max_chars: usize,
    /// Titles with fewer CJK characters are flagged as uninformative.
    pub title_min_chars: usize,
    pub abstract_min_chars: usize,
    pub abstract_max_chars: usize,
    /// Estimated word limit for the whole manuscript.
    pub word_limit: usize,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            title_max_chars: 20,
            title_min_chars: 8,
            abstract_min_chars: 200,
            abstract_max_chars: 300,
            word_limit: 6000,
        }
    }
}

impl MetricsConfig {
    /// Limits from the `[metrics]` table of a config file, falling back to
    /// defaults for unset values.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let Some(m) = file.metrics.as_ref() else {
            return defaults;
        };
        Self {
            title_max_chars: m.title_max_chars.unwrap_or(defaults.title_max_chars),
            title_min_chars: m.title_min_chars.unwrap_or(defaults.title_min_chars),
            abstract_min_chars: m.abstract_min_chars.unwrap_or(defaults.abstract_min_chars),
            abstract_max_chars: m.abstract_max_chars.unwrap_or(defaults.abstract_max_chars),
            word_limit: m.word_limit.unwrap_or(defaults.word_limit),
        }
    }
}
