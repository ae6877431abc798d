use regex::Regex;

use refcheck_core::config_file::ConfigFile;

/// Controls how a list of patterns/values is overridden from its defaults.
#[derive(Debug, Clone, Default)]
pub enum ListOverride<T> {
    /// Use the built-in defaults.
    #[default]
    Default,
    /// Completely replace the defaults with these values.
    Replace(Vec<T>),
    /// Append these values to the defaults.
    Extend(Vec<T>),
}

impl<T: Clone> ListOverride<T> {
    /// Resolve this override against the given defaults.
    pub fn resolve(&self, defaults: &[T]) -> Vec<T> {
        match self {
            ListOverride::Default => defaults.to_vec(),
            ListOverride::Replace(v) => v.clone(),
            ListOverride::Extend(v) => {
                let mut result = defaults.to_vec();
                result.extend(v.iter().cloned());
                result
            }
        }
    }
}

/// Tokens recognized as an et-al marker inside a source author list.
pub const DEFAULT_ET_AL_MARKERS: &[&str] = &["et al.", "et al", "等", "等."];

/// Configuration for the reference parsing pipeline.
///
/// Regex fields are `Option<Regex>`; `None` means "use the built-in default".
/// Use [`ParsingConfigBuilder`] to construct with string patterns.
#[derive(Debug, Clone)]
pub struct ParsingConfig {
    // ── section.rs ──
    /// Regex to locate the references section heading.
    pub(crate) section_header_re: Option<Regex>,
    /// Regex to find the first heading after the references section.
    pub(crate) section_end_re: Option<Regex>,

    // ── authors.rs ──
    /// Source tokens treated as et-al markers.
    pub(crate) et_al_markers: ListOverride<String>,
    /// Authors kept before the list is truncated (default: 3).
    pub(crate) max_listed_authors: usize,

    // ── parser.rs ──
    /// NFKC-normalize entries before matching, so full-width punctuation
    /// matches the ASCII separators (default: true).
    pub(crate) normalize_width: bool,
}

impl Default for ParsingConfig {
    fn default() -> Self {
        Self {
            section_header_re: None,
            section_end_re: None,
            et_al_markers: ListOverride::Default,
            max_listed_authors: 3,
            normalize_width: true,
        }
    }
}

impl ParsingConfig {
    /// Resolved et-al marker tokens.
    pub(crate) fn et_al_markers(&self) -> Vec<String> {
        let defaults: Vec<String> = DEFAULT_ET_AL_MARKERS
            .iter()
            .map(|m| m.to_string())
            .collect();
        self.et_al_markers.resolve(&defaults)
    }

    pub fn max_listed_authors(&self) -> usize {
        self.max_listed_authors
    }
}

/// Builder for [`ParsingConfig`].
///
/// Accepts string patterns that are compiled to `Regex` in [`build()`](Self::build).
/// Fails fast with `regex::Error` if any pattern is invalid.
#[derive(Debug, Clone, Default)]
pub struct ParsingConfigBuilder {
    section_header_re: Option<String>,
    section_end_re: Option<String>,
    et_al_markers: ListOverride<String>,
    max_listed_authors: Option<usize>,
    normalize_width: Option<bool>,
}

impl ParsingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Section header / end ──

    pub fn section_header_regex(mut self, pattern: &str) -> Self {
        self.section_header_re = Some(pattern.to_string());
        self
    }

    pub fn section_end_regex(mut self, pattern: &str) -> Self {
        self.section_end_re = Some(pattern.to_string());
        self
    }

    // ── Et-al markers ──

    pub fn set_et_al_markers(mut self, markers: Vec<String>) -> Self {
        self.et_al_markers = ListOverride::Replace(markers);
        self
    }

    pub fn add_et_al_marker(mut self, marker: String) -> Self {
        match &mut self.et_al_markers {
            ListOverride::Extend(v) => v.push(marker),
            _ => self.et_al_markers = ListOverride::Extend(vec![marker]),
        }
        self
    }

    // ── Scalars ──

    pub fn max_listed_authors(mut self, n: usize) -> Self {
        self.max_listed_authors = Some(n);
        self
    }

    pub fn normalize_width(mut self, enabled: bool) -> Self {
        self.normalize_width = Some(enabled);
        self
    }

    /// Seed a builder from the `[parsing]` table of a config file.
    ///
    /// Markers listed in the file extend the defaults, and the truncation
    /// threshold follows `validation.max_authors` so both stages agree.
    pub fn from_config_file(file: &ConfigFile) -> Self {
        let mut builder = Self::new();
        if let Some(max) = file.validation.as_ref().and_then(|v| v.max_authors) {
            builder = builder.max_listed_authors(max);
        }
        let Some(parsing) = file.parsing.as_ref() else {
            return builder;
        };
        if let Some(re) = &parsing.section_header_regex {
            builder = builder.section_header_regex(re);
        }
        if let Some(re) = &parsing.section_end_regex {
            builder = builder.section_end_regex(re);
        }
        for marker in parsing.et_al_markers.iter().flatten() {
            builder = builder.add_et_al_marker(marker.clone());
        }
        if let Some(enabled) = parsing.normalize_width {
            builder = builder.normalize_width(enabled);
        }
        builder
    }

    /// Compile all string patterns into regexes and produce a [`ParsingConfig`].
    pub fn build(self) -> Result<ParsingConfig, regex::Error> {
        let compile = |opt: Option<String>| -> Result<Option<Regex>, regex::Error> {
            opt.map(|p| Regex::new(&p)).transpose()
        };

        Ok(ParsingConfig {
            section_header_re: compile(self.section_header_re)?,
            section_end_re: compile(self.section_end_re)?,
            et_al_markers: self.et_al_markers,
            max_listed_authors: self.max_listed_authors.unwrap_or(3),
            normalize_width: self.normalize_width.unwrap_or(true),
        })
    }
}
