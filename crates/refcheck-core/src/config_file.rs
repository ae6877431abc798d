use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;
use crate::config::ValidationConfig;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    pub validation: Option<ValidationSection>,
    pub parsing: Option<ParsingSection>,
    pub metrics: Option<MetricsSection>,
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ValidationSection {
    pub max_authors: Option<usize>,
    pub max_title_chars: Option<usize>,
    pub max_venue_chars: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsingSection {
    pub section_header_regex: Option<String>,
    pub section_end_regex: Option<String>,
    /// Extra tokens accepted as et-al markers in source author lists.
    pub et_al_markers: Option<Vec<String>>,
    pub normalize_width: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsSection {
    pub title_max_chars: Option<usize>,
    pub title_min_chars: Option<usize>,
    pub abstract_min_chars: Option<usize>,
    pub abstract_max_chars: Option<usize>,
    pub word_limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub color: Option<bool>,
    pub show_examples: Option<bool>,
}

impl ConfigFile {
    /// Validation thresholds, falling back to defaults for unset values.
    pub fn validation_config(&self) -> ValidationConfig {
        let defaults = ValidationConfig::default();
        let section = self.validation.as_ref();
        ValidationConfig {
            max_authors: section
                .and_then(|v| v.max_authors)
                .unwrap_or(defaults.max_authors),
            max_title_chars: section
                .and_then(|v| v.max_title_chars)
                .unwrap_or(defaults.max_title_chars),
            max_venue_chars: section
                .and_then(|v| v.max_venue_chars)
                .unwrap_or(defaults.max_venue_chars),
        }
    }
}

/// Platform config directory path: `<config_dir>/refcheck/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("refcheck").join("config.toml"))
}

/// Load config by cascading CWD `.refcheck.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".refcheck.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    if !path.exists() {
        return None;
    }
    match read_config(path) {
        Ok(config) => Some(config),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

/// Read and parse a config file, reporting any failure.
pub fn read_config(path: &Path) -> Result<ConfigFile, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

fn pick<S, T>(overlay: Option<&S>, base: Option<&S>, field: impl Fn(&S) -> Option<T>) -> Option<T> {
    overlay.and_then(&field).or_else(|| base.and_then(&field))
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    let (bv, ov) = (base.validation.as_ref(), overlay.validation.as_ref());
    let (bp, op) = (base.parsing.as_ref(), overlay.parsing.as_ref());
    let (bm, om) = (base.metrics.as_ref(), overlay.metrics.as_ref());
    let (bd, od) = (base.display.as_ref(), overlay.display.as_ref());

    ConfigFile {
        validation: Some(ValidationSection {
            max_authors: pick(ov, bv, |v| v.max_authors),
            max_title_chars: pick(ov, bv, |v| v.max_title_chars),
            max_venue_chars: pick(ov, bv, |v| v.max_venue_chars),
        }),
        parsing: Some(ParsingSection {
            section_header_regex: pick(op, bp, |p| p.section_header_regex.clone()),
            section_end_regex: pick(op, bp, |p| p.section_end_regex.clone()),
            et_al_markers: pick(op, bp, |p| p.et_al_markers.clone()),
            normalize_width: pick(op, bp, |p| p.normalize_width),
        }),
        metrics: Some(MetricsSection {
            title_max_chars: pick(om, bm, |m| m.title_max_chars),
            title_min_chars: pick(om, bm, |m| m.title_min_chars),
            abstract_min_chars: pick(om, bm, |m| m.abstract_min_chars),
            abstract_max_chars: pick(om, bm, |m| m.abstract_max_chars),
            word_limit: pick(om, bm, |m| m.word_limit),
        }),
        display: Some(DisplayConfig {
            color: pick(od, bd, |d| d.color),
            show_examples: pick(od, bd, |d| d.show_examples),
        }),
    }
}
