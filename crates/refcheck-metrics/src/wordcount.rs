use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use refcheck_core::text_utils::{char_len, count_cjk};

use crate::MetricsConfig;
use crate::sections::{ManuscriptPart, split_manuscript};

static ENGLISH_WORD_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b[a-zA-Z]+\b").unwrap());
static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，。！？；：“”‘’（）、【】\[\]{}\-…—]").unwrap());

/// Abstract part estimates outside this range get a suggestion.
const ABSTRACT_PART_RANGE: (usize, usize) = (150, 350);
/// Body part estimates above this get a suggestion.
const BODY_PART_MAX: usize = 4500;

/// Character statistics of a text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TextStats {
    pub total_chars: usize,
    pub cjk_chars: usize,
    pub english_words: usize,
    pub digits: usize,
    pub punctuation: usize,
    /// Journal word estimate: total characters divided by 2.5, rounded down.
    pub estimated_words: usize,
}

/// Count characters, words and punctuation in `text` (trimmed).
pub fn count_text(text: &str) -> TextStats {
    let text = text.trim();
    let total_chars = char_len(text);
    TextStats {
        total_chars,
        cjk_chars: count_cjk(text),
        english_words: ENGLISH_WORD_RE.find_iter(text).count(),
        digits: text.chars().filter(char::is_ascii_digit).count(),
        punctuation: PUNCTUATION_RE.find_iter(text).count(),
        estimated_words: total_chars * 2 / 5,
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct WordCountReport {
    pub stats: TextStats,
    pub limit: usize,
    pub within_limit: bool,
    /// Estimated words over the limit.
    pub excess: Option<usize>,
    /// Estimate as a percentage of the limit, one decimal place.
    pub percentage: f64,
    /// Estimated words per non-empty manuscript part.
    pub parts: Vec<(ManuscriptPart, usize)>,
    pub suggestions: Vec<String>,
}

impl WordCountReport {
    pub fn message(&self) -> String {
        let words = self.stats.estimated_words;
        match self.excess {
            None => format!("word count ok: {} (limit {})", words, self.limit),
            Some(excess) => format!(
                "word count over limit: {} (limit {}, {} over)",
                words, self.limit, excess
            ),
        }
    }
}

/// Estimate the manuscript's word count and check it against the limit.
pub fn check_wordcount(text: &str, config: &MetricsConfig) -> WordCountReport {
    let stats = count_text(text);
    let limit = config.word_limit;
    let words = stats.estimated_words;
    let within_limit = words <= limit;
    let percentage = if limit == 0 {
        0.0
    } else {
        (words as f64 / limit as f64 * 1000.0).round() / 10.0
    };

    let manuscript = split_manuscript(text);
    let parts: Vec<(ManuscriptPart, usize)> = ManuscriptPart::ALL
        .into_iter()
        .filter_map(|part| {
            let body = manuscript.get(part);
            (!body.trim().is_empty()).then(|| (part, count_text(body).estimated_words))
        })
        .collect();

    let mut suggestions = Vec::new();
    if !within_limit {
        suggestions.push(
            "over the word limit; cut unnecessary content (see the per-part counts)".to_string(),
        );
    }
    for &(part, count) in &parts {
        match part {
            ManuscriptPart::Abstract
                if count < ABSTRACT_PART_RANGE.0 || count > ABSTRACT_PART_RANGE.1 =>
            {
                suggestions.push(format!(
                    "abstract is about {} words; keep it within {}-{} characters",
                    count, config.abstract_min_chars, config.abstract_max_chars
                ));
            }
            ManuscriptPart::Body if count > BODY_PART_MAX => {
                suggestions.push(format!("body is about {} words; condense it", count));
            }
            ManuscriptPart::Title if count_cjk(&manuscript.title) > config.title_max_chars => {
                suggestions.push(format!(
                    "title has more than {} Chinese characters",
                    config.title_max_chars
                ));
            }
            _ => {}
        }
    }

    tracing::debug!(words, limit, within_limit, "word count checked");
    WordCountReport {
        stats,
        limit,
        within_limit,
        excess: (!within_limit).then(|| words - limit),
        percentage,
        parts,
        suggestions,
    }
}
