use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use refcheck_core::text_utils::{char_len, count_cjk};

use crate::MetricsConfig;

/// Filler endings that add no information to a title.
pub const REDUNDANT_PHRASES: &[&str] = &[
    "的研究",
    "的探索",
    "的实践",
    "的思考",
    "的探讨",
    "的分析",
    "的调查",
    "的研究报告",
    "的初步研究",
];

const WEAK_OPENINGS: &[&str] = &["关于", "对"];

/// Well-formed titles shown alongside suggestions.
pub const EXAMPLE_TITLES: [&str; 5] = [
    "AI赋能微处理器设计课程改革",
    "大模型融入计算机公共基础教学",
    "计算机网络课程思政建设实践",
    "软件需求工程教学改革探索",
    "无人机仿真Python教学创新",
];

static PUNCTUATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[，。！？；：“”‘’（）【】\[\]{}\-…—]").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "problem", rename_all = "snake_case")]
pub enum TitleProblem {
    NoCjk,
    TooLong { count: usize, max: usize },
    RedundantPhrase { phrase: &'static str },
    TooShort { count: usize, min: usize },
    MissingKeyword,
    Punctuation,
    WeakOpening { word: &'static str },
}

impl TitleProblem {
    /// Length problems make a title invalid on their own; the rest are
    /// wording problems.
    pub fn is_length_problem(&self) -> bool {
        matches!(self, Self::NoCjk | Self::TooLong { .. })
    }

    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::NoCjk => "write the title in Chinese",
            Self::TooLong { .. } => "shorten the title to its core subject",
            Self::RedundantPhrase { .. } => "drop filler words to make the title concise",
            Self::TooShort { .. } => "add the research content to make the title specific",
            Self::MissingKeyword => "add \"计算机\" or \"教育\" to reflect the journal's scope",
            Self::Punctuation => "remove all punctuation",
            Self::WeakOpening { .. } => "state the subject directly instead of opening with \"关于\"",
        }
    }
}

impl fmt::Display for TitleProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCjk => write!(f, "title contains no Chinese characters"),
            Self::TooLong { count, max } => {
                write!(f, "title has {} Chinese characters, limit is {}", count, max)
            }
            Self::RedundantPhrase { phrase } => write!(f, "contains filler phrase \"{}\"", phrase),
            Self::TooShort { count, min } => write!(
                f,
                "title has only {} Chinese characters (fewer than {}), may lack information",
                count, min
            ),
            Self::MissingKeyword => write!(f, "title mentions neither \"计算机\" nor \"教育\""),
            Self::Punctuation => write!(f, "title contains punctuation"),
            Self::WeakOpening { word } => write!(f, "title opens with \"{}\"", word),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TitleReport {
    pub title: String,
    pub cjk_count: usize,
    pub valid: bool,
    pub problems: Vec<TitleProblem>,
    /// One line per distinct problem kind, then the example titles.
    pub suggestions: Vec<String>,
}

impl TitleReport {
    pub fn length_ok(&self) -> bool {
        !self.problems.iter().any(TitleProblem::is_length_problem)
    }
}

/// Check a manuscript title.
///
/// Any problem, length or wording, makes the title invalid.
pub fn check_title(title: &str, config: &MetricsConfig) -> TitleReport {
    let title = title.trim();
    let cjk_count = count_cjk(title);
    let mut problems = Vec::new();

    if cjk_count == 0 {
        problems.push(TitleProblem::NoCjk);
    } else if cjk_count > config.title_max_chars {
        problems.push(TitleProblem::TooLong {
            count: cjk_count,
            max: config.title_max_chars,
        });
    }

    for &phrase in REDUNDANT_PHRASES {
        if title.contains(phrase) {
            problems.push(TitleProblem::RedundantPhrase { phrase });
        }
    }
    if cjk_count < config.title_min_chars {
        problems.push(TitleProblem::TooShort {
            count: cjk_count,
            min: config.title_min_chars,
        });
    }
    if !title.contains("计算机") && !title.contains("教育") {
        problems.push(TitleProblem::MissingKeyword);
    }
    if PUNCTUATION_RE.is_match(title) {
        problems.push(TitleProblem::Punctuation);
    }
    if let Some(&word) = WEAK_OPENINGS.iter().find(|w| title.starts_with(**w)) {
        problems.push(TitleProblem::WeakOpening { word });
    }

    let mut suggestions: Vec<String> = Vec::new();
    if !problems.is_empty() {
        for problem in &problems {
            let s = problem.suggestion();
            if !suggestions.iter().any(|existing| existing == s) {
                suggestions.push(s.to_string());
            }
        }
        suggestions.push(format!("examples: {}", EXAMPLE_TITLES.join(", ")));
    }

    tracing::debug!(cjk_count, problems = problems.len(), "title checked");
    TitleReport {
        title: title.to_string(),
        cjk_count,
        valid: problems.is_empty(),
        problems,
        suggestions,
    }
}

/// Guess the title line of a manuscript file.
///
/// Looks at the first ten lines for a short line that mentions the research
/// subject, skipping comment lines; falls back to the first line.
pub fn title_from_text(text: &str) -> Option<String> {
    let candidate = text
        .lines()
        .take(10)
        .map(str::trim)
        .filter(|l| !l.is_empty() && !l.starts_with('#') && !l.starts_with("//"))
        .find(|l| {
            char_len(l) < 100 && ["研究", "教育", "计算机"].iter().any(|k| l.contains(k))
        });

    candidate
        .or_else(|| text.lines().next().map(str::trim))
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}
