use std::fmt;

use serde::Serialize;

use refcheck_core::text_utils::char_len;

use crate::MetricsConfig;

/// Phrases that put the author in the text; abstracts are written in the
/// third person.
pub const FIRST_PERSON_PHRASES: &[&str] = &[
    "本文",
    "本论文",
    "本研究",
    "作者",
    "我们",
    "我",
    "笔者",
    "笔者认为",
    "本文认为",
];

/// The four parts a complete abstract covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StructureElement {
    Purpose,
    Method,
    Result,
    Conclusion,
}

impl StructureElement {
    pub const ALL: [StructureElement; 4] = [
        StructureElement::Purpose,
        StructureElement::Method,
        StructureElement::Result,
        StructureElement::Conclusion,
    ];

    /// Cue words whose presence signals this element.
    pub fn cues(&self) -> &'static [&'static str] {
        match self {
            Self::Purpose => &["为了", "针对", "根据", "为解决"],
            Self::Method => &["通过", "采用", "使用", "基于", "利用", "运用", "设计了", "构建了"],
            Self::Result => &["结果表明", "结果显示", "研究发现", "提出", "建立", "构建", "实现了", "达到"],
            Self::Conclusion => &["表明", "说明", "证实", "具有", "为", "提供", "奠定"],
        }
    }

    pub fn is_present(&self, text: &str) -> bool {
        self.cues().iter().any(|cue| text.contains(cue))
    }
}

impl fmt::Display for StructureElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Purpose => "purpose",
            Self::Method => "method",
            Self::Result => "result",
            Self::Conclusion => "conclusion",
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AbstractReport {
    pub char_count: usize,
    pub length_ok: bool,
    /// First-person phrases found, in table order.
    pub first_person: Vec<&'static str>,
    pub missing_elements: Vec<StructureElement>,
    pub valid: bool,
    pub suggestions: Vec<String>,
}

impl AbstractReport {
    pub fn length_message(&self, config: &MetricsConfig) -> String {
        let range = format!("{}-{}", config.abstract_min_chars, config.abstract_max_chars);
        if self.char_count < config.abstract_min_chars {
            format!("abstract too short: {} characters, expected {}", self.char_count, range)
        } else if self.char_count > config.abstract_max_chars {
            format!("abstract too long: {} characters, expected {}", self.char_count, range)
        } else {
            format!("abstract length ok: {} characters", self.char_count)
        }
    }

    pub fn person_message(&self) -> String {
        if self.first_person.is_empty() {
            "no first-person wording".to_string()
        } else {
            format!("first-person wording found: {}", self.first_person.join(", "))
        }
    }

    pub fn structure_message(&self) -> String {
        if self.missing_elements.is_empty() {
            "purpose, method, result and conclusion all present".to_string()
        } else {
            let missing: Vec<String> = self.missing_elements.iter().map(|e| e.to_string()).collect();
            format!("missing elements: {}", missing.join(", "))
        }
    }
}

/// Check an abstract's length, person and structure.
pub fn check_abstract(text: &str, config: &MetricsConfig) -> AbstractReport {
    let text = text.trim();
    let char_count = char_len(text);
    let length_ok = (config.abstract_min_chars..=config.abstract_max_chars).contains(&char_count);

    let first_person: Vec<&'static str> = FIRST_PERSON_PHRASES
        .iter()
        .copied()
        .filter(|p| text.contains(p))
        .collect();

    let missing_elements: Vec<StructureElement> = StructureElement::ALL
        .into_iter()
        .filter(|e| !e.is_present(text))
        .collect();

    let mut report = AbstractReport {
        char_count,
        length_ok,
        valid: length_ok && first_person.is_empty() && missing_elements.is_empty(),
        first_person,
        missing_elements,
        suggestions: Vec::new(),
    };

    if !report.length_ok {
        report.suggestions.push(report.length_message(config));
    }
    if !report.first_person.is_empty() {
        report
            .suggestions
            .push(format!("{}; rewrite in the third person", report.person_message()));
    }
    if !report.missing_elements.is_empty() {
        report.suggestions.push(report.structure_message());
    }

    tracing::debug!(char_count, valid = report.valid, "abstract checked");
    report
}
