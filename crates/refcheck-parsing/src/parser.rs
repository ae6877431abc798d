use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use refcheck_core::text_utils::collapse_whitespace;
use refcheck_core::{Citation, Record, SchemaKind};

use crate::config::ParsingConfig;
use crate::{authors, schema, section};

static SEQUENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\s*([0-9]{1,9})\s*\]\s*").unwrap());

/// A configurable reference parsing pipeline.
///
/// Holds a [`ParsingConfig`] and exposes each step as a method. The default
/// constructor uses built-in defaults; use [`ReferenceParser::with_config`]
/// to supply custom patterns and thresholds.
#[derive(Debug, Clone, Default)]
pub struct ReferenceParser {
    config: ParsingConfig,
}

impl ReferenceParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ParsingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ParsingConfig {
        &self.config
    }

    /// Locate the reference list in a manuscript (step 1).
    pub fn find_references_section(&self, text: &str) -> String {
        section::find_references_section_with_config(text, &self.config)
    }

    /// Split a reference block into raw entries (step 2).
    pub fn split_entries(&self, block: &str) -> Vec<String> {
        section::split_entries(block)
    }

    /// Classify one raw entry and extract its fields (step 3).
    ///
    /// Never fails: an entry that fits no schema becomes an unclassified
    /// record carrying its sequence number and a note.
    pub fn parse(&self, raw: &str) -> Record {
        let text = self.prepare(raw);

        let (sequence_number, body) = match SEQUENCE_RE.captures(&text) {
            Some(caps) => {
                let end = caps.get(0).map_or(0, |m| m.end());
                (caps[1].parse::<u32>().ok(), &text[end..])
            }
            None => (None, text.as_str()),
        };

        let Some((kind, fields)) = schema::classify(body) else {
            let note = unclassified_note(body);
            tracing::debug!(seq = ?sequence_number, note = %note, "entry not classified");
            return Record::unclassified(sequence_number, raw.to_string(), note);
        };

        tracing::debug!(seq = ?sequence_number, kind = %kind, "entry classified");
        let citation = Citation {
            authors: authors::normalize_authors_with_config(&fields.authors, &self.config),
            title: fields.title,
            source: fields.source,
            year: fields.year,
            pages: fields.pages,
            details: fields.details,
        };
        Record::classified(sequence_number, raw.to_string(), citation)
    }

    /// Parse a batch of raw entries, preserving order.
    pub fn parse_all<S: AsRef<str>>(&self, entries: &[S]) -> Vec<Record> {
        entries.iter().map(|e| self.parse(e.as_ref())).collect()
    }

    /// Whitespace-collapsed, optionally width-normalized form used for
    /// matching only.
    fn prepare(&self, raw: &str) -> String {
        let collapsed = collapse_whitespace(raw);
        if self.config.normalize_width {
            collapsed.nfkc().collect()
        } else {
            collapsed
        }
    }
}

fn unclassified_note(body: &str) -> String {
    match SchemaKind::PRIORITY
        .iter()
        .find(|k| body.contains(k.type_marker()))
    {
        Some(kind) => format!(
            "has a {} marker but does not follow the {} layout",
            kind.type_marker(),
            kind
        ),
        None => "no literature type marker ([J], [M], [C], [D] or [S]) found".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;
    use refcheck_core::{AuthorScript, RecordBody, SchemaDetails};

    #[test]
    fn test_parse_journal() {
        let raw = "[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.";
        let record = ReferenceParser::new().parse(raw);
        assert_eq!(record.sequence_number, Some(1));
        assert_eq!(record.raw_text, raw);
        assert_eq!(record.kind(), Some(SchemaKind::Journal));

        let c = record.citation().unwrap();
        assert_eq!(c.authors.names, vec!["张三"]);
        assert_eq!(c.authors.script, AuthorScript::Cjk);
        assert_eq!(c.year.as_deref(), Some("2023"));
        assert_eq!(c.volume(), Some("20"));
        assert_eq!(c.issue(), Some("5"));
        assert_eq!(c.pages.as_deref(), Some("12-18"));
    }

    #[test]
    fn test_full_width_punctuation() {
        let raw = "[2] 李四，王五．教学改革研究[J]．计算机教育，2022，18（3）：1-5．";
        let record = ReferenceParser::new().parse(raw);
        assert_eq!(record.kind(), Some(SchemaKind::Journal));
        let c = record.citation().unwrap();
        assert_eq!(c.authors.names, vec!["李四", "王五"]);
        assert_eq!(c.issue(), Some("3"));
        // Original text is preserved.
        assert_eq!(record.raw_text, raw);
    }

    #[test]
    fn test_full_width_without_normalization_fails() {
        let config = ParsingConfigBuilder::new()
            .normalize_width(false)
            .build()
            .unwrap();
        let raw = "[2] 李四，王五．教学改革研究[J]．计算机教育，2022，18（3）：1-5．";
        let record = ReferenceParser::with_config(config).parse(raw);
        assert!(!record.is_classified());
    }

    #[test]
    fn test_multiline_whitespace_collapsed() {
        let raw = "[3] 李四.  人工智能与教学改革[M].\n   北京: 高等教育出版社,   2022.";
        let record = ReferenceParser::new().parse(raw);
        assert_eq!(record.kind(), Some(SchemaKind::Monograph));
        assert_eq!(
            record.citation().unwrap().details,
            SchemaDetails::Monograph {
                place: "北京".into()
            }
        );
    }

    #[test]
    fn test_unclassified_url() {
        let record = ReferenceParser::new().parse("https://example.com/paper");
        assert_eq!(record.sequence_number, None);
        match &record.body {
            RecordBody::Unclassified { note } => assert!(note.contains("no literature type")),
            RecordBody::Classified(_) => panic!("URL must not classify"),
        }
    }

    #[test]
    fn test_unclassified_keeps_sequence_number() {
        let record = ReferenceParser::new().parse("[12] 张三. 题名[J]. 刊名.");
        assert_eq!(record.sequence_number, Some(12));
        match &record.body {
            RecordBody::Unclassified { note } => assert!(note.contains("[J]")),
            RecordBody::Classified(_) => panic!("incomplete journal entry must not classify"),
        }
    }

    #[test]
    fn test_missing_sequence_marker_still_classifies() {
        let record =
            ReferenceParser::new().parse("赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.");
        assert_eq!(record.sequence_number, None);
        assert_eq!(record.kind(), Some(SchemaKind::Dissertation));
    }

    #[test]
    fn test_truncation_applied_during_parse() {
        let record = ReferenceParser::new()
            .parse("[1] 张三, 李四, 王五, 赵六. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.");
        let authors = &record.citation().unwrap().authors;
        assert!(authors.truncated);
        assert_eq!(authors.names, vec!["张三", "李四", "王五", "et al."]);
        assert_eq!(authors.source_count, 4);
    }

    #[test]
    fn test_full_width_sequence_marker() {
        let record = ReferenceParser::new()
            .parse("［１２］ 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.");
        assert_eq!(record.sequence_number, Some(12));
        assert_eq!(record.citation().unwrap().authors.names, vec!["张三"]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_sequence_marker() {
        let record = ReferenceParser::new().parse("[١] https://example.com/paper");
        assert_eq!(record.sequence_number, None);
        assert!(!record.is_classified());
    }

    #[test]
    fn test_parse_all_preserves_order() {
        let entries = vec!["[1] x", "[2] y", "[3] z"];
        let records = ReferenceParser::new().parse_all(&entries);
        let seqs: Vec<_> = records.iter().map(|r| r.sequence_number).collect();
        assert_eq!(seqs, vec![Some(1), Some(2), Some(3)]);
    }
}
