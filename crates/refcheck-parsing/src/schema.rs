//! The table of literature-type recognizers.
//!
//! Each recognizer matches the body of an entry (the text after the `[n]`
//! sequence marker) against one fixed layout. The table is ordered by
//! priority and the parser takes the first match.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use refcheck_core::{SchemaDetails, SchemaKind};

/// `Authors. Title[J]. Journal, Year, Volume(Issue): Pages.`
pub const JOURNAL_PATTERN: &str = r"^(.+?)\.\s*(.+?)\s*\[J\]\.\s*([^,]+?),\s*(\d{4})\s*(?:,\s*([^,(:]+?)\s*(?:\(([^)]+)\))?)?\s*:\s*(.+?)\.$";

/// `Authors. Title[M]. Place: Publisher, Year. Pages.`
pub const MONOGRAPH_PATTERN: &str =
    r"^(.+?)\.\s*(.+?)\s*\[M\]\.\s*([^:]+?):\s*([^,]+?),\s*(\d{4})(?:[.:]\s*(.+?))?\.$";

/// `Authors. Title[C]//Editor. Proceedings. Place: Publisher, Year: Pages.`
pub const CONFERENCE_PATTERN: &str = r"^(.+?)\.\s*(.+?)\s*\[C\]//(.+?)\.\s*(.+?)\.\s*([^:]+?):\s*([^,]+?),\s*(\d{4})\s*:\s*(.+?)\.$";

/// `Authors. Title[D]. Place: Institution, Year.`
pub const DISSERTATION_PATTERN: &str =
    r"^(.+?)\.\s*(.+?)\s*\[D\]\.\s*([^:]+?):\s*([^,]+?),\s*(\d{4})\.$";

/// `Authors. Number—Year, Title[S]. Place: Publisher, Year: Pages.`
pub const STANDARD_PATTERN: &str = r"^(.+?)\.\s*(.+?)[—-](\d{4}),\s*(.+?)\s*\[S\]\.\s*([^:]+?):\s*([^,]+?),\s*(\d{4})(?:[.:]\s*(.+?))?\.$";

/// Fields pulled out of an entry body by a recognizer.
///
/// The author segment is still raw here; the parser runs it through the
/// author normalizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFields {
    pub authors: String,
    pub title: String,
    pub source: String,
    pub year: Option<String>,
    pub pages: Option<String>,
    pub details: SchemaDetails,
}

/// One row of the pattern table.
#[derive(Debug)]
pub struct Recognizer {
    pub kind: SchemaKind,
    regex: Regex,
}

impl Recognizer {
    fn new(kind: SchemaKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).unwrap(),
        }
    }

    /// Match `body` and extract this schema's fields.
    pub fn recognize(&self, body: &str) -> Option<RawFields> {
        let caps = self.regex.captures(body)?;
        Some(match self.kind {
            SchemaKind::Journal => RawFields {
                authors: text(&caps, 1),
                title: text(&caps, 2),
                source: text(&caps, 3),
                year: optional(&caps, 4),
                pages: optional(&caps, 7),
                details: SchemaDetails::Journal {
                    volume: optional(&caps, 5),
                    issue: optional(&caps, 6),
                },
            },
            SchemaKind::Monograph => RawFields {
                authors: text(&caps, 1),
                title: text(&caps, 2),
                source: text(&caps, 4),
                year: optional(&caps, 5),
                pages: optional(&caps, 6),
                details: SchemaDetails::Monograph {
                    place: text(&caps, 3),
                },
            },
            SchemaKind::ConferencePaper => RawFields {
                authors: text(&caps, 1),
                title: text(&caps, 2),
                source: text(&caps, 4),
                year: optional(&caps, 7),
                pages: optional(&caps, 8),
                details: SchemaDetails::ConferencePaper {
                    editor: text(&caps, 3),
                    place: text(&caps, 5),
                    publisher: text(&caps, 6),
                },
            },
            SchemaKind::Dissertation => RawFields {
                authors: text(&caps, 1),
                title: text(&caps, 2),
                source: text(&caps, 4),
                year: optional(&caps, 5),
                pages: None,
                details: SchemaDetails::Dissertation {
                    place: text(&caps, 3),
                },
            },
            SchemaKind::Standard => RawFields {
                authors: text(&caps, 1),
                title: text(&caps, 4),
                source: text(&caps, 6),
                year: optional(&caps, 7),
                pages: optional(&caps, 8),
                details: SchemaDetails::Standard {
                    number: text(&caps, 2),
                    issued: text(&caps, 3),
                    place: text(&caps, 5),
                },
            },
        })
    }
}

fn text(caps: &Captures<'_>, i: usize) -> String {
    optional(caps, i).unwrap_or_default()
}

fn optional(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i)
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// The recognizers in priority order.
pub static SCHEMA_TABLE: Lazy<Vec<Recognizer>> = Lazy::new(|| {
    SchemaKind::PRIORITY
        .iter()
        .map(|&kind| Recognizer::new(kind, pattern_for(kind)))
        .collect()
});

pub fn pattern_for(kind: SchemaKind) -> &'static str {
    match kind {
        SchemaKind::Journal => JOURNAL_PATTERN,
        SchemaKind::Monograph => MONOGRAPH_PATTERN,
        SchemaKind::ConferencePaper => CONFERENCE_PATTERN,
        SchemaKind::Dissertation => DISSERTATION_PATTERN,
        SchemaKind::Standard => STANDARD_PATTERN,
    }
}

/// Run the table against `body`; the first recognizer that matches wins.
pub fn classify(body: &str) -> Option<(SchemaKind, RawFields)> {
    SCHEMA_TABLE
        .iter()
        .find_map(|r| r.recognize(body).map(|fields| (r.kind, fields)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_order() {
        let kinds: Vec<_> = SCHEMA_TABLE.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, SchemaKind::PRIORITY);
    }

    #[test]
    fn test_journal_fields() {
        let (kind, f) = classify("张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.").unwrap();
        assert_eq!(kind, SchemaKind::Journal);
        assert_eq!(f.authors, "张三");
        assert_eq!(f.title, "AI赋能教育的实践探索");
        assert_eq!(f.source, "计算机教育");
        assert_eq!(f.year.as_deref(), Some("2023"));
        assert_eq!(f.pages.as_deref(), Some("12-18"));
        assert_eq!(
            f.details,
            SchemaDetails::Journal {
                volume: Some("20".into()),
                issue: Some("5".into())
            }
        );
    }

    #[test]
    fn test_journal_volume_without_issue() {
        let (_, f) = classify("Smith J. Deep Tests[J]. J. Soft. Eng., 2021, 7: 1-9.").unwrap();
        assert_eq!(f.source, "J. Soft. Eng.");
        assert_eq!(
            f.details,
            SchemaDetails::Journal {
                volume: Some("7".into()),
                issue: None
            }
        );
    }

    #[test]
    fn test_monograph_with_and_without_pages() {
        let (kind, f) = classify("李四. 人工智能与教学改革[M]. 北京: 高等教育出版社, 2022. 120-135.").unwrap();
        assert_eq!(kind, SchemaKind::Monograph);
        assert_eq!(f.source, "高等教育出版社");
        assert_eq!(f.pages.as_deref(), Some("120-135"));
        assert_eq!(
            f.details,
            SchemaDetails::Monograph {
                place: "北京".into()
            }
        );

        let (_, f) = classify("李四. 人工智能与教学改革[M]. 北京: 高等教育出版社, 2022.").unwrap();
        assert_eq!(f.pages, None);
        assert_eq!(f.year.as_deref(), Some("2022"));
    }

    #[test]
    fn test_conference_fields() {
        let (kind, f) = classify(
            "王五. 大模型驱动的教学变革[C]//李明. 计算机教育创新文集. 北京: 清华大学出版社, 2023: 234-245.",
        )
        .unwrap();
        assert_eq!(kind, SchemaKind::ConferencePaper);
        assert_eq!(f.source, "计算机教育创新文集");
        assert_eq!(
            f.details,
            SchemaDetails::ConferencePaper {
                editor: "李明".into(),
                place: "北京".into(),
                publisher: "清华大学出版社".into()
            }
        );
    }

    #[test]
    fn test_dissertation_fields() {
        let (kind, f) = classify("赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.").unwrap();
        assert_eq!(kind, SchemaKind::Dissertation);
        assert_eq!(f.source, "北京大学");
        assert_eq!(f.pages, None);
    }

    #[test]
    fn test_standard_fields() {
        let (kind, f) = classify(
            "国家质量监督检验检疫总局. GB/T 7714—2015, 信息与文献 参考文献著录规则[S]. 北京: 中国标准出版社, 2015: 10-15.",
        )
        .unwrap();
        assert_eq!(kind, SchemaKind::Standard);
        assert_eq!(f.title, "信息与文献 参考文献著录规则");
        assert_eq!(f.pages.as_deref(), Some("10-15"));
        assert_eq!(
            f.details,
            SchemaDetails::Standard {
                number: "GB/T 7714".into(),
                issued: "2015".into(),
                place: "北京".into()
            }
        );
    }

    #[test]
    fn test_standard_ascii_hyphen() {
        let (kind, f) =
            classify("教育部. JY/T 0001-2003, 教育管理信息 教育管理基础代码[S]. 北京: 中国标准出版社, 2003.")
                .unwrap();
        assert_eq!(kind, SchemaKind::Standard);
        assert_eq!(f.title, "教育管理信息 教育管理基础代码");
        assert_eq!(f.year.as_deref(), Some("2003"));
        assert_eq!(f.pages, None);
        assert_eq!(
            f.details,
            SchemaDetails::Standard {
                number: "JY/T 0001".into(),
                issued: "2003".into(),
                place: "北京".into()
            }
        );
    }

    #[test]
    fn test_no_match() {
        assert!(classify("https://example.com/article").is_none());
        // Journal marker but no pages.
        assert!(classify("张三. 题名[J]. 刊名, 2023.").is_none());
    }
}
