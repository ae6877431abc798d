use std::fmt;

use serde::Serialize;

use refcheck_core::text_utils::char_len;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManuscriptPart {
    Title,
    Abstract,
    Keywords,
    Body,
    References,
}

impl ManuscriptPart {
    pub const ALL: [ManuscriptPart; 5] = [
        ManuscriptPart::Title,
        ManuscriptPart::Abstract,
        ManuscriptPart::Keywords,
        ManuscriptPart::Body,
        ManuscriptPart::References,
    ];

    /// Heading keywords that open this part when they start a line.
    fn headings(&self) -> &'static [&'static str] {
        match self {
            Self::Abstract => &["摘要", "Abstract"],
            Self::Keywords => &["关键词", "关键字", "Keywords", "Key words"],
            Self::References => &["参考文献", "References"],
            Self::Title | Self::Body => &[],
        }
    }

    fn opens(&self, line: &str) -> bool {
        self.headings().iter().any(|h| {
            line.get(..h.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(h))
        })
    }
}

impl fmt::Display for ManuscriptPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Title => "title",
            Self::Abstract => "abstract",
            Self::Keywords => "keywords",
            Self::Body => "body",
            Self::References => "references",
        })
    }
}

/// A manuscript split into its main parts by heading keywords.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ManuscriptParts {
    pub title: String,
    pub abstract_text: String,
    pub keywords: String,
    pub body: String,
    pub references: String,
}

impl ManuscriptParts {
    pub fn get(&self, part: ManuscriptPart) -> &str {
        match part {
            ManuscriptPart::Title => &self.title,
            ManuscriptPart::Abstract => &self.abstract_text,
            ManuscriptPart::Keywords => &self.keywords,
            ManuscriptPart::Body => &self.body,
            ManuscriptPart::References => &self.references,
        }
    }

    fn get_mut(&mut self, part: ManuscriptPart) -> &mut String {
        match part {
            ManuscriptPart::Title => &mut self.title,
            ManuscriptPart::Abstract => &mut self.abstract_text,
            ManuscriptPart::Keywords => &mut self.keywords,
            ManuscriptPart::Body => &mut self.body,
            ManuscriptPart::References => &mut self.references,
        }
    }
}

/// Split manuscript text into title, abstract, keywords, body and references.
///
/// The first short line (under 30 characters, not a `第…` chapter heading)
/// is taken as the title. A line starting with an abstract, keywords or
/// references heading switches the current part and belongs to it; every
/// other non-empty line is appended to the current part. The keywords part
/// is a single line, after which text is body again.
pub fn split_manuscript(text: &str) -> ManuscriptParts {
    let mut parts = ManuscriptParts::default();
    let mut current = ManuscriptPart::Body;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let heading = [
            ManuscriptPart::Abstract,
            ManuscriptPart::Keywords,
            ManuscriptPart::References,
        ]
        .into_iter()
        .find(|p| p.opens(line));

        if heading.is_none()
            && current == ManuscriptPart::Body
            && parts.title.is_empty()
            && parts.body.is_empty()
            && char_len(line) < 30
            && !line.starts_with('第')
        {
            parts.title = line.to_string();
            continue;
        }

        if let Some(part) = heading {
            current = part;
        }
        let slot = parts.get_mut(current);
        slot.push_str(line);
        slot.push('\n');

        // Keywords fit on one line; the body follows.
        if current == ManuscriptPart::Keywords {
            current = ManuscriptPart::Body;
        }
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    const MANUSCRIPT: &str = "\
AI赋能计算机课程思政建设研究

摘要：针对课程思政问题，提出了新方法。
本段仍属摘要。
关键词：人工智能；课程思政
引言
正文第一段。

参考文献
[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.";

    #[test]
    fn splits_by_heading_keywords() {
        let parts = split_manuscript(MANUSCRIPT);
        assert_eq!(parts.title, "AI赋能计算机课程思政建设研究");
        assert!(parts.abstract_text.starts_with("摘要："));
        assert!(parts.abstract_text.contains("本段仍属摘要"));
        assert!(parts.keywords.contains("人工智能"));
        assert!(!parts.keywords.contains("正文第一段"));
        assert_eq!(parts.body, "引言\n正文第一段。\n");
        assert!(parts.references.contains("[1] 张三"));
    }

    #[test]
    fn text_without_headings_is_body() {
        let parts = split_manuscript("第一章 绪论\n这是一段很长的正文内容，用于说明没有任何标题关键词的情况。");
        assert!(parts.title.is_empty());
        assert_eq!(parts.body.lines().count(), 2);
    }

    #[test]
    fn english_headings() {
        let parts = split_manuscript("Short Title\nABSTRACT: text\nKeywords: a; b\nReferences\n[1] x");
        assert_eq!(parts.title, "Short Title");
        assert_eq!(parts.get(ManuscriptPart::Abstract), "ABSTRACT: text\n");
        assert_eq!(parts.get(ManuscriptPart::References), "References\n[1] x\n");
    }
}
