//! Canonical textual form of a classified reference.
//!
//! The output uses the same separators the schema recognizers expect, so a
//! rendered citation parses back to an equal one. A truncated author list
//! comes back as three names plus a source marker instead.

use crate::{AuthorList, Citation, ET_AL, Record, SchemaDetails};

impl Citation {
    /// Render in the schema's canonical form, optionally prefixed with `[n]`.
    pub fn to_canonical(&self, sequence_number: Option<u32>) -> String {
        let authors = render_authors(&self.authors);
        let year = self.year.as_deref().unwrap_or_default();
        let pages = self.pages.as_deref().unwrap_or_default();

        let body = match &self.details {
            SchemaDetails::Journal { volume, issue } => {
                let volume_issue = match (volume, issue) {
                    (Some(v), Some(i)) => format!(", {}({})", v, i),
                    (Some(v), None) => format!(", {}", v),
                    (None, _) => String::new(),
                };
                format!(
                    "{}. {}[J]. {}, {}{}: {}.",
                    authors, self.title, self.source, year, volume_issue, pages
                )
            }
            SchemaDetails::Monograph { place } => {
                let mut s = format!(
                    "{}. {}[M]. {}: {}, {}",
                    authors, self.title, place, self.source, year
                );
                if !pages.is_empty() {
                    s.push_str(&format!(". {}", pages));
                }
                s.push('.');
                s
            }
            SchemaDetails::ConferencePaper {
                editor,
                place,
                publisher,
            } => format!(
                "{}. {}[C]//{}. {}. {}: {}, {}: {}.",
                authors, self.title, editor, self.source, place, publisher, year, pages
            ),
            SchemaDetails::Dissertation { place } => format!(
                "{}. {}[D]. {}: {}, {}.",
                authors, self.title, place, self.source, year
            ),
            SchemaDetails::Standard {
                number,
                issued,
                place,
            } => {
                let mut s = format!(
                    "{}. {}\u{2014}{}, {}[S]. {}: {}, {}",
                    authors, number, issued, self.title, place, self.source, year
                );
                if !pages.is_empty() {
                    s.push_str(&format!(": {}", pages));
                }
                s.push('.');
                s
            }
        };

        match sequence_number {
            Some(n) => format!("[{}] {}", n, body),
            None => body,
        }
    }
}

impl Record {
    /// Canonical form of a classified record; `None` when unclassified.
    pub fn canonical_text(&self) -> Option<String> {
        self.citation()
            .map(|c| c.to_canonical(self.sequence_number))
    }
}

fn render_authors(authors: &AuthorList) -> String {
    let mut names: Vec<&str> = authors.listed().iter().map(String::as_str).collect();
    if authors.has_marker() {
        names.push(ET_AL);
    }
    let joined = names.join(", ");
    // The entry separator supplies the final period.
    joined.strip_suffix('.').unwrap_or(&joined).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn citation(details: SchemaDetails, source: &str, pages: Option<&str>) -> Citation {
        Citation {
            authors: AuthorList::from_names(vec!["张三".into()], false, 3),
            title: "AI赋能教育的实践探索".into(),
            source: source.into(),
            year: Some("2023".into()),
            pages: pages.map(String::from),
            details,
        }
    }

    #[test]
    fn journal_form() {
        let c = citation(
            SchemaDetails::Journal {
                volume: Some("20".into()),
                issue: Some("5".into()),
            },
            "计算机教育",
            Some("12-18"),
        );
        assert_eq!(
            c.to_canonical(Some(1)),
            "[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18."
        );
    }

    #[test]
    fn monograph_without_pages() {
        let c = citation(
            SchemaDetails::Monograph {
                place: "北京".into(),
            },
            "高等教育出版社",
            None,
        );
        assert_eq!(
            c.to_canonical(None),
            "张三. AI赋能教育的实践探索[M]. 北京: 高等教育出版社, 2023."
        );
    }

    #[test]
    fn truncated_authors_render_marker_once() {
        let mut c = citation(
            SchemaDetails::Dissertation {
                place: "北京".into(),
            },
            "北京大学",
            None,
        );
        c.authors = AuthorList::from_names(
            ["张三", "李四", "王五", "赵六"].map(String::from).to_vec(),
            false,
            3,
        );
        assert_eq!(
            c.to_canonical(Some(7)),
            "[7] 张三, 李四, 王五, et al. AI赋能教育的实践探索[D]. 北京: 北京大学, 2023."
        );
    }
}
