use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ParsingConfig;

static HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:参考文献|References|Bibliography)[ \t]*[:：]?[ \t]*\r?$").unwrap()
});

static END_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?mi)^[ \t]*(?:附录|Appendix|致谢|Acknowledge?ments|作者简介)").unwrap()
});

/// Locate the reference list in a manuscript.
///
/// Uses the last heading line that reads `参考文献`, `References` or
/// `Bibliography`, and cuts the block at the first following end marker
/// (appendix, acknowledgements, author biography). Text without any heading
/// is returned whole, so a bare list of entries can be passed directly.
pub fn find_references_section(text: &str) -> String {
    find_references_section_with_config(text, &ParsingConfig::default())
}

/// Config-aware version of [`find_references_section`].
pub(crate) fn find_references_section_with_config(text: &str, config: &ParsingConfig) -> String {
    let header_re = config.section_header_re.as_ref().unwrap_or(&HEADER_RE);

    // A table of contents or a running header may mention the heading
    // earlier; the real list comes last.
    let Some(header) = header_re.find_iter(text).last() else {
        tracing::debug!("no references heading found, using whole text");
        return text.to_string();
    };

    let rest = &text[header.end()..];
    let end_re = config.section_end_re.as_ref().unwrap_or(&END_RE);
    let end = end_re.find(rest).map_or(rest.len(), |m| m.start());

    tracing::debug!(
        start = header.end(),
        len = end,
        "located references section"
    );
    rest[..end].to_string()
}

/// Split a reference block into raw entries.
///
/// Blank lines always separate entries. Inside a paragraph, every line that
/// starts with a bracketed number (`[n]`, or full-width `［n］`) opens a new
/// entry and any other line
/// continues the current one. Continuation lines are joined with a single
/// space.
pub fn split_entries(block: &str) -> Vec<String> {
    static BLANK_LINES_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").unwrap());
    static MARKER_LINE_RE: Lazy<Regex> =
        Lazy::new(|| Regex::new(r"^[\[［]\s*[0-9０-９]+\s*[\]］]").unwrap());

    let mut entries = Vec::new();
    for chunk in BLANK_LINES_RE.split(block) {
        let mut current = String::new();
        for line in chunk.lines().map(str::trim).filter(|l| !l.is_empty()) {
            if MARKER_LINE_RE.is_match(line) && !current.is_empty() {
                entries.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(line);
        }
        if !current.is_empty() {
            entries.push(current);
        }
    }
    entries
}
