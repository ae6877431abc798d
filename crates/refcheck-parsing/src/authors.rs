use refcheck_core::AuthorList;
use refcheck_core::text_utils::contains_cjk;

use crate::config::ParsingConfig;

/// Normalize the author segment of a reference into an [`AuthorList`].
///
/// Splits on ASCII and full-width commas, trims every token and drops empty
/// ones. Et-al markers (`et al.`, `等` and friends) are recognized either as
/// their own token or glued to the end of the last name (`张三等`,
/// `Smith J et al`); they set [`AuthorList::marked`] and are not counted as
/// authors. Lists longer than three are cut to three plus `"et al."`.
///
/// ```
/// let list = refcheck_parsing::authors::normalize_authors("张三, 李四, 王五, 赵六");
/// assert!(list.truncated);
/// assert_eq!(list.names, ["张三", "李四", "王五", "et al."]);
/// ```
pub fn normalize_authors(raw: &str) -> AuthorList {
    normalize_authors_with_config(raw, &ParsingConfig::default())
}

/// Config-aware version of [`normalize_authors`].
pub(crate) fn normalize_authors_with_config(raw: &str, config: &ParsingConfig) -> AuthorList {
    let mut markers = config.et_al_markers();
    // Longest first so "et al." wins over "et al".
    markers.sort_by_key(|m| std::cmp::Reverse(m.len()));

    let mut names = Vec::new();
    let mut marked = false;

    for token in raw.split([',', '，']).map(str::trim) {
        if token.is_empty() {
            continue;
        }
        if markers.iter().any(|m| token.eq_ignore_ascii_case(m)) {
            marked = true;
            continue;
        }
        match strip_glued_marker(token, &markers) {
            Some(name) => {
                marked = true;
                names.push(name.to_string());
            }
            None => names.push(token.to_string()),
        }
    }

    AuthorList::from_names(names, marked, config.max_listed_authors)
}

/// Strip an et-al marker attached to the end of a name.
///
/// Latin markers need a separating space (`Smith J et al`); CJK markers
/// attach directly to a CJK name (`张三等`).
fn strip_glued_marker<'a>(token: &'a str, markers: &[String]) -> Option<&'a str> {
    for marker in markers {
        let Some(split) = token.len().checked_sub(marker.len()) else {
            continue;
        };
        if !token.is_char_boundary(split) || !token[split..].eq_ignore_ascii_case(marker) {
            continue;
        }
        let head = &token[..split];
        let name = head.trim_end();
        if name.is_empty() {
            continue;
        }
        let glued_cjk = contains_cjk(marker) && contains_cjk(name);
        let spaced = name.len() < head.len();
        if glued_cjk || spaced {
            return Some(name);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParsingConfigBuilder;
    use refcheck_core::{AuthorScript, ET_AL};

    #[test]
    fn test_single_author() {
        let list = normalize_authors("张三");
        assert_eq!(list.names, vec!["张三"]);
        assert!(!list.truncated);
        assert!(!list.marked);
        assert_eq!(list.script, AuthorScript::Cjk);
    }

    #[test]
    fn test_three_authors_unchanged() {
        let list = normalize_authors("Smith J, Johnson M, Lee K");
        assert_eq!(list.names, vec!["Smith J", "Johnson M", "Lee K"]);
        assert_eq!(list.source_count, 3);
        assert_eq!(list.script, AuthorScript::Latin);
    }

    #[test]
    fn test_truncation() {
        let list = normalize_authors("张三, 李四, 王五, 赵六, 钱七");
        assert!(list.truncated);
        assert_eq!(list.names.len(), 4);
        assert_eq!(list.names[3], ET_AL);
        assert_eq!(list.source_count, 5);
        assert!(!list.marked);
    }

    #[test]
    fn test_full_width_commas_and_empty_tokens() {
        let list = normalize_authors("张三，李四,, ,王五");
        assert_eq!(list.names, vec!["张三", "李四", "王五"]);
    }

    #[test]
    fn test_marker_token() {
        let list = normalize_authors("张三, 李四, 王五, 赵六, 等");
        assert!(list.marked);
        assert_eq!(list.source_count, 4);

        let list = normalize_authors("Smith J, Johnson M, Lee K, Brown A, et al");
        assert!(list.marked);
        assert_eq!(list.source_count, 4);
        assert_eq!(list.listed(), ["Smith J", "Johnson M", "Lee K"]);
    }

    #[test]
    fn test_glued_markers() {
        let list = normalize_authors("张三, 李四, 王五等");
        assert!(list.marked);
        assert_eq!(list.names, vec!["张三", "李四", "王五"]);

        let list = normalize_authors("Smith J et al.");
        assert!(list.marked);
        assert_eq!(list.names, vec!["Smith J"]);
    }

    #[test]
    fn test_latin_name_not_mistaken_for_marker() {
        // "Metal" ends in "al" but is not glued to a marker.
        let list = normalize_authors("Metal R");
        assert!(!list.marked);
        assert_eq!(list.names, vec!["Metal R"]);
    }

    #[test]
    fn test_empty_input() {
        assert!(normalize_authors("  ").is_empty());
    }

    #[test]
    fn test_custom_threshold_and_marker() {
        let config = ParsingConfigBuilder::new()
            .max_listed_authors(2)
            .add_et_al_marker("u. a.".into())
            .build()
            .unwrap();
        let list = normalize_authors_with_config("Müller A, Schmidt B, Weber C, u. a.", &config);
        assert!(list.marked);
        assert!(list.truncated);
        assert_eq!(list.names, vec!["Müller A", "Schmidt B", ET_AL]);
    }
}
