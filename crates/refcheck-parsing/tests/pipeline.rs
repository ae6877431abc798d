//! End-to-end checks of the reference pipeline: section location, entry
//! splitting, classification, validation and aggregation.

use refcheck_core::{Issue, SchemaKind, Severity, ValidationConfig, exemplars};
use refcheck_parsing::{
    ParsingConfig, ParsingError, ReferenceParser, check_references, check_references_file,
    check_references_text, parse_references,
};

fn check(text: &str) -> refcheck_core::Report {
    check_references(text, &ParsingConfig::default(), &ValidationConfig::default())
}

fn issues(report: &refcheck_core::Report, severity: Severity) -> Vec<&Issue> {
    report
        .findings()
        .filter(|f| f.severity == severity)
        .map(|f| &f.issue)
        .collect()
}

#[test]
fn exemplars_classify_as_their_kind() {
    let parser = ReferenceParser::new();
    for exemplar in exemplars() {
        let record = parser.parse(exemplar.text);
        assert_eq!(record.kind(), Some(exemplar.kind), "{}", exemplar.text);
    }
}

#[test]
fn exemplar_batch_has_no_errors() {
    let text = exemplars()
        .iter()
        .map(|e| e.text)
        .collect::<Vec<_>>()
        .join("\n");
    let report = check(&text);

    assert!(report.valid, "{:?}", report.errors);
    assert_eq!(report.total_records, 9);
    assert_eq!(report.unclassified_count(), 0);
    assert_eq!(report.count_kind(SchemaKind::Journal), 2);
    assert_eq!(report.count_kind(SchemaKind::Standard), 1);
    // The four Latin-script entries each get the name-order reminder.
    assert_eq!(
        issues(&report, Severity::Warning),
        vec![&Issue::LatinAuthorOrder; 4]
    );
}

#[test]
fn canonical_rendering_round_trips() {
    let parser = ReferenceParser::new();
    for exemplar in exemplars() {
        let record = parser.parse(exemplar.text);
        let canonical = record.canonical_text().unwrap();
        assert_eq!(canonical, exemplar.text);

        let reparsed = parser.parse(&canonical);
        assert_eq!(reparsed.citation(), record.citation());
        assert_eq!(reparsed.sequence_number, record.sequence_number);
    }
}

#[test]
fn single_clean_journal_entry() {
    let report = check("[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.");
    assert!(report.valid);
    assert_eq!(report.total_records, 1);
    assert!(report.errors.is_empty());
    assert!(report.warnings.is_empty());

    let citation = report.records[0].record.citation().unwrap();
    assert_eq!(citation.authors.names, vec!["张三"]);
    assert_eq!(citation.volume(), Some("20"));
}

#[test]
fn four_authors_need_marker() {
    let report =
        check("[1] 张三, 李四, 王五, 赵六. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.");
    assert!(!report.valid);
    assert_eq!(
        issues(&report, Severity::Error),
        vec![&Issue::MissingEtAl { count: 4, max: 3 }]
    );

    let report = check(
        "[1] 张三, 李四, 王五, 赵六, 等. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.",
    );
    assert!(report.valid, "{:?}", report.errors);
}

#[test]
fn latin_four_authors_with_et_al() {
    let report = check(
        "[1] Smith J, Brown K, Lee M, Wang L, et al. Deep Learning in Education[J]. J. Educ. Tech., 2021, 7(2): 1-9.",
    );
    assert!(report.valid, "{:?}", report.errors);
    assert_eq!(
        issues(&report, Severity::Warning),
        vec![&Issue::LatinAuthorOrder]
    );
    let authors = &report.records[0].record.citation().unwrap().authors;
    assert!(authors.marked);
    assert_eq!(authors.source_count, 4);
    assert_eq!(authors.listed().to_vec(), vec!["Smith J", "Brown K", "Lee M"]);

    let report = check(
        "[1] Smith J, Brown K, Lee M, Wang L. Deep Learning in Education[J]. J. Educ. Tech., 2021, 7(2): 1-9.",
    );
    assert_eq!(
        issues(&report, Severity::Error),
        vec![&Issue::MissingEtAl { count: 4, max: 3 }]
    );
}

#[test]
fn full_width_numbered_entries_one_per_line() {
    let text = "\
［1］ 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.
［2］ 李四. 人工智能与教学改革[M]. 北京: 高等教育出版社, 2022. 120-135.";
    let report = check(text);
    assert_eq!(report.total_records, 2);
    assert!(report.valid, "{:?}", report.errors);

    let journal = report.records[0].record.citation().unwrap();
    assert_eq!(journal.pages.as_deref(), Some("12-18"));
    assert_eq!(report.records[1].record.sequence_number, Some(2));
    assert_eq!(report.records[1].record.kind(), Some(SchemaKind::Monograph));
}

#[test]
fn sequence_gap_flagged_at_third_entry() {
    let text = "\
[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.
[2] 李四. 人工智能与教学改革[M]. 北京: 高等教育出版社, 2022. 120-135.
[4] 赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.";
    let report = check(text);
    assert_eq!(report.error_count(), 1);
    let finding = report.findings().next().unwrap();
    assert_eq!(finding.index, 2);
    assert_eq!(
        finding.issue,
        Issue::SequenceMismatch {
            expected: 3,
            actual: 4
        }
    );
    assert_eq!(report.errors[0], "Reference 3: sequence number out of order: expected 3, found 4");
}

#[test]
fn unrecognized_url_gives_one_error() {
    let report = check("https://example.com/some/article");
    assert!(!report.valid);
    assert_eq!(report.total_records, 1);
    assert_eq!(issues(&report, Severity::Error), vec![&Issue::Unclassified]);
    assert!(report.warnings.is_empty());
}

#[test]
fn unclassified_entries_keep_their_slot() {
    let text = "\
[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.
[2] 某网站文章, 2023.
[3] 赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.";
    let report = check(text);
    assert_eq!(report.total_records, 3);
    assert_eq!(issues(&report, Severity::Error), vec![&Issue::Unclassified]);
    assert_eq!(report.records[1].findings[0].index, 1);
}

#[test]
fn manuscript_text_uses_reference_section() {
    let text = "\
AI赋能计算机课程思政建设研究

摘要：本研究……

参考文献

[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.

[2] 赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.

作者简介：张三，男，讲师。";
    let report = check(text);
    assert_eq!(report.total_records, 2);
    assert!(report.valid, "{:?}", report.errors);
}

#[test]
fn revalidating_parsed_records_is_stable() {
    let text = exemplars()
        .iter()
        .map(|e| e.text)
        .collect::<Vec<_>>()
        .join("\n\n");
    let records = parse_references(&text, &ParsingConfig::default());
    let config = ValidationConfig::default();
    assert_eq!(
        refcheck_core::validate(&records, &config),
        refcheck_core::validate(&records, &config)
    );
}

#[test]
fn file_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("refs.txt");
    std::fs::write(
        &path,
        "参考文献\n[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.\n",
    )
    .unwrap();

    let report =
        check_references_file(&path, &ParsingConfig::default(), &ValidationConfig::default())
            .unwrap();
    assert!(report.valid);

    let missing = check_references_file(
        &dir.path().join("missing.txt"),
        &ParsingConfig::default(),
        &ValidationConfig::default(),
    );
    assert!(matches!(missing, Err(ParsingError::Io { .. })));
}

#[test]
fn empty_input_is_rejected() {
    let result = check_references_text(
        "\n\n   \n",
        &ParsingConfig::default(),
        &ValidationConfig::default(),
    );
    assert!(matches!(result, Err(ParsingError::NoEntries)));
}
