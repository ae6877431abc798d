use serde::Serialize;

use crate::finding::{Finding, Severity};
use crate::{Record, SchemaKind};

/// Findings for one record, in rule order.
#[derive(Debug, Clone, Serialize)]
pub struct RecordReport {
    /// 0-based position in the batch.
    pub index: usize,
    pub record: Record,
    pub findings: Vec<Finding>,
}

impl RecordReport {
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }
}

/// Aggregated outcome of checking one reference list.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// True when no finding has error severity.
    pub valid: bool,
    pub total_records: usize,
    pub records: Vec<RecordReport>,
    /// Error messages in record order, each prefixed with the record position.
    pub errors: Vec<String>,
    /// Warning messages in record order, each prefixed with the record position.
    pub warnings: Vec<String>,
}

impl Report {
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn findings(&self) -> impl Iterator<Item = &Finding> {
        self.records.iter().flat_map(|r| r.findings.iter())
    }

    /// Number of records classified as `kind`.
    pub fn count_kind(&self, kind: SchemaKind) -> usize {
        self.records
            .iter()
            .filter(|r| r.record.kind() == Some(kind))
            .count()
    }

    pub fn unclassified_count(&self) -> usize {
        self.records
            .iter()
            .filter(|r| !r.record.is_classified())
            .count()
    }
}

/// Merge validator output into a single report.
///
/// Findings are grouped under the record they belong to. The relative order
/// of findings for the same record is preserved, so rule order survives
/// even if `findings` arrives interleaved.
pub fn aggregate(records: Vec<Record>, findings: Vec<Finding>) -> Report {
    let total_records = records.len();
    let mut grouped: Vec<Vec<Finding>> = vec![Vec::new(); total_records];
    for finding in findings {
        match grouped.get_mut(finding.index) {
            Some(slot) => slot.push(finding),
            None => tracing::warn!(
                index = finding.index,
                total_records,
                "dropping finding for unknown record"
            ),
        }
    }

    let records: Vec<RecordReport> = records
        .into_iter()
        .zip(grouped)
        .enumerate()
        .map(|(index, (record, findings))| RecordReport {
            index,
            record,
            findings,
        })
        .collect();

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    for finding in records.iter().flat_map(|r| r.findings.iter()) {
        match finding.severity {
            Severity::Error => errors.push(finding.labeled()),
            Severity::Warning => warnings.push(finding.labeled()),
        }
    }

    Report {
        valid: errors.is_empty(),
        total_records,
        records,
        errors,
        warnings,
    }
}

/// A canonical, correctly formatted reference used as remediation guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exemplar {
    pub kind: SchemaKind,
    pub text: &'static str,
}

/// Worked examples, numbered consecutively so that the whole list is itself
/// a valid batch.
pub const EXEMPLARS: [Exemplar; 9] = [
    Exemplar {
        kind: SchemaKind::Journal,
        text: "[1] 张三. AI赋能教育的实践探索[J]. 计算机教育, 2023, 20(5): 12-18.",
    },
    Exemplar {
        kind: SchemaKind::Journal,
        text: "[2] Smith J, Johnson M. AI in Education[J]. J. Educ. Tech., 2023, 15(2): 45-52.",
    },
    Exemplar {
        kind: SchemaKind::Monograph,
        text: "[3] 李四. 人工智能与教学改革[M]. 北京: 高等教育出版社, 2022. 120-135.",
    },
    Exemplar {
        kind: SchemaKind::Monograph,
        text: "[4] Wang L. AI in Modern Education[M]. New York: Springer, 2023. 88-102.",
    },
    Exemplar {
        kind: SchemaKind::ConferencePaper,
        text: "[5] 王五. 大模型驱动的教学变革[C]//李明. 计算机教育创新文集. 北京: 清华大学出版社, 2023: 234-245.",
    },
    Exemplar {
        kind: SchemaKind::ConferencePaper,
        text: "[6] Chen X. AI Applications in Learning[C]//Zhang Y. Advances in Educational Technology. Singapore: World Scientific, 2023: 156-168.",
    },
    Exemplar {
        kind: SchemaKind::Dissertation,
        text: "[7] 赵六. AI赋能计算机课程思政建设研究[D]. 北京: 北京大学, 2023.",
    },
    Exemplar {
        kind: SchemaKind::Dissertation,
        text: "[8] Davis K. AI Ethics in Higher Education[D]. Stanford: Stanford University, 2023.",
    },
    Exemplar {
        kind: SchemaKind::Standard,
        text: "[9] 国家质量监督检验检疫总局. GB/T 7714—2015, 信息与文献 参考文献著录规则[S]. 北京: 中国标准出版社, 2015: 10-15.",
    },
];

pub fn exemplars() -> &'static [Exemplar] {
    &EXEMPLARS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::Issue;

    fn unclassified(seq: u32) -> Record {
        Record::unclassified(Some(seq), format!("[{seq}] ???"), "no schema")
    }

    #[test]
    fn groups_findings_by_record() {
        let records = vec![unclassified(1), unclassified(2)];
        let findings = vec![
            Finding::new(1, Some(2), Issue::Unclassified),
            Finding::new(0, Some(1), Issue::Unclassified),
            Finding::new(1, Some(2), Issue::LatinAuthorOrder),
        ];
        let report = aggregate(records, findings);
        assert!(!report.valid);
        assert_eq!(report.total_records, 2);
        assert_eq!(report.records[0].findings.len(), 1);
        assert_eq!(report.records[1].findings[0].issue, Issue::Unclassified);
        assert_eq!(report.records[1].findings[1].issue, Issue::LatinAuthorOrder);
        assert_eq!(
            report.errors,
            vec![
                "Reference 1: type not recognized",
                "Reference 2: type not recognized"
            ]
        );
        assert_eq!(report.warning_count(), 1);
        assert_eq!(report.unclassified_count(), 2);
    }

    #[test]
    fn warnings_alone_keep_report_valid() {
        let report = aggregate(
            vec![unclassified(1)],
            vec![Finding::new(0, Some(1), Issue::LatinAuthorOrder)],
        );
        assert!(report.valid);
        assert!(report.records[0].findings.iter().all(|f| !f.is_error()));
    }

    #[test]
    fn empty_batch_is_valid() {
        let report = aggregate(vec![], vec![]);
        assert!(report.valid);
        assert_eq!(report.total_records, 0);
    }

    #[test]
    fn exemplars_cover_every_kind() {
        for kind in SchemaKind::PRIORITY {
            assert!(exemplars().iter().any(|e| e.kind == kind), "{kind}");
        }
    }
}
