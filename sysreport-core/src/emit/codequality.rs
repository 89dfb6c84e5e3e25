//! Code-quality defect list (GitLab `codequality` report format)
//!
//! One entry per failed check, plus one per weak SSH algorithm finding and a
//! single entry summarising weak moduli. The SSH entries are synthesized so a
//! failed `algorithms_strong` rule still points at each offending list.

use serde::{Deserialize, Serialize};

use crate::error::ReportError;
use crate::types::{DefectSeverity, Severity, SystemReport};

/// Fingerprint prefix of synthesized weak algorithm entries
pub const WEAK_ALGORITHM_FINGERPRINT: &str = "ssh_weak_algorithm";
/// Fingerprint of the synthesized weak moduli entry
pub const WEAK_MODULI_FINGERPRINT: &str = "ssh_weak_moduli";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeQualityIssue {
    pub description: String,
    pub check_name: String,
    pub severity: DefectSeverity,
    pub fingerprint: String,
    pub location: CodeQualityLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeQualityLocation {
    pub path: String,
    pub lines: CodeQualityLines,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodeQualityLines {
    pub begin: u32,
}

impl CodeQualityIssue {
    fn new(check_name: &str, fingerprint: String, severity: Severity, description: String) -> Self {
        Self {
            description,
            check_name: check_name.to_string(),
            severity: severity.defect_severity(),
            fingerprint,
            location: CodeQualityLocation {
                path: "system".to_string(),
                lines: CodeQualityLines { begin: 1 },
            },
        }
    }
}

/// Build the ordered defect list for a report
pub fn issues(report: &SystemReport) -> Vec<CodeQualityIssue> {
    let mut issues: Vec<CodeQualityIssue> = report
        .failed()
        .iter()
        .map(|failed| {
            let description = if failed.message.is_empty() {
                failed.name.clone()
            } else {
                failed.message.clone()
            };
            CodeQualityIssue::new(&failed.name, failed.name.clone(), failed.severity, description)
        })
        .collect();

    issues.extend(report.ssh.weak_algorithms.iter().map(|finding| {
        CodeQualityIssue::new(
            "algorithms_strong",
            format!("{}:{}", WEAK_ALGORITHM_FINGERPRINT, finding),
            Severity::High,
            finding.clone(),
        )
    }));

    if !report.ssh.weak_moduli.is_empty() {
        let sizes: Vec<String> = report
            .ssh
            .weak_moduli
            .iter()
            .map(|bits| bits.to_string())
            .collect();
        issues.push(CodeQualityIssue::new(
            "moduli",
            WEAK_MODULI_FINGERPRINT.to_string(),
            Severity::High,
            format!(
                "{} weak DH moduli found (sizes: {})",
                report.ssh.weak_moduli_count,
                sizes.join(", ")
            ),
        ));
    }

    issues
}

/// Render the defect list as JSON
pub fn render(report: &SystemReport) -> Result<String, ReportError> {
    serde_json::to_string_pretty(&issues(report)).map_err(|source| ReportError::Serialize {
        document: "code quality report",
        source,
    })
}
