//! Structured report document
//!
//! The full report graph as pretty-printed JSON.

use crate::error::ReportError;
use crate::types::SystemReport;

/// Render report as JSON
pub fn render(report: &SystemReport) -> Result<String, ReportError> {
    serde_json::to_string_pretty(report).map_err(|source| ReportError::Serialize {
        document: "system report",
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::emit::tests::test_report;

    #[test]
    fn test_json_round_trip() {
        let report = test_report();
        let json_str = render(&report).expect("render JSON");
        let parsed: SystemReport = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(parsed, report);
        assert_eq!(parsed.compliance.score, report.compliance.score);
        assert_eq!(parsed.ssh.weak_moduli_count, 3);
    }

    #[test]
    fn test_json_field_names() {
        let json_str = render(&test_report()).expect("render JSON");
        let value: serde_json::Value = serde_json::from_str(&json_str).expect("parse JSON");
        assert_eq!(value["cis_mode"], 2);
        assert_eq!(value["ssh"]["rules"][0]["name"], "permit_root");
        assert_eq!(value["ssh"]["rules"][0]["tier"], 1);
        assert_eq!(value["ssh"]["rules"][0]["severity"], "high");
        assert!(value["compliance"]["failed"].is_array());
    }
}
