use anyhow::Result;
use serde::Serialize;
use std::path::PathBuf;
use sysreport_core::types::{FailedCheck, Severity, SystemReport, Tier};

/// Format the run summary as human-readable text
pub fn format_text(report: &SystemReport, threshold: f64) -> String {
    let mut output = String::new();

    // Header
    output.push_str("═══════════════════════════════════════════════════════════════\n");
    output.push_str("                  System Compliance Report\n");
    output.push_str("═══════════════════════════════════════════════════════════════\n\n");

    output.push_str(&format!("Host: {}\n", report.metadata.hostname));
    output.push_str(&format!(
        "Timestamp: {}\n",
        report.metadata.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !report.kernel.is_empty() {
        output.push_str(&format!("Kernel: {}\n", report.kernel));
    }
    output.push_str(&format!(
        "CIS mode: {} ({})\n\n",
        report.cis_mode,
        match report.cis_mode {
            Tier::Baseline => "baseline",
            Tier::Strict => "baseline + strict",
        }
    ));

    // Score
    output.push_str("─────────────────────────────────────────────────────────────\n");
    output.push_str("COMPLIANCE\n");
    output.push_str("─────────────────────────────────────────────────────────────\n");
    output.push_str(&format!("Compliance Score: {}%\n", report.compliance.score));
    output.push_str(&format!(
        "Weight: {} of {} passed\n",
        report.compliance.passed_weight, report.compliance.total_weight
    ));
    if report.below_threshold(threshold) {
        output.push_str(&format!("Below threshold of {}%\n", threshold));
    }
    output.push('\n');

    // SSH
    output.push_str("─────────────────────────────────────────────────────────────\n");
    output.push_str("SSH HARDENING\n");
    output.push_str("─────────────────────────────────────────────────────────────\n");
    output.push_str(&format!("SSH Score: {}%\n", report.ssh.score));
    for finding in &report.ssh.weak_algorithms {
        output.push_str(&format!("  {}\n", finding));
    }
    if report.ssh.weak_moduli_count > 0 {
        let sizes: Vec<String> = report.ssh.weak_moduli.iter().map(|b| b.to_string()).collect();
        output.push_str(&format!(
            "  Weak moduli: {} ({})\n",
            report.ssh.weak_moduli_count,
            sizes.join(", ")
        ));
    }
    output.push('\n');

    // Failed checks, most severe first
    output.push_str("─────────────────────────────────────────────────────────────\n");
    if report.failed().is_empty() {
        output.push_str("All checks passed\n");
    } else {
        output.push_str("FAILED CHECKS\n");
        output.push_str("─────────────────────────────────────────────────────────────\n");

        let mut failed: Vec<&FailedCheck> = report.failed().iter().collect();
        failed.sort_by(|a, b| b.severity.cmp(&a.severity));

        for check in failed {
            output.push_str(&format!(
                "[{}] {}: {}\n",
                severity_label(check.severity),
                check.name,
                check.message
            ));
        }
    }

    output.push_str("═══════════════════════════════════════════════════════════════\n");

    output
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::High => "HIGH",
        Severity::Medium => "MEDIUM",
        Severity::Low => "LOW",
    }
}

#[derive(Serialize)]
struct Summary<'a> {
    hostname: &'a str,
    cis_mode: Tier,
    compliance_score: f64,
    threshold: f64,
    below_threshold: bool,
    ssh_hardening_score: f64,
    failed: &'a [FailedCheck],
    reports: &'a [PathBuf],
}

/// Format the run summary as JSON
pub fn format_json(report: &SystemReport, threshold: f64, reports: &[PathBuf]) -> Result<String> {
    let summary = Summary {
        hostname: &report.metadata.hostname,
        cis_mode: report.cis_mode,
        compliance_score: report.compliance.score,
        threshold,
        below_threshold: report.below_threshold(threshold),
        ssh_hardening_score: report.ssh.score,
        failed: report.failed(),
        reports,
    };
    let mut output = serde_json::to_string_pretty(&summary)?;
    output.push('\n');
    Ok(output)
}
