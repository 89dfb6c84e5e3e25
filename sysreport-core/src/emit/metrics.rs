//! Flat `key:value` metrics document

use crate::types::SystemReport;

/// Render the scalar metrics, one `key:value` pair per line
pub fn render(report: &SystemReport) -> String {
    let score = |value: Option<u32>| value.map(|v| v.to_string()).unwrap_or_default();

    let metrics: Vec<(&str, String)> = vec![
        ("kernel_version", report.kernel.clone()),
        ("compliance_score", report.compliance.score.to_string()),
        ("cis_mode", report.cis_mode.to_string()),
        ("ipv6_sysctl", report.ipv6.sysctl.clone()),
        ("ipv6_status", report.ipv6.status.clone()),
        ("ssh_service", report.ssh.service.clone()),
        ("ssh_hardening_score", report.ssh.score.to_string()),
        ("ssh_weak_algorithms", report.ssh.weak_algorithms.len().to_string()),
        ("ssh_weak_moduli", report.ssh.weak_moduli_count.to_string()),
        ("docker_status", report.docker.service.clone()),
        ("docker_installed", report.docker.installed().to_string()),
        ("aide_result", report.aide.result.clone()),
        ("lynis_installed", report.lynis.installed.to_string()),
        ("lynis_score", score(report.lynis.score)),
        ("lynis_warnings", report.lynis.warnings.len().to_string()),
        ("rkhunter_installed", report.rkhunter.installed.to_string()),
        ("rkhunter_status", report.rkhunter.status.clone()),
        ("rkhunter_warnings", report.rkhunter.warnings.len().to_string()),
        ("rkhunter_ignored_warnings", report.rkhunter.ignored_warnings.len().to_string()),
    ];

    metrics
        .into_iter()
        .map(|(key, value)| format!("{}:{}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}
