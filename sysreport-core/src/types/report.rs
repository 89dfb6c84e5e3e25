use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use super::*;

/// Metadata about when and where the report was produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub version: String,
    pub timestamp: DateTime<Utc>,
    pub hostname: String,
}

/// Result of a weighted scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReport {
    /// Percentage of passed weight, rounded to two decimals
    pub score: f64,
    pub total_weight: u32,
    pub passed_weight: u32,

    /// Failed checks in evaluation order
    pub failed: Vec<FailedCheck>,
}

/// Outcome of the SSH hardening rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SshHardeningReport {
    pub service: String,
    pub source: String,

    /// Every rule result, passed or not
    pub rules: Vec<CheckFact>,

    /// Sub-score over both tiers
    pub score: f64,

    /// `Weak <category>: <value>` entries
    pub weak_algorithms: Vec<String>,

    /// Distinct weak modulus sizes, ascending
    pub weak_moduli: Vec<u32>,

    /// Number of weak moduli, duplicates included
    pub weak_moduli_count: usize,
}

/// Complete compliance report for a host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemReport {
    pub metadata: ReportMetadata,
    pub kernel: String,
    pub cis_mode: Tier,
    pub compliance: ScoreReport,
    pub ipv6: Ipv6Status,
    pub ssh: SshHardeningReport,
    pub docker: DockerStatus,
    pub proxy: ProxySettings,
    pub aide: AideStatus,
    pub auditd: AuditdStatus,
    pub packages: PackagesStatus,
    pub lynis: LynisStatus,
    pub rkhunter: RkhunterStatus,
    pub accounts: AccountsStatus,
    pub services: ServicesStatus,

    /// Every evaluated check, including tier 2 checks skipped by a tier 1 run
    pub checks: Vec<CheckFact>,
}

impl SystemReport {
    pub fn compliance_score(&self) -> f64 {
        self.compliance.score
    }

    /// Failed checks that counted towards the score
    pub fn failed(&self) -> &[FailedCheck] {
        &self.compliance.failed
    }

    /// Whether the score falls short of `threshold`
    pub fn below_threshold(&self, threshold: f64) -> bool {
        self.compliance.score < threshold
    }
}
