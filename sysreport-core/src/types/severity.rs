use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity level for compliance checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// Weight used when aggregating checks into a score
    pub fn weight(&self) -> u32 {
        match self {
            Severity::Low => 1,
            Severity::Medium => 2,
            Severity::High => 3,
        }
    }

    /// Severity of the corresponding code-quality defect
    pub fn defect_severity(&self) -> DefectSeverity {
        match self {
            Severity::High => DefectSeverity::Critical,
            Severity::Medium => DefectSeverity::Major,
            Severity::Low => DefectSeverity::Minor,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Low => write!(f, "low"),
            Severity::Medium => write!(f, "medium"),
            Severity::High => write!(f, "high"),
        }
    }
}

/// Severity levels understood by code-quality ingestion (GitLab format)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DefectSeverity {
    Minor,
    Major,
    Critical,
}

/// Compliance tier (CIS level). Tier 2 holds the stricter, optional checks.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Tier {
    #[default]
    Baseline,
    Strict,
}

impl Tier {
    /// Whether a check of tier `check` counts when scoring in this mode
    pub fn admits(&self, check: Tier) -> bool {
        check <= *self
    }
}

impl From<Tier> for u8 {
    fn from(tier: Tier) -> u8 {
        match tier {
            Tier::Baseline => 1,
            Tier::Strict => 2,
        }
    }
}

impl TryFrom<u8> for Tier {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            1 => Ok(Tier::Baseline),
            2 => Ok(Tier::Strict),
            other => Err(format!("compliance tier must be 1 or 2, got {}", other)),
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", u8::from(*self))
    }
}
