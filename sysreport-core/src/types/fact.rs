use serde::{Deserialize, Serialize};
use super::{Severity, Tier};

/// Outcome of a single compliance check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckFact {
    /// Unique identifier of the check within a run
    pub name: String,

    pub passed: bool,

    pub severity: Severity,

    /// Compliance tier (CIS level) the check belongs to
    #[serde(default)]
    pub tier: Tier,

    /// Explanation of the rule; present whether or not the check passed
    pub message: String,
}

impl CheckFact {
    /// Create a new tier 1 check outcome
    pub fn new(
        name: impl Into<String>,
        passed: bool,
        severity: Severity,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            passed,
            severity,
            tier: Tier::Baseline,
            message: message.into(),
        }
    }

    /// Set the compliance tier of the check
    pub fn with_tier(mut self, tier: Tier) -> Self {
        self.tier = tier;
        self
    }
}

/// Reduced record of a check that failed during scoring
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedCheck {
    pub name: String,
    pub severity: Severity,
    pub message: String,
}

impl From<&CheckFact> for FailedCheck {
    fn from(fact: &CheckFact) -> Self {
        Self {
            name: fact.name.clone(),
            severity: fact.severity,
            message: fact.message.clone(),
        }
    }
}
