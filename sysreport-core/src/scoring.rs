//! Weighted compliance scoring
//!
//! ```text
//! score = round(passed_weight / total_weight * 100, 2)
//! ```
//!
//! Weights come from [`Severity::weight`] (high 3, medium 2, low 1). A tier 1
//! run ignores tier 2 checks entirely. With no applicable checks the score is
//! 100: nothing was required, so nothing was violated.

use crate::error::ScoringError;
use crate::types::{CheckFact, FailedCheck, ScoreReport, Tier};
use std::collections::HashSet;

/// Accumulates check outcomes for a single run
#[derive(Debug, Default)]
pub struct Scorer {
    facts: Vec<CheckFact>,
    names: HashSet<String>,
}

impl Scorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a check outcome. Names must be unique within the run.
    pub fn add(&mut self, fact: CheckFact) -> Result<(), ScoringError> {
        if !self.names.insert(fact.name.clone()) {
            tracing::error!(check = %fact.name, "duplicate check name rejected");
            return Err(ScoringError::DuplicateCheck(fact.name));
        }
        self.facts.push(fact);
        Ok(())
    }

    /// Record several check outcomes, stopping at the first duplicate
    pub fn extend(
        &mut self,
        facts: impl IntoIterator<Item = CheckFact>,
    ) -> Result<(), ScoringError> {
        for fact in facts {
            self.add(fact)?;
        }
        Ok(())
    }

    /// All recorded facts in insertion order
    pub fn facts(&self) -> &[CheckFact] {
        &self.facts
    }

    /// Score the recorded facts under `mode`
    pub fn compute(&self, mode: Tier) -> ScoreReport {
        score_facts(&self.facts, mode)
    }
}

/// Score a slice of facts under `mode` without a [`Scorer`]
pub fn score_facts(facts: &[CheckFact], mode: Tier) -> ScoreReport {
    let (total_weight, passed_weight, failed) = facts
        .iter()
        .filter(|fact| mode.admits(fact.tier))
        .fold((0u32, 0u32, Vec::new()), |(total, passed, mut failed), fact| {
            let weight = fact.severity.weight();
            if fact.passed {
                (total + weight, passed + weight, failed)
            } else {
                failed.push(FailedCheck::from(fact));
                (total + weight, passed, failed)
            }
        });

    ScoreReport {
        score: percentage(passed_weight, total_weight),
        total_weight,
        passed_weight,
        failed,
    }
}

/// `passed / total` as a percentage rounded to two decimals, 100 when `total` is zero
pub fn percentage(passed: u32, total: u32) -> f64 {
    if total == 0 {
        return 100.0;
    }
    let raw = f64::from(passed) / f64::from(total) * 100.0;
    (raw * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Severity;

    fn fact(name: &str, passed: bool, severity: Severity, tier: Tier) -> CheckFact {
        CheckFact::new(name, passed, severity, format!("{} rule", name)).with_tier(tier)
    }

    #[test]
    fn test_weighted_score() {
        let mut scorer = Scorer::new();
        scorer.add(fact("a", true, Severity::High, Tier::Baseline)).unwrap();
        scorer.add(fact("b", false, Severity::High, Tier::Baseline)).unwrap();
        scorer.add(fact("c", true, Severity::Low, Tier::Baseline)).unwrap();

        let report = scorer.compute(Tier::Baseline);
        assert_eq!(report.total_weight, 7);
        assert_eq!(report.passed_weight, 4);
        assert_eq!(report.score, 57.14);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "b");
        assert_eq!(report.failed[0].message, "b rule");
    }

    #[test]
    fn test_no_checks_is_fully_compliant() {
        let report = Scorer::new().compute(Tier::Strict);
        assert_eq!(report.total_weight, 0);
        assert_eq!(report.score, 100.0);
        assert!(report.failed.is_empty());
    }

    #[test]
    fn test_tier_one_mode_skips_tier_two_checks() {
        let mut scorer = Scorer::new();
        scorer.add(fact("strict_pass", true, Severity::High, Tier::Strict)).unwrap();
        scorer.add(fact("strict_fail", false, Severity::Medium, Tier::Strict)).unwrap();

        let baseline = scorer.compute(Tier::Baseline);
        assert_eq!(baseline.total_weight, 0);
        assert_eq!(baseline.score, 100.0);
        assert!(baseline.failed.is_empty());

        let strict = scorer.compute(Tier::Strict);
        assert_eq!(strict.total_weight, 5);
        assert_eq!(strict.score, 60.0);
        assert_eq!(strict.failed[0].name, "strict_fail");
    }

    #[test]
    fn test_compute_is_idempotent() {
        let mut scorer = Scorer::new();
        scorer.add(fact("a", true, Severity::Medium, Tier::Baseline)).unwrap();
        scorer.add(fact("b", false, Severity::Low, Tier::Strict)).unwrap();
        scorer.add(fact("c", false, Severity::High, Tier::Baseline)).unwrap();

        let first = scorer.compute(Tier::Strict);
        let second = scorer.compute(Tier::Strict);
        assert_eq!(first, second);
        assert_eq!(first.score.to_bits(), second.score.to_bits());
        assert_eq!(scorer.facts().len(), 3);
    }

    #[test]
    fn test_failed_order_follows_insertion() {
        let mut scorer = Scorer::new();
        for name in ["z", "a", "m"] {
            scorer.add(fact(name, false, Severity::Low, Tier::Baseline)).unwrap();
        }
        let names: Vec<_> = scorer
            .compute(Tier::Baseline)
            .failed
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut scorer = Scorer::new();
        scorer.add(fact("dup", true, Severity::High, Tier::Baseline)).unwrap();
        let err = scorer.add(fact("dup", false, Severity::Low, Tier::Baseline)).unwrap_err();
        assert!(matches!(err, ScoringError::DuplicateCheck(ref name) if name == "dup"));

        // The first outcome is kept
        assert_eq!(scorer.facts().len(), 1);
        assert!(scorer.facts()[0].passed);
    }

    #[test]
    fn test_score_stays_in_range() {
        let mut scorer = Scorer::new();
        for i in 0..10 {
            let severity = [Severity::Low, Severity::Medium, Severity::High][i % 3];
            scorer.add(fact(&format!("c{}", i), i % 4 == 0, severity, Tier::Baseline)).unwrap();
        }
        let score = scorer.compute(Tier::Baseline).score;
        assert!((0.0..=100.0).contains(&score));
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(percentage(1, 3), 33.33);
        assert_eq!(percentage(2, 3), 66.67);
        assert_eq!(percentage(0, 5), 0.0);
        assert_eq!(percentage(0, 0), 100.0);
    }
}
