//! Audit, file integrity and host scanner results

use crate::config::EngineConfig;
use crate::types::{
    AideStatus, AuditdStatus, CheckFact, LynisStatus, RkhunterStatus, Severity, Tier,
};
use super::{is_active, FactSource};

impl FactSource for AuditdStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        vec![
            CheckFact::new(
                "auditd_installed",
                self.installed,
                Severity::High,
                "auditd should be installed",
            ),
            CheckFact::new(
                "auditd_service",
                is_active(&self.service),
                Severity::High,
                "auditd should be running",
            ),
            CheckFact::new(
                "audispd_plugins",
                self.audispd_plugins,
                Severity::Low,
                "audispd-plugins should be installed",
            )
            .with_tier(Tier::Strict),
        ]
    }

    fn category(&self) -> &'static str {
        "auditd"
    }
}

impl FactSource for AideStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        let fact = if self.installed {
            CheckFact::new(
                "aide_check",
                self.result.trim() == "ok",
                Severity::High,
                "AIDE check should pass",
            )
        } else {
            CheckFact::new("aide_installed", false, Severity::High, "AIDE not installed")
        };
        vec![fact.with_tier(Tier::Strict)]
    }

    fn category(&self) -> &'static str {
        "aide"
    }
}

impl FactSource for LynisStatus {
    fn facts(&self, config: &EngineConfig) -> Vec<CheckFact> {
        let fact = if self.installed {
            let score = self.score.unwrap_or(0);
            CheckFact::new(
                "lynis_score",
                score >= config.lynis_min_score,
                Severity::High,
                format!(
                    "Lynis hardening index >= {} (found {})",
                    config.lynis_min_score, score
                ),
            )
        } else {
            CheckFact::new("lynis_installed", false, Severity::Low, "Lynis not installed")
        };
        vec![fact.with_tier(Tier::Strict)]
    }

    fn category(&self) -> &'static str {
        "lynis"
    }
}

impl FactSource for RkhunterStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        // Ignored warnings are reported separately and never fail the check
        let fact = if self.installed {
            CheckFact::new(
                "rkhunter",
                self.warnings.is_empty(),
                Severity::High,
                "rkhunter should report no warnings",
            )
        } else {
            CheckFact::new("rkhunter_installed", false, Severity::Low, "rkhunter not installed")
        };
        vec![fact.with_tier(Tier::Strict)]
    }

    fn category(&self) -> &'static str {
        "rkhunter"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auditd_facts() {
        let status = AuditdStatus {
            installed: true,
            service: "active".to_string(),
            enabled: "enabled".to_string(),
            audispd_plugins: false,
        };
        let facts = status.facts(&EngineConfig::default());
        let outcomes: Vec<_> = facts.iter().map(|f| (f.name.as_str(), f.passed)).collect();
        assert_eq!(
            outcomes,
            vec![("auditd_installed", true), ("auditd_service", true), ("audispd_plugins", false)]
        );
        assert_eq!(facts[2].tier, Tier::Strict);
    }

    #[test]
    fn test_aide_not_installed_fails() {
        let facts = AideStatus::default().facts(&EngineConfig::default());
        assert_eq!(facts[0].name, "aide_installed");
        assert!(!facts[0].passed);
    }

    #[test]
    fn test_aide_result() {
        let status = AideStatus {
            installed: true,
            db: "present".to_string(),
            result: "failed".to_string(),
        };
        let facts = status.facts(&EngineConfig::default());
        assert_eq!(facts[0].name, "aide_check");
        assert!(!facts[0].passed);
    }

    #[test]
    fn test_lynis_threshold() {
        let mut status = LynisStatus {
            installed: true,
            score: Some(64),
            warnings: vec![],
        };
        let config = EngineConfig::default();
        let facts = status.facts(&config);
        assert!(facts[0].passed);
        assert_eq!(facts[0].message, "Lynis hardening index >= 60 (found 64)");

        status.score = None;
        assert!(!status.facts(&config)[0].passed);
    }

    #[test]
    fn test_lynis_missing_is_low() {
        let facts = LynisStatus::default().facts(&EngineConfig::default());
        assert_eq!(facts[0].name, "lynis_installed");
        assert_eq!(facts[0].severity, Severity::Low);
    }

    #[test]
    fn test_rkhunter_ignored_warnings_do_not_fail() {
        let status = RkhunterStatus {
            installed: true,
            status: "ok".to_string(),
            warnings: vec![],
            ignored_warnings: vec!["Warning: /usr/bin/lwp-request has been replaced".to_string()],
        };
        assert!(status.facts(&EngineConfig::default())[0].passed);
    }
}
