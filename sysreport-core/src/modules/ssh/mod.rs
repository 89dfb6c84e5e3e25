//! SSH daemon hardening
//!
//! Evaluates the effective sshd configuration and the DH moduli against a
//! fixed rule set. The rules produce ordinary [`CheckFact`]s that feed the
//! global score, and a sub-score over both tiers for the SSH section.

pub mod config;
pub mod crypto;

pub use config::{parse_moduli, EffectiveConfig, SshDirective};
pub use crypto::{CryptoCategory, CryptoFinding, CryptoPatternEvaluator};

use crate::config::EngineConfig;
use crate::scoring::score_facts;
use crate::types::{CheckFact, Severity, SshHardeningReport, SshProbe, Tier};

/// Minimum acceptable Diffie-Hellman modulus size in bits
pub const DEFAULT_MIN_MODULUS_BITS: u32 = 2048;

/// A rule that passes when a directive is explicitly `no`
struct DisabledDirectiveRule {
    name: &'static str,
    directive: SshDirective,
    severity: Severity,
    tier: Tier,
    message: &'static str,
}

const DISABLED_DIRECTIVE_RULES: &[DisabledDirectiveRule] = &[
    DisabledDirectiveRule {
        name: "permit_root",
        directive: SshDirective::PermitRootLogin,
        severity: Severity::High,
        tier: Tier::Baseline,
        message: "PermitRootLogin should be no",
    },
    DisabledDirectiveRule {
        name: "password_auth",
        directive: SshDirective::PasswordAuthentication,
        severity: Severity::High,
        tier: Tier::Baseline,
        message: "PasswordAuthentication should be no",
    },
    DisabledDirectiveRule {
        name: "x11_forwarding",
        directive: SshDirective::X11Forwarding,
        severity: Severity::Medium,
        tier: Tier::Baseline,
        message: "X11Forwarding should be no",
    },
    DisabledDirectiveRule {
        name: "agent_forwarding",
        directive: SshDirective::AllowAgentForwarding,
        severity: Severity::Medium,
        tier: Tier::Baseline,
        message: "AllowAgentForwarding should be no",
    },
    DisabledDirectiveRule {
        name: "tcp_forwarding",
        directive: SshDirective::AllowTcpForwarding,
        severity: Severity::Low,
        tier: Tier::Strict,
        message: "AllowTcpForwarding should be no",
    },
];

/// Weak moduli split into the distinct sizes and the raw occurrence count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeakModuli {
    pub sizes: Vec<u32>,
    pub count: usize,
}

impl WeakModuli {
    pub fn collect(moduli: &[u32], min_bits: u32) -> Self {
        let mut sizes: Vec<u32> = moduli.iter().copied().filter(|&bits| bits < min_bits).collect();
        let count = sizes.len();
        sizes.sort_unstable();
        sizes.dedup();
        Self { sizes, count }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// SSH hardening evaluator
pub struct SshHardeningEvaluator {
    crypto: CryptoPatternEvaluator,
    min_modulus_bits: u32,
}

impl SshHardeningEvaluator {
    pub fn new() -> Self {
        Self {
            crypto: CryptoPatternEvaluator::new(),
            min_modulus_bits: DEFAULT_MIN_MODULUS_BITS,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new().with_min_modulus_bits(config.min_modulus_bits)
    }

    pub fn with_min_modulus_bits(mut self, bits: u32) -> Self {
        self.min_modulus_bits = bits;
        self
    }

    /// All weak algorithm findings across the four algorithm lists
    pub fn weak_algorithms(&self, config: &EffectiveConfig) -> Vec<CryptoFinding> {
        CryptoCategory::ALL
            .into_iter()
            .flat_map(|category| {
                let value = config.get(category.directive()).unwrap_or_default();
                self.crypto.classify(category, value)
            })
            .collect()
    }

    /// Evaluate the rule set against an effective configuration and moduli list
    pub fn evaluate(&self, config: &EffectiveConfig, moduli: &[u32]) -> SshHardeningReport {
        if config.is_empty() {
            tracing::warn!("no effective sshd configuration available, SSH rules will fail");
        }

        let mut rules: Vec<CheckFact> = DISABLED_DIRECTIVE_RULES
            .iter()
            .map(|rule| {
                let passed = config.is_disabled(rule.directive);
                CheckFact::new(rule.name, passed, rule.severity, rule.message).with_tier(rule.tier)
            })
            .collect();

        let findings = self.weak_algorithms(config);
        let mut weak_algorithms: Vec<String> = Vec::new();
        for finding in &findings {
            tracing::debug!(
                category = %finding.category,
                pattern = %finding.pattern,
                "weak algorithm"
            );
            let entry = finding.to_string();
            if !weak_algorithms.contains(&entry) {
                weak_algorithms.push(entry);
            }
        }
        rules.push(
            CheckFact::new(
                "algorithms_strong",
                findings.is_empty(),
                Severity::High,
                "Ciphers, MACs, KexAlgorithms and HostKeyAlgorithms \
                 should not offer weak algorithms",
            )
            .with_tier(Tier::Strict),
        );

        let weak_moduli = WeakModuli::collect(moduli, self.min_modulus_bits);
        rules.push(
            CheckFact::new(
                "moduli",
                weak_moduli.is_empty(),
                Severity::High,
                format!("DH moduli should be at least {} bits", self.min_modulus_bits),
            )
            .with_tier(Tier::Strict),
        );

        // Both tiers always count towards the SSH sub-score
        let score = score_facts(&rules, Tier::Strict).score;

        tracing::info!(
            score,
            weak_algorithms = weak_algorithms.len(),
            weak_moduli = weak_moduli.count,
            "ssh hardening evaluated"
        );

        SshHardeningReport {
            service: String::new(),
            source: String::new(),
            rules,
            score,
            weak_algorithms,
            weak_moduli: weak_moduli.sizes,
            weak_moduli_count: weak_moduli.count,
        }
    }

    /// Evaluate the SSH section of a probe snapshot
    pub fn evaluate_probe(&self, probe: &SshProbe) -> SshHardeningReport {
        let config = EffectiveConfig::from_pairs(&probe.effective);
        let mut report = self.evaluate(&config, &probe.moduli);
        report.service = probe.service.clone();
        report.source = probe.source.clone();
        report
    }
}

impl Default for SshHardeningEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

impl super::FactSource for SshHardeningReport {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        self.rules.clone()
    }

    fn category(&self) -> &'static str {
        "ssh"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hardened() -> EffectiveConfig {
        EffectiveConfig::from_pairs([
            ("permitrootlogin", "no"),
            ("passwordauthentication", "no"),
            ("x11forwarding", "no"),
            ("allowagentforwarding", "no"),
            ("allowtcpforwarding", "no"),
        ])
    }

    fn rule<'a>(report: &'a SshHardeningReport, name: &str) -> &'a CheckFact {
        report.rules.iter().find(|r| r.name == name).unwrap()
    }

    #[test]
    fn test_hardened_config_scores_full() {
        let report = SshHardeningEvaluator::new().evaluate(&hardened(), &[2048, 3072, 4096]);
        assert_eq!(report.rules.len(), 7);
        assert!(report.rules.iter().all(|r| r.passed));
        assert_eq!(report.score, 100.0);
        assert!(report.weak_algorithms.is_empty());
    }

    #[test]
    fn test_algorithms_pass_when_lists_absent() {
        let report = SshHardeningEvaluator::new().evaluate(&hardened(), &[]);
        assert!(rule(&report, "algorithms_strong").passed);
        assert!(rule(&report, "moduli").passed);
    }

    #[test]
    fn test_missing_directives_fail_safe() {
        let report = SshHardeningEvaluator::new().evaluate(&EffectiveConfig::new(), &[]);
        for name in [
            "permit_root",
            "password_auth",
            "x11_forwarding",
            "agent_forwarding",
            "tcp_forwarding",
        ] {
            assert!(!rule(&report, name).passed, "{} should fail when unset", name);
        }
        // 3 + 3 + 2 + 2 + 1 failed, 3 + 3 passed
        assert_eq!(report.score, round2(6.0 / 17.0 * 100.0));
    }

    #[test]
    fn test_weak_moduli_count_and_sizes() {
        let report = SshHardeningEvaluator::new().evaluate(&hardened(), &[1024, 2048, 1024, 4096]);
        assert_eq!(report.weak_moduli_count, 2);
        assert_eq!(report.weak_moduli, vec![1024]);
        assert!(!rule(&report, "moduli").passed);
    }

    #[test]
    fn test_weak_moduli_sorted() {
        let weak = WeakModuli::collect(&[1536, 1024, 8192, 1536, 2047], 2048);
        assert_eq!(weak.sizes, vec![1024, 1536, 2047]);
        assert_eq!(weak.count, 4);
    }

    #[test]
    fn test_weak_algorithms_listed() {
        let mut config = hardened();
        config.set(SshDirective::Macs, "hmac-sha1-96,hmac-sha2-256");
        config.set(SshDirective::Ciphers, "aes128-cbc,aes256-ctr");
        config.set(SshDirective::HostKeyAlgorithms, "ssh-ed25519");

        let report = SshHardeningEvaluator::new().evaluate(&config, &[]);
        assert!(!rule(&report, "algorithms_strong").passed);
        assert_eq!(
            report.weak_algorithms,
            vec![
                "Weak ciphers: aes128-cbc,aes256-ctr".to_string(),
                "Weak macs: hmac-sha1-96,hmac-sha2-256".to_string(),
            ]
        );
    }

    #[test]
    fn test_sub_score_counts_both_tiers() {
        let mut config = hardened();
        config.set(SshDirective::AllowTcpForwarding, "yes");
        let report = SshHardeningEvaluator::new().evaluate(&config, &[]);
        // tcp_forwarding is tier 2 and low: 16 of 17
        assert_eq!(report.score, 94.12);
    }

    #[test]
    fn test_configurable_modulus_floor() {
        let report = SshHardeningEvaluator::new()
            .with_min_modulus_bits(3072)
            .evaluate(&hardened(), &[2048, 4096]);
        assert_eq!(report.weak_moduli, vec![2048]);
        assert_eq!(rule(&report, "moduli").message, "DH moduli should be at least 3072 bits");
    }

    #[test]
    fn test_evaluate_probe_carries_service() {
        let mut probe = SshProbe {
            service: "active".to_string(),
            source: "sshd -T".to_string(),
            ..Default::default()
        };
        probe.effective.insert("permitrootlogin".to_string(), "no".to_string());
        probe.moduli = vec![1024];

        let report = SshHardeningEvaluator::new().evaluate_probe(&probe);
        assert_eq!(report.service, "active");
        assert_eq!(report.source, "sshd -T");
        assert!(rule(&report, "permit_root").passed);
        assert_eq!(report.weak_moduli_count, 1);
    }

    fn round2(value: f64) -> f64 {
        (value * 100.0).round() / 100.0
    }
}
