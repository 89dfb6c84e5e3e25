use crate::config::EngineConfig;
use crate::types::{CheckFact, Ipv6Status, Severity, Tier};
use super::FactSource;

/// IPv6 exposure
impl FactSource for Ipv6Status {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        vec![CheckFact::new(
            "ipv6_sysctl",
            self.sysctl.trim() == "disabled",
            Severity::Low,
            "IPv6 sysctl should be disabled",
        )
        .with_tier(Tier::Strict)]
    }

    fn category(&self) -> &'static str {
        "network"
    }
}
