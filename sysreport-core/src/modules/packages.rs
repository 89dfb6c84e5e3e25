use crate::config::EngineConfig;
use crate::types::{CheckFact, PackagesStatus, Severity};
use super::FactSource;

/// Required package presence
impl FactSource for PackagesStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        let missing = if self.missing.is_empty() {
            "none".to_string()
        } else {
            self.missing.join(",")
        };

        vec![CheckFact::new(
            "packages_required",
            self.missing.is_empty(),
            Severity::High,
            format!("required packages missing: {}", missing),
        )]
    }

    fn category(&self) -> &'static str {
        "packages"
    }
}
