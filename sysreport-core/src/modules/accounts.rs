use crate::config::EngineConfig;
use crate::types::{AccountsStatus, CheckFact, Severity};
use super::FactSource;

/// Root account lock status
impl FactSource for AccountsStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        vec![CheckFact::new(
            "root_locked",
            self.root_locked,
            Severity::High,
            "root account should be locked",
        )]
    }

    fn category(&self) -> &'static str {
        "accounts"
    }
}
