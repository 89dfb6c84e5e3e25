pub mod ssh;
pub mod accounts;
pub mod network;
pub mod services;
pub mod packages;
pub mod integrity;

use crate::config::EngineConfig;
use crate::types::*;

/// A section of probe data that yields compliance checks
pub trait FactSource {
    /// Derive the check outcomes for this section
    fn facts(&self, config: &EngineConfig) -> Vec<CheckFact>;

    /// Get the category name for this section
    fn category(&self) -> &'static str;
}

/// `systemctl is-active` style status check
pub(crate) fn is_active(status: &str) -> bool {
    status.trim().eq_ignore_ascii_case("active")
}
