use crate::config::EngineConfig;
use crate::types::{CheckFact, DockerStatus, Severity, ServicesStatus};
use super::{is_active, FactSource};

/// Time sync and cloud-init units
impl FactSource for ServicesStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        vec![
            CheckFact::new(
                "timesyncd",
                is_active(&self.timesyncd),
                Severity::Medium,
                "timesyncd should be active",
            ),
            CheckFact::new(
                "cloud_init",
                is_active(&self.cloud_init),
                Severity::Medium,
                "cloud-init should be active",
            ),
        ]
    }

    fn category(&self) -> &'static str {
        "services"
    }
}

/// Docker daemon state. An image without docker is compliant; an installed
/// daemon must be running.
impl FactSource for DockerStatus {
    fn facts(&self, _config: &EngineConfig) -> Vec<CheckFact> {
        if !self.installed() {
            return vec![CheckFact::new(
                "docker_not_installed",
                true,
                Severity::Medium,
                "Docker not installed",
            )];
        }

        vec![CheckFact::new(
            "docker_service",
            is_active(&self.service),
            Severity::Medium,
            "Docker service should be active",
        )]
    }

    fn category(&self) -> &'static str {
        "docker"
    }
}
