pub mod config;
pub mod emit;
pub mod error;
pub mod modules;
pub mod scoring;
pub mod types;

use anyhow::Result;
use chrono::Utc;
use config::EngineConfig;
use modules::ssh::SshHardeningEvaluator;
use modules::FactSource;
use scoring::Scorer;
use types::*;

/// Turns a probe snapshot into a scored system report
pub struct ReportRunner {
    config: EngineConfig,
}

impl ReportRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Get hostname
    fn get_hostname() -> String {
        nix::unistd::gethostname()
            .ok()
            .and_then(|h| h.into_string().ok())
            .unwrap_or_else(|| "unknown".to_string())
    }

    /// Score a snapshot and assemble the full report
    pub fn run(&self, snapshot: &ProbeSnapshot) -> Result<SystemReport> {
        let metadata = ReportMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
            hostname: snapshot
                .hostname
                .clone()
                .filter(|h| !h.trim().is_empty())
                .unwrap_or_else(Self::get_hostname),
        };

        let ssh = SshHardeningEvaluator::from_config(&self.config).evaluate_probe(&snapshot.ssh);

        // Evaluation order is the order failed checks are reported in
        let sources: [&dyn FactSource; 10] = [
            &snapshot.ipv6,
            &ssh,
            &snapshot.docker,
            &snapshot.accounts,
            &snapshot.services,
            &snapshot.auditd,
            &snapshot.aide,
            &snapshot.lynis,
            &snapshot.rkhunter,
            &snapshot.packages,
        ];

        let mut scorer = Scorer::new();
        for source in sources {
            let facts = source.facts(&self.config);
            tracing::debug!(category = source.category(), checks = facts.len(), "collected checks");
            scorer.extend(facts)?;
        }
        scorer.extend(snapshot.extra_facts.iter().cloned())?;

        let compliance = scorer.compute(self.config.cis_mode);
        tracing::info!(
            host = %metadata.hostname,
            score = compliance.score,
            failed = compliance.failed.len(),
            cis_mode = %self.config.cis_mode,
            "compliance computed"
        );

        Ok(SystemReport {
            metadata,
            kernel: snapshot.kernel.clone(),
            cis_mode: self.config.cis_mode,
            compliance,
            ipv6: snapshot.ipv6.clone(),
            ssh,
            docker: snapshot.docker.clone(),
            proxy: snapshot.proxy.clone(),
            aide: snapshot.aide.clone(),
            auditd: snapshot.auditd.clone(),
            packages: snapshot.packages.clone(),
            lynis: snapshot.lynis.clone(),
            rkhunter: snapshot.rkhunter.clone(),
            accounts: snapshot.accounts.clone(),
            services: snapshot.services.clone(),
            checks: scorer.facts().to_vec(),
        })
    }
}

impl Default for ReportRunner {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
