use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use super::CheckFact;

/// IPv6 state as seen by sysctl and the kernel command line
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ipv6Status {
    pub sysctl: String,
    pub grub_or_cmdline: String,
    pub status: String,
}

/// Raw SSH daemon data gathered by the probe layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SshProbe {
    /// Output of `systemctl is-active ssh`
    pub service: String,

    /// Where the effective configuration came from (`sshd -T` or `sshd_config`)
    pub source: String,

    /// Lower-cased directive name to raw value
    pub effective: BTreeMap<String, String>,

    /// Diffie-Hellman modulus sizes in bits
    pub moduli: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DockerStatus {
    pub version: String,
    pub compose: String,
    pub service: String,
}

impl DockerStatus {
    /// Docker counts as installed when a version string was reported
    pub fn installed(&self) -> bool {
        let version = self.version.trim();
        !version.is_empty() && !version.to_lowercase().contains("not installed")
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxyEndpoints {
    pub http: String,
    pub https: String,
    pub no_proxy: String,
}

/// Proxy settings from the environment, apt and docker
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub env: BTreeMap<String, String>,
    pub apt: ProxyEndpoints,
    pub docker_daemon: ProxyEndpoints,
    pub docker_client: ProxyEndpoints,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AideStatus {
    pub installed: bool,
    pub db: String,
    /// `ok`, `failed`, `db-missing` or `not-installed`
    pub result: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditdStatus {
    pub installed: bool,
    pub service: String,
    pub enabled: String,
    pub audispd_plugins: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackagesStatus {
    pub missing: Vec<String>,
    pub upgradeable_count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LynisStatus {
    pub installed: bool,
    /// Hardening index, when lynis reported one
    pub score: Option<u32>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RkhunterStatus {
    pub installed: bool,
    pub status: String,
    pub warnings: Vec<String>,
    /// Warnings matched by the local allow-list; reported but not held against the host
    pub ignored_warnings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountsStatus {
    pub root_locked: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesStatus {
    pub timesyncd: String,
    pub cloud_init: String,
}

/// Everything the probe layer collected about a host.
///
/// Every section defaults when absent, so a partial snapshot still scores:
/// checks backed by missing data simply fail.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSnapshot {
    pub hostname: Option<String>,
    pub kernel: String,
    pub ipv6: Ipv6Status,
    pub ssh: SshProbe,
    pub docker: DockerStatus,
    pub proxy: ProxySettings,
    pub aide: AideStatus,
    pub auditd: AuditdStatus,
    pub packages: PackagesStatus,
    pub lynis: LynisStatus,
    pub rkhunter: RkhunterStatus,
    pub accounts: AccountsStatus,
    pub services: ServicesStatus,

    /// Facts from probes the engine has no dedicated section for
    pub extra_facts: Vec<CheckFact>,
}
