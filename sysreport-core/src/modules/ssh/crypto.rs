use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use super::config::SshDirective;

/// Algorithm families checked for weak entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CryptoCategory {
    Ciphers,
    Macs,
    Kex,
    Hostkeys,
}

impl CryptoCategory {
    pub const ALL: [CryptoCategory; 4] = [
        CryptoCategory::Ciphers,
        CryptoCategory::Macs,
        CryptoCategory::Kex,
        CryptoCategory::Hostkeys,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CryptoCategory::Ciphers => "ciphers",
            CryptoCategory::Macs => "macs",
            CryptoCategory::Kex => "kex",
            CryptoCategory::Hostkeys => "hostkeys",
        }
    }

    /// sshd directive carrying this family's algorithm list
    pub fn directive(&self) -> SshDirective {
        match self {
            CryptoCategory::Ciphers => SshDirective::Ciphers,
            CryptoCategory::Macs => SshDirective::Macs,
            CryptoCategory::Kex => SshDirective::KexAlgorithms,
            CryptoCategory::Hostkeys => SshDirective::HostKeyAlgorithms,
        }
    }

    fn patterns(&self) -> &'static [Regex] {
        match self {
            CryptoCategory::Ciphers => WEAK_CIPHERS.as_slice(),
            CryptoCategory::Macs => WEAK_MACS.as_slice(),
            CryptoCategory::Kex => WEAK_KEX.as_slice(),
            CryptoCategory::Hostkeys => WEAK_HOSTKEYS.as_slice(),
        }
    }
}

impl fmt::Display for CryptoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CryptoCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ciphers" => Ok(CryptoCategory::Ciphers),
            "macs" => Ok(CryptoCategory::Macs),
            "kex" | "kexalgorithms" => Ok(CryptoCategory::Kex),
            "hostkeys" | "hostkeyalgorithms" => Ok(CryptoCategory::Hostkeys),
            other => Err(format!(
                "Unknown algorithm category '{}'. Valid categories: ciphers, macs, kex, hostkeys",
                other
            )),
        }
    }
}

// Weak algorithm patterns, compiled once
fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns
        .iter()
        .map(|p| Regex::new(p).expect("weak algorithm pattern is valid"))
        .collect()
}

static WEAK_CIPHERS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"-cbc", r"arcfour", r"blowfish", r"3des", r"aes128-cbc"]));

static WEAK_MACS: LazyLock<Vec<Regex>> = LazyLock::new(|| compile(&[r"md5", r"hmac-sha1-96"]));

// `group1-` rather than `group1` so group14/group16 are not flagged
static WEAK_KEX: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"group1-", r"group-exchange-sha1", r"sha1(,|\s|$)"]));

static WEAK_HOSTKEYS: LazyLock<Vec<Regex>> =
    LazyLock::new(|| compile(&[r"ssh-dss", r"ecdsa-sha2-nistp256", r"rsa1"]));

/// A weak algorithm pattern found in a configured algorithm list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoFinding {
    pub category: CryptoCategory,

    /// The whole configured value, not just the matched token
    pub value: String,

    /// Pattern that matched
    pub pattern: String,
}

impl fmt::Display for CryptoFinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Weak {}: {}", self.category, self.value)
    }
}

/// Flags algorithm lists containing known-weak entries
#[derive(Debug, Clone, Copy, Default)]
pub struct CryptoPatternEvaluator;

impl CryptoPatternEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// One finding per weak pattern that matches anywhere in `value`.
    ///
    /// An empty value yields nothing: an unset list means the daemon default,
    /// which is not evidence of weakness.
    pub fn classify(&self, category: CryptoCategory, value: &str) -> Vec<CryptoFinding> {
        let value = value.trim();
        if value.is_empty() {
            return Vec::new();
        }

        category
            .patterns()
            .iter()
            .filter(|pattern| pattern.is_match(value))
            .map(|pattern| CryptoFinding {
                category,
                value: value.to_string(),
                pattern: pattern.as_str().to_string(),
            })
            .collect()
    }
}
