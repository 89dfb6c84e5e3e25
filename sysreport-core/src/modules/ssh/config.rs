use std::collections::BTreeMap;
use std::fmt;

/// sshd directives the hardening rules read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SshDirective {
    PermitRootLogin,
    PasswordAuthentication,
    X11Forwarding,
    AllowAgentForwarding,
    AllowTcpForwarding,
    Ciphers,
    Macs,
    KexAlgorithms,
    HostKeyAlgorithms,
}

impl SshDirective {
    pub const ALL: [SshDirective; 9] = [
        SshDirective::PermitRootLogin,
        SshDirective::PasswordAuthentication,
        SshDirective::X11Forwarding,
        SshDirective::AllowAgentForwarding,
        SshDirective::AllowTcpForwarding,
        SshDirective::Ciphers,
        SshDirective::Macs,
        SshDirective::KexAlgorithms,
        SshDirective::HostKeyAlgorithms,
    ];

    /// Lower-cased key as printed by `sshd -T`
    pub fn key(&self) -> &'static str {
        match self {
            SshDirective::PermitRootLogin => "permitrootlogin",
            SshDirective::PasswordAuthentication => "passwordauthentication",
            SshDirective::X11Forwarding => "x11forwarding",
            SshDirective::AllowAgentForwarding => "allowagentforwarding",
            SshDirective::AllowTcpForwarding => "allowtcpforwarding",
            SshDirective::Ciphers => "ciphers",
            SshDirective::Macs => "macs",
            SshDirective::KexAlgorithms => "kexalgorithms",
            SshDirective::HostKeyAlgorithms => "hostkeyalgorithms",
        }
    }

    /// Look a directive up by key, ignoring case
    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        Self::ALL.into_iter().find(|d| d.key() == key)
    }
}

impl fmt::Display for SshDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Effective sshd configuration restricted to the directives we evaluate.
///
/// A directive that was never reported is `None`; rules treat that as
/// unverifiable rather than compliant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveConfig {
    values: BTreeMap<SshDirective, String>,
}

impl EffectiveConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from directive/value pairs; unknown keys are dropped and the first
    /// value seen for a directive wins.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::new();
        for (key, value) in pairs {
            match SshDirective::from_key(key.as_ref()) {
                Some(directive) => {
                    config
                        .values
                        .entry(directive)
                        .or_insert_with(|| value.as_ref().trim().to_string());
                }
                None => tracing::trace!(key = key.as_ref(), "ignoring unevaluated sshd directive"),
            }
        }
        config
    }

    /// Parse `sshd -T` output or an `sshd_config` file.
    ///
    /// Parsing stops at the first `Match` block since directives after it are conditional.
    pub fn parse(content: &str) -> Self {
        let mut pairs = Vec::new();

        for line in content.lines() {
            let line = line.trim();

            // Skip comments and empty lines
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            // sshd_config accepts `Key value` and `Key = value` with any spacing
            let split = line
                .find(|c: char| c == '=' || c.is_whitespace())
                .unwrap_or(line.len());
            let (key, rest) = line.split_at(split);
            let rest = rest.trim_start();
            let value = rest.strip_prefix('=').unwrap_or(rest).trim();

            if key.eq_ignore_ascii_case("match") {
                break;
            }

            if key.is_empty() {
                tracing::debug!(line, "skipping malformed sshd line");
                continue;
            }

            pairs.push((key.to_lowercase(), value.to_string()));
        }

        Self::from_pairs(pairs)
    }

    pub fn set(&mut self, directive: SshDirective, value: impl Into<String>) {
        self.values.insert(directive, value.into());
    }

    pub fn get(&self, directive: SshDirective) -> Option<&str> {
        self.values.get(&directive).map(|s| s.as_str())
    }

    /// Whether the directive is explicitly set to `no`
    pub fn is_disabled(&self, directive: SshDirective) -> bool {
        self.get(directive)
            .is_some_and(|value| value.eq_ignore_ascii_case("no"))
    }

    pub fn permit_root_login(&self) -> Option<&str> {
        self.get(SshDirective::PermitRootLogin)
    }

    pub fn password_authentication(&self) -> Option<&str> {
        self.get(SshDirective::PasswordAuthentication)
    }

    pub fn x11_forwarding(&self) -> Option<&str> {
        self.get(SshDirective::X11Forwarding)
    }

    pub fn allow_agent_forwarding(&self) -> Option<&str> {
        self.get(SshDirective::AllowAgentForwarding)
    }

    pub fn allow_tcp_forwarding(&self) -> Option<&str> {
        self.get(SshDirective::AllowTcpForwarding)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Directives that were reported, in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (SshDirective, &str)> {
        self.values.iter().map(|(directive, value)| (*directive, value.as_str()))
    }
}

/// Parse Diffie-Hellman modulus sizes from an `/etc/ssh/moduli` style source.
///
/// Moduli rows have seven columns where the fifth is the size in bits minus
/// one; a line holding a single integer is taken as a bit length as-is.
/// Anything else is skipped.
pub fn parse_moduli(content: &str) -> Vec<u32> {
    let mut sizes = Vec::new();

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let parsed = match fields.as_slice() {
            [bits] => bits.parse::<u32>().ok(),
            [_, _, _, _, size, _, _] => size.parse::<u32>().ok().map(|s| s.saturating_add(1)),
            _ => None,
        };

        match parsed {
            Some(bits) => sizes.push(bits),
            None => tracing::debug!(line, "skipping malformed moduli line"),
        }
    }

    sizes
}

#[cfg(test)]
mod tests {
    use super::*;

    const SSHD_T: &str = "\
port 22
permitrootlogin no
passwordauthentication no
x11forwarding yes
allowagentforwarding no
ciphers chacha20-poly1305@openssh.com,aes256-ctr
kexalgorithms curve25519-sha256
";

    #[test]
    fn test_parse_effective_output() {
        let config = EffectiveConfig::parse(SSHD_T);
        assert_eq!(config.permit_root_login(), Some("no"));
        assert_eq!(config.x11_forwarding(), Some("yes"));
        assert_eq!(
            config.get(SshDirective::Ciphers),
            Some("chacha20-poly1305@openssh.com,aes256-ctr")
        );
        assert_eq!(config.allow_tcp_forwarding(), None);
        assert!(config.is_disabled(SshDirective::PasswordAuthentication));
        assert!(!config.is_disabled(SshDirective::X11Forwarding));
        assert!(!config.is_disabled(SshDirective::AllowTcpForwarding));

        let keys: Vec<_> = config.iter().map(|(d, _)| d.key()).collect();
        assert_eq!(
            keys,
            vec![
                "permitrootlogin",
                "passwordauthentication",
                "x11forwarding",
                "allowagentforwarding",
                "ciphers",
                "kexalgorithms",
            ]
        );
    }

    #[test]
    fn test_parse_sshd_config_file() {
        let content = "\
# comment
PermitRootLogin No
PasswordAuthentication=no
PermitRootLogin yes

Match User backup
    X11Forwarding yes
";
        let config = EffectiveConfig::parse(content);
        assert!(config.is_disabled(SshDirective::PermitRootLogin));
        assert_eq!(config.password_authentication(), Some("no"));
        assert_eq!(config.x11_forwarding(), None);
    }

    #[test]
    fn test_parse_equals_with_spacing() {
        let content = "\
PasswordAuthentication = no
PermitRootLogin= no
X11Forwarding =no
AllowAgentForwarding\t=\tno
Ciphers = aes256-gcm@openssh.com,aes128-ctr
";
        let config = EffectiveConfig::parse(content);
        assert_eq!(config.password_authentication(), Some("no"));
        assert_eq!(config.permit_root_login(), Some("no"));
        assert_eq!(config.x11_forwarding(), Some("no"));
        assert!(config.is_disabled(SshDirective::PasswordAuthentication));
        assert!(config.is_disabled(SshDirective::PermitRootLogin));
        assert!(config.is_disabled(SshDirective::X11Forwarding));
        assert!(config.is_disabled(SshDirective::AllowAgentForwarding));
        assert_eq!(
            config.get(SshDirective::Ciphers),
            Some("aes256-gcm@openssh.com,aes128-ctr")
        );
    }

    #[test]
    fn test_from_pairs_ignores_unknown_keys() {
        let config =
            EffectiveConfig::from_pairs([("PermitRootLogin", "no"), ("banner", "/etc/issue")]);
        assert_eq!(config.permit_root_login(), Some("no"));
        assert_eq!(SshDirective::from_key("banner"), None);
        assert_eq!(SshDirective::from_key("protocol"), None);
        assert_eq!(SshDirective::from_key("KexAlgorithms"), Some(SshDirective::KexAlgorithms));
    }

    #[test]
    fn test_parse_moduli_rows() {
        let content = "\
#    $OpenBSD: moduli,v 1.34 2023/07/17 05:41:53 djm Exp $
20230706040406 2 6 100 1023 5 CB4B6F1A
20230706040407 2 6 100 2047 2 D4A9E23B
20230706040408 2 6 100 4095 5 F12C0B1D
garbage line here
4096
";
        assert_eq!(parse_moduli(content), vec![1024, 2048, 4096, 4096]);
    }
}
