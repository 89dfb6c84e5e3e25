mod formatter;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use sysreport_core::config::EngineConfig;
use sysreport_core::modules::ssh::{parse_moduli, EffectiveConfig};
use sysreport_core::types::{ProbeSnapshot, Tier};
use sysreport_core::{emit, ReportRunner};
use formatter::{format_json, format_text};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Exit code when the score is below the requested threshold
const THRESHOLD_EXIT_CODE: u8 = 2;

/// `ssh.source` label for configuration read through `--sshd-config`
const SSHD_CONFIG_SOURCE: &str = "sshd_config";

#[derive(Parser)]
#[command(name = "sysreport")]
#[command(version)]
#[command(about = "Compliance scoring and reporting for hardened system images", long_about = None)]
struct Cli {
    /// Probe snapshot (JSON) collected on the host
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Effective sshd configuration (`sshd -T` output or sshd_config)
    #[arg(long)]
    sshd_config: Option<PathBuf>,

    /// DH moduli file (/etc/ssh/moduli format)
    #[arg(long)]
    moduli: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Compliance tier to score: 1 (baseline) or 2 (baseline + strict)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=2))]
    cis_mode: Option<u8>,

    /// Minimum acceptable compliance score
    #[arg(long)]
    cis_threshold: Option<f64>,

    /// Exit with code 2 when the score is below the threshold
    #[arg(long)]
    fail_on_threshold: bool,

    /// Directory receiving system_report.json, metrics.txt and codequality.json
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Summary format printed to stdout
    #[arg(short, long, value_enum, default_value_t = SummaryFormat::Text)]
    format: SummaryFormat,

    /// Do not print a summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum SummaryFormat {
    /// Human-readable text format
    Text,
    /// JSON format
    Json,
}

impl Cli {
    /// Apply command-line overrides on top of the file configuration
    fn engine_config(&self) -> Result<EngineConfig> {
        let mut config = EngineConfig::load_or_default(self.config.as_deref())?;

        if let Some(mode) = self.cis_mode {
            config.cis_mode = Tier::try_from(mode).map_err(anyhow::Error::msg)?;
        }
        if let Some(threshold) = self.cis_threshold {
            config.cis_threshold = threshold;
        }
        if self.fail_on_threshold {
            config.fail_on_threshold = true;
        }
        if let Some(ref out_dir) = self.out_dir {
            config.out_dir = out_dir.clone();
        }

        Ok(config)
    }

    /// Load the probe snapshot and fold in the standalone SSH inputs
    fn snapshot(&self) -> Result<ProbeSnapshot> {
        let mut snapshot = match self.input {
            Some(ref path) => {
                let content = std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read probe snapshot {}", path.display()))?;
                serde_json::from_str(&content)
                    .with_context(|| format!("Invalid probe snapshot {}", path.display()))?
            }
            None => {
                tracing::warn!("no probe snapshot given, host checks will fail");
                ProbeSnapshot::default()
            }
        };

        if let Some(ref path) = self.sshd_config {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read sshd configuration {}", path.display()))?;
            let effective = EffectiveConfig::parse(&content);
            snapshot.ssh.effective = effective
                .iter()
                .map(|(directive, value)| (directive.key().to_string(), value.to_string()))
                .collect();
            snapshot.ssh.source = SSHD_CONFIG_SOURCE.to_string();
            tracing::debug!(path = %path.display(), "effective sshd configuration loaded");
        }

        if let Some(ref path) = self.moduli {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read moduli file {}", path.display()))?;
            snapshot.ssh.moduli = parse_moduli(&content);
        }

        Ok(snapshot)
    }
}

fn main() -> Result<ExitCode> {
    // Logs go to stderr so stdout stays clean for the summary
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let config = cli.engine_config()?;
    let snapshot = cli.snapshot()?;

    let runner = ReportRunner::new(config);
    let report = runner.run(&snapshot)?;
    let config = runner.config();

    let written = emit::write_all(&report, &config.out_dir).with_context(|| {
        format!("Failed to write reports to {}", config.out_dir.display())
    })?;

    if !cli.quiet {
        let output = match cli.format {
            SummaryFormat::Text => format_text(&report, config.cis_threshold),
            SummaryFormat::Json => format_json(&report, config.cis_threshold, &written)?,
        };
        print!("{}", output);
    }

    if config.fail_on_threshold && report.below_threshold(config.cis_threshold) {
        tracing::warn!(
            score = report.compliance_score(),
            threshold = config.cis_threshold,
            "compliance below threshold"
        );
        return Ok(ExitCode::from(THRESHOLD_EXIT_CODE));
    }

    Ok(ExitCode::SUCCESS)
}
