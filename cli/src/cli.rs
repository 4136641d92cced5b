//! CLI argument parsing with clap derive

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tokio_util::sync::CancellationToken;

use netjanitor_cli::application::services::{CycleOptions, run_cycle, run_loop};
use netjanitor_cli::domain::{ConfigLayer, CycleReport, JanitorConfig};
use netjanitor_cli::infra::config::load_config_file;
use netjanitor_cli::infra::{DockerCli, LocalJobStore};

/// Removes container networks left behind by finished jobs
#[derive(Parser)]
#[command(name = "netjanitor", version)]
pub struct Cli {
    /// Path to the docker binary [default: /usr/bin/docker]
    #[arg(long, env = "NETJANITOR_DOCKER", value_name = "PATH")]
    pub docker: Option<PathBuf>,

    /// Directory containing job files [default: /opt/image-janitor]
    #[arg(long, env = "NETJANITOR_DIR", value_name = "DIR")]
    pub dir: Option<PathBuf>,

    /// Pause between cycles, e.g. 15s or 1m [default: 15s]
    #[arg(long, env = "NETJANITOR_SLEEP", value_name = "DURATION")]
    pub sleep: Option<String>,

    /// Timeout for a single docker invocation [default: 30s]
    #[arg(long, env = "NETJANITOR_TIMEOUT", value_name = "DURATION")]
    pub timeout: Option<String>,

    /// YAML config file; flags and environment override its values
    #[arg(long, env = "NETJANITOR_CONFIG", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run a single cycle and exit
    #[arg(long)]
    pub once: bool,

    /// Classify and log, but never remove networks
    #[arg(long)]
    pub dry_run: bool,

    /// Print one JSON report per cycle on stdout
    #[arg(long)]
    pub json: bool,

    /// Log line format
    #[arg(long, value_enum, env = "NETJANITOR_LOG_FORMAT", default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

impl Cli {
    /// Resolve configuration from defaults, config file, env and flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a value is
    /// invalid.
    pub fn resolve_config(&self) -> Result<JanitorConfig> {
        let file = match &self.config {
            Some(path) => load_config_file(path)?,
            None => ConfigLayer::default(),
        };
        let flags = ConfigLayer {
            docker: self.docker.clone(),
            dir: self.dir.clone(),
            sleep: self.sleep.clone(),
            timeout: self.timeout.clone(),
        };
        JanitorConfig::resolve(file.merge(flags)).context("invalid configuration")
    }

    /// Execute the janitor.
    ///
    /// # Errors
    ///
    /// Returns an error only for startup failures (configuration). Cycle
    /// failures are logged and never end the process.
    pub async fn run(self) -> Result<()> {
        let config = self.resolve_config()?;
        tracing::info!(
            docker = %config.docker_bin.display(),
            dir = %config.job_dir.display(),
            sleep = %humantime::format_duration(config.interval),
            timeout = %humantime::format_duration(config.command_timeout),
            "configuration loaded"
        );

        let runtime = DockerCli::with_timeout(&config.docker_bin, config.command_timeout);
        let store = LocalJobStore;
        let opts = CycleOptions {
            job_dir: config.job_dir.clone(),
            dry_run: self.dry_run,
        };
        let json = self.json;

        if self.once {
            let report = run_cycle(&runtime, &store, &opts).await;
            emit_report(json, &report);
            return Ok(());
        }

        let cancel = CancellationToken::new();
        tokio::spawn(crate::shutdown_signal(cancel.clone()));
        run_loop(&runtime, &store, &opts, config.interval, cancel, |report| {
            emit_report(json, report);
        })
        .await;
        Ok(())
    }
}

/// Write the report as one JSON line. A closed or failing stdout is logged,
/// never fatal.
fn emit_report(json: bool, report: &CycleReport) {
    if !json {
        return;
    }
    let line = match serde_json::to_string(report) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(error = %e, "failed to serialize cycle report");
            return;
        }
    };
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = writeln!(stdout, "{line}").and_then(|()| stdout.flush()) {
        tracing::warn!(error = %e, "failed to write cycle report to stdout");
    }
}
