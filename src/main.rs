mod check;
mod config;
mod region;
mod report;
mod source;
mod topology;

use std::path::PathBuf;

use anyhow::Context;
use clap::error::ErrorKind;
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::EnvFilter;

use check::{run_check, CheckResult, Severity};
use config::{Config, ConfigError};
use report::Report;
use source::{ElastiCacheSource, SnapshotSource, TopologySource};

/// Check that an ElastiCache node still holds the primary role
#[derive(Parser, Debug)]
#[command(name = "check-elasticache-failover", version)]
struct CliArgs {
    /// TOML configuration file. Flags override its values.
    #[arg(long, value_name = "FILE", env = "FAILOVER_CHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Profile name of AWS shared credential file entry.
    #[arg(short, long, value_name = "PROFILE", env = "AWS_PROFILE")]
    profile: Option<String>,

    /// AWS region.
    #[arg(short, long, value_name = "REGION")]
    region: Option<String>,

    /// Severity reported when the node is not primary [default: critical]
    #[arg(short, long, value_name = "SEVERITY")]
    severity: Option<String>,

    /// Replication group to check.
    #[arg(short = 'g', long, value_name = "ID")]
    replication_group: Option<String>,

    /// Node group to check.
    #[arg(short, long, value_name = "ID")]
    node_group: Option<String>,

    /// Cluster name that should be primary.
    #[arg(short = 'c', long, value_name = "NAME")]
    primary_node: Option<String>,

    /// Read the topology from `aws elasticache describe-replication-groups` JSON output.
    #[arg(long, value_name = "FILE")]
    topology_file: Option<PathBuf>,

    /// Timeout for instance metadata region discovery (milliseconds).
    #[arg(long, value_name = "MS")]
    metadata_timeout_ms: Option<u64>,

    /// Log level written to stderr (overridden by RUST_LOG).
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: Level,
}

impl CliArgs {
    /// Load the config file if given, then apply flag overrides
    fn into_config(self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => {
                let config = config::load_config(path)?;
                info!(path = %path.display(), "Loaded configuration");
                config
            }
            None => Config::default(),
        };

        if let Some(v) = self.replication_group {
            config.check.replication_group = Some(v);
        }
        if let Some(v) = self.node_group {
            config.check.node_group = Some(v);
        }
        if let Some(v) = self.primary_node {
            config.check.primary_node = Some(v);
        }
        if let Some(v) = self.severity {
            config.check.severity = Severity::new(v);
        }
        if let Some(v) = self.topology_file {
            config.check.topology_file = Some(v);
        }
        if let Some(v) = self.profile {
            config.aws.profile = Some(v);
        }
        if let Some(v) = self.region {
            config.aws.region = Some(v);
        }
        if let Some(v) = self.metadata_timeout_ms {
            config.region.metadata_timeout_ms = v;
        }

        Ok(config)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let rendered = e.to_string();
            let first_line = rendered.lines().next().unwrap_or_default();
            finish(Report::unknown(first_line.trim_start_matches("error: ")))
        }
    };

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(args.log_level.into())
                .from_env_lossy(),
        )
        .init();

    let report = match run(args).await {
        Ok(result) => Report::from(result),
        Err(e) => {
            let message = format!("{e:#}");
            warn!(error = %message, "Check could not be evaluated");
            Report::unknown(&message)
        }
    };

    finish(report);
}

/// One fetch-then-evaluate pass
async fn run(args: CliArgs) -> anyhow::Result<CheckResult> {
    let config = args.into_config()?;
    let target = config.target()?;

    let source = build_source(&config).await;
    info!(
        source = source.name(),
        replication_group = %target.replication_group_id,
        node_group = %target.node_group_id,
        primary_node = %target.primary_cluster_id,
        "Fetching topology"
    );

    let topology = source
        .fetch()
        .await
        .context("Failed to describe replication groups")?;

    let result = run_check(&topology, &target, &config.check.severity);
    info!(message = %result.message(), "Check evaluated");
    Ok(result)
}

async fn build_source(config: &Config) -> Box<dyn TopologySource> {
    if let Some(path) = &config.check.topology_file {
        return Box::new(SnapshotSource::new(path));
    }

    let providers = region::default_chain(
        config.aws.region.clone(),
        config.aws.profile.clone(),
        &config.region,
    );
    let region = region::first_available(&providers).await;
    if region.is_none() {
        warn!("No region determined, leaving region resolution to the AWS SDK");
    }

    Box::new(ElastiCacheSource::new(config.aws.profile.as_deref(), region).await)
}

fn finish(report: Report) -> ! {
    println!("{report}");
    std::process::exit(report.exit_code());
}
