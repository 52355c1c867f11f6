use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre;
use tracing_subscriber::EnvFilter;

use quarry_service::{HealthReport, HealthStatus, QuarryService};

/// Checks that both retrieval backends named in a config file are reachable.
#[derive(Debug, Parser)]
#[command(
	version = quarry_cli::VERSION,
	rename_all = "kebab",
	styles = quarry_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = quarry_config::load(&args.config)?;
	init_tracing(&config)?;
	let service = QuarryService::new(config)?;
	let report = service.health().await;

	println!("{}", serde_json::to_string_pretty(&report)?);

	verdict(&report)
}

/// Degraded still exits zero; only losing both backends is fatal.
pub fn verdict(report: &HealthReport) -> color_eyre::Result<()> {
	if report.status == HealthStatus::Unhealthy {
		return Err(eyre::eyre!(
			"Both retrieval backends are unhealthy ({}, {}).",
			report.semantic.backend_id,
			report.keyword.backend_id
		));
	}

	tracing::info!(status = report.status.as_str(), "Backend health check finished.");

	Ok(())
}

fn init_tracing(config: &quarry_config::Config) -> color_eyre::Result<()> {
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
	tracing_subscriber::fmt().with_writer(std::io::stderr).with_env_filter(filter).init();
	Ok(())
}
