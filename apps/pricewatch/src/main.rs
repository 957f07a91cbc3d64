use anyhow::Context;
use clap::Parser;
use config::{Args, RunConfig};
use dotenv::dotenv;
use pricewatch_coindesk::CoindeskClient;
use pricewatch_email::EmailConfig;
use pricewatch_shared_models::ZoneLocalizer;
use progress::ConsoleProgress;
use source::CoindeskSource;
use tracing::{error, info, warn};

mod config;
mod job;
mod progress;
mod snapshot;
mod source;
mod telemetry;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "cannot listen for ctrl-c, collection will run to completion");
        std::future::pending::<()>().await;
    }
    println!();
    println!("Interrupted, finishing with the prices collected so far...");
}

async fn startup(config: RunConfig) {
    let notifier = if config.send_email {
        match EmailConfig::from_env() {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                error!(error = %e, "email configuration incomplete, report will not be sent");
                None
            }
        }
    } else {
        None
    };

    let client = CoindeskClient::with_endpoint(Some(config.endpoint_url.clone()), config.fetch_timeout);
    let source = CoindeskSource::new(client, ZoneLocalizer::new(config.timezone));

    println!(
        "Collecting data for {} minutes...",
        config.total_duration.as_secs() / 60
    );

    let outcome = job::run_job(
        &config,
        &source,
        notifier.as_ref(),
        &ConsoleProgress,
        shutdown_signal(),
    )
    .await;

    info!(
        samples = outcome.samples,
        mean = outcome.report.as_ref().map(|report| report.mean),
        snapshot = outcome.snapshot_written,
        chart = outcome.chart_written,
        notified = outcome.notified,
        "run finished"
    );

    if outcome.notified {
        println!(
            "\nReport sent by email to {}!",
            notifier.as_ref().map_or("", |cfg| cfg.to_email())
        );
    }
}

fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let config = RunConfig::try_from(args).context("Invalid configuration")?;

    telemetry::init(config.log_file.as_deref())?;

    let rt = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    rt.block_on(startup(config));

    Ok(())
}
