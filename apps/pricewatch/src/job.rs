use pricewatch_chart::render_png;
use pricewatch_email::{Notification, Notifier};
use pricewatch_report::{render_html, render_table, summarize, SummaryReport};
use pricewatch_sampler::{PriceSource, Progress, Sampler};
use std::future::Future;
use tracing::{error, info};

use crate::config::RunConfig;
use crate::snapshot::{save_snapshot, PersistenceError};

pub const SUBJECT: &str = "Bitcoin price analysis";

/// What a run managed to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct JobOutcome {
    pub samples: usize,
    pub report: Option<SummaryReport>,
    pub snapshot_written: bool,
    pub chart_written: bool,
    pub notified: bool,
}

/// Collects one window of prices and hands the result to every sink.
///
/// Each stage logs its own failure and the run moves on: a missing snapshot
/// or chart still lets the email go out, only an empty series stops the
/// report, chart and email.
pub async fn run_job<S, N, P, F>(
    config: &RunConfig,
    source: &S,
    notifier: Option<&N>,
    progress: &P,
    shutdown: F,
) -> JobOutcome
where
    S: PriceSource,
    N: Notifier,
    P: Progress,
    F: Future<Output = ()>,
{
    let series = Sampler::new(config.sampler())
        .run_until(source, progress, shutdown)
        .await;

    let snapshot_written = match save_snapshot(&config.snapshot_path, &series) {
        Ok(()) => true,
        Err(error) => {
            error!(%error, "failed to save snapshot");
            false
        }
    };

    let report = match summarize(&series) {
        Ok(report) => report,
        Err(error) => {
            error!(%error, "no prices collected, skipping chart and report");
            return JobOutcome {
                samples: 0,
                report: None,
                snapshot_written,
                chart_written: false,
                notified: false,
            };
        }
    };

    let chart_written = match render_png(&config.chart_path, &series, &config.chart_options())
        .map_err(PersistenceError::from)
    {
        Ok(()) => true,
        Err(error) => {
            error!(%error, "failed to save chart");
            false
        }
    };

    println!("{}", render_table(&report));

    let notified = match notifier {
        Some(notifier) => {
            let html_body = render_html(&report);
            let attachments = [config.snapshot_path.clone(), config.chart_path.clone()];
            let notification = Notification {
                subject: SUBJECT,
                html_body: &html_body,
                attachments: &attachments,
            };

            match notifier.notify(&notification).await {
                Ok(()) => true,
                Err(error) => {
                    error!(%error, "failed to send report email");
                    false
                }
            }
        }
        None => {
            info!("email disabled, report not sent");
            false
        }
    };

    JobOutcome {
        samples: series.len(),
        report: Some(report),
        snapshot_written,
        chart_written,
        notified,
    }
}
