use chrono_tz::Tz;
use clap::{ArgAction, Parser};
use pricewatch_chart::ChartOptions;
use pricewatch_coindesk::current_price::CurrentPrice;
use pricewatch_coindesk::method::Method0;
use pricewatch_sampler::SamplerConfig;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("sampling interval must be at least one minute")]
    ZeroInterval,
    #[error("unknown time zone {name:?}: {reason}")]
    Timezone { name: String, reason: String },
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// How long to collect prices, in minutes
    #[arg(long, default_value_t = 60)]
    pub total_duration_minutes: u64,

    /// Pause between two samples, in minutes
    #[arg(long, default_value_t = 1)]
    pub sampling_interval_minutes: u64,

    /// IANA time zone used for sample timestamps
    #[arg(long, default_value = "Asia/Jerusalem")]
    pub timezone: String,

    /// Price index endpoint
    #[arg(long, default_value = CurrentPrice::PATH)]
    pub endpoint_url: String,

    /// Where the JSON snapshot of all samples is written
    #[arg(long, default_value = "bitcoin_prices.json")]
    pub snapshot_path: PathBuf,

    /// Where the PNG chart is written
    #[arg(long, default_value = "bitcoin_price_graph.png")]
    pub chart_path: PathBuf,

    /// Log file; pass an empty value to log to stderr
    #[arg(long, default_value = "bitcoin_price_log.log")]
    pub log_file: String,

    /// Write the price next to every point of the chart
    #[arg(long)]
    pub show_point_labels: bool,

    /// Draw mean and standard deviation lines on the chart
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub show_mean_std_bands: bool,

    /// TrueType font used for chart text
    #[arg(long, default_value = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf")]
    pub chart_font: PathBuf,

    /// Give up on a price request after this many seconds
    #[arg(long)]
    pub fetch_timeout_secs: Option<u64>,

    /// Collect and write files but do not send the report email
    #[arg(long)]
    pub no_email: bool,
}

/// Validated settings for one run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub total_duration: Duration,
    pub sampling_interval: Duration,
    pub timezone: Tz,
    pub endpoint_url: String,
    pub snapshot_path: PathBuf,
    pub chart_path: PathBuf,
    pub log_file: Option<PathBuf>,
    pub show_point_labels: bool,
    pub show_mean_std_bands: bool,
    pub chart_font: PathBuf,
    pub fetch_timeout: Option<Duration>,
    pub send_email: bool,
}

impl RunConfig {
    pub fn sampler(&self) -> SamplerConfig {
        SamplerConfig {
            duration: self.total_duration,
            interval: self.sampling_interval,
        }
    }

    pub fn chart_options(&self) -> ChartOptions {
        ChartOptions::builder()
            .show_point_labels(self.show_point_labels)
            .show_mean_std_bands(self.show_mean_std_bands)
            .font_path(self.chart_font.clone())
            .build()
    }
}

impl TryFrom<Args> for RunConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if args.sampling_interval_minutes == 0 {
            return Err(ConfigError::ZeroInterval);
        }

        let timezone = args
            .timezone
            .parse::<Tz>()
            .map_err(|reason| ConfigError::Timezone {
                name: args.timezone.clone(),
                reason: reason.to_string(),
            })?;

        Ok(Self {
            total_duration: minutes(args.total_duration_minutes),
            sampling_interval: minutes(args.sampling_interval_minutes),
            timezone,
            endpoint_url: args.endpoint_url,
            snapshot_path: args.snapshot_path,
            chart_path: args.chart_path,
            log_file: Some(args.log_file)
                .filter(|path| !path.trim().is_empty())
                .map(PathBuf::from),
            show_point_labels: args.show_point_labels,
            show_mean_std_bands: args.show_mean_std_bands,
            chart_font: args.chart_font,
            fetch_timeout: args.fetch_timeout_secs.map(Duration::from_secs),
            send_email: !args.no_email,
        })
    }
}

fn minutes(count: u64) -> Duration {
    Duration::from_secs(count.saturating_mul(60))
}
