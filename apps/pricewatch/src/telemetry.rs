use anyhow::Context;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &[&str] = &[
    "pricewatch=info",
    "pricewatch_sampler=info",
    "pricewatch_chart=info",
    "pricewatch_email=info",
    "hyper=warn",
    "reqwest=warn",
];

/// Installs the global subscriber. Events go to `log_file` (appended,
/// created if missing) or to stderr when no file is configured.
/// `RUST_LOG` replaces the default directives when set.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(DEFAULT_DIRECTIVES.join(","))
            .context("invalid default log directives")?,
    };

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file {}", path.display()))?;

            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.with_ansi(false).with_writer(Mutex::new(file)))
                .try_init()?;
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt_layer.with_writer(std::io::stderr))
                .try_init()?;
        }
    }

    Ok(())
}
