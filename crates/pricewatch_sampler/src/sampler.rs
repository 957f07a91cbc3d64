use pricewatch_shared_models::SampleSeries;
use std::future::{self, Future};
use std::time::Duration;
use tokio::time::{Instant, sleep};
use tracing::{debug, info, warn};

use crate::progress::Progress;
use crate::source::PriceSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerConfig {
    /// Wall-clock span of the whole run.
    pub duration: Duration,
    /// Pause after each tick.
    pub interval: Duration,
}

/// Fixed-window, fixed-interval polling loop.
///
/// Ticks start at `0, interval, 2 * interval, ...` for as long as the elapsed
/// time is below `duration`. The pause after a tick is always the full
/// interval, so fetch latency pushes every later tick back (the schedule
/// drifts) and a slow source yields fewer samples than the window allows.
pub struct Sampler {
    config: SamplerConfig,
}

impl Sampler {
    pub fn new(config: SamplerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> SamplerConfig {
        self.config
    }

    pub async fn run<S, P>(&self, source: &S, progress: &P) -> SampleSeries
    where
        S: PriceSource,
        P: Progress,
    {
        self.run_until(source, progress, future::pending()).await
    }

    /// Like [`Sampler::run`], but stops as soon as `shutdown` resolves and
    /// returns whatever was collected up to that point.
    pub async fn run_until<S, P, F>(&self, source: &S, progress: &P, shutdown: F) -> SampleSeries
    where
        S: PriceSource,
        P: Progress,
        F: Future<Output = ()>,
    {
        let SamplerConfig { duration, interval } = self.config;
        let mut series = SampleSeries::new(duration);
        tokio::pin!(shutdown);

        info!(
            duration_secs = duration.as_secs_f64(),
            interval_secs = interval.as_secs_f64(),
            "starting price collection"
        );

        let start = Instant::now();
        let mut ticks = 0usize;

        loop {
            let elapsed = start.elapsed();
            if elapsed >= duration {
                break;
            }
            progress.tick(duration - elapsed);
            ticks += 1;

            let outcome = tokio::select! {
                _ = &mut shutdown => {
                    warn!(collected = series.len(), "collection interrupted during fetch");
                    break;
                }
                outcome = source.fetch() => outcome,
            };

            match outcome {
                Ok(sample) => {
                    debug!(tick = ticks, price = sample.price(), "sample collected");
                    series.push(sample);
                }
                Err(error) => {
                    warn!(tick = ticks, %error, "price fetch failed, skipping tick");
                }
            }

            tokio::select! {
                _ = &mut shutdown => {
                    warn!(collected = series.len(), "collection interrupted while waiting");
                    break;
                }
                _ = sleep(interval) => {}
            }
        }

        info!(ticks, collected = series.len(), "finished price collection");
        progress.finished(series.len());

        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use pricewatch_shared_models::Sample;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MINUTE: Duration = Duration::from_secs(60);

    fn config(duration_min: u64, interval_min: u64) -> SamplerConfig {
        SamplerConfig {
            duration: MINUTE * duration_min as u32,
            interval: MINUTE * interval_min as u32,
        }
    }

    fn at(minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, 12, minute, 0)
            .unwrap()
    }

    /// Replays a fixed script of outcomes and records when each tick happened.
    struct ScriptedSource {
        script: Mutex<VecDeque<Result<Sample, &'static str>>>,
        started: Instant,
        tick_offsets: Mutex<Vec<Duration>>,
        latency: Duration,
    }

    impl ScriptedSource {
        fn new(script: Vec<Result<Sample, &'static str>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                started: Instant::now(),
                tick_offsets: Mutex::new(Vec::new()),
                latency: Duration::ZERO,
            }
        }

        fn failing() -> Self {
            Self::new(Vec::new())
        }

        fn with_latency(mut self, latency: Duration) -> Self {
            self.latency = latency;
            self
        }

        /// Tick start times in whole seconds since the source was created.
        fn ticks(&self) -> Vec<u64> {
            self.tick_offsets.lock().unwrap().iter().map(Duration::as_secs).collect()
        }
    }

    impl PriceSource for ScriptedSource {
        type Error = &'static str;

        async fn fetch(&self) -> Result<Sample, Self::Error> {
            self.tick_offsets.lock().unwrap().push(self.started.elapsed());
            if !self.latency.is_zero() {
                sleep(self.latency).await;
            }
            let next = self.script.lock().unwrap().pop_front();
            next.unwrap_or(Err("no scripted response"))
        }
    }

    #[derive(Default)]
    struct CountingProgress {
        ticks: AtomicUsize,
        finished_with: Mutex<Option<usize>>,
    }

    impl Progress for CountingProgress {
        fn tick(&self, _remaining: Duration) {
            self.ticks.fetch_add(1, Ordering::SeqCst);
        }

        fn finished(&self, collected: usize) {
            *self.finished_with.lock().unwrap() = Some(collected);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn zero_duration_returns_empty_without_sleeping() {
        let source = ScriptedSource::failing();
        let before = Instant::now();

        let series = Sampler::new(config(0, 1)).run(&source, &()).await;

        assert!(series.is_empty());
        assert!(source.ticks().is_empty());
        assert_eq!(before.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn failing_source_consumes_three_ticks_in_five_minutes() {
        let source = ScriptedSource::failing();
        let progress = CountingProgress::default();

        let series = Sampler::new(config(5, 2)).run(&source, &progress).await;

        assert!(series.is_empty());
        assert_eq!(source.ticks(), vec![0, 120, 240]);
        assert_eq!(progress.ticks.load(Ordering::SeqCst), 3);
        assert_eq!(*progress.finished_with.lock().unwrap(), Some(0));
    }

    #[tokio::test(start_paused = true)]
    async fn duration_shorter_than_interval_runs_one_tick() {
        let source = ScriptedSource::new(vec![Ok(Sample::new(at(0), 10.0))]);

        let series = Sampler::new(config(1, 5)).run(&source, &()).await;

        assert_eq!(series.prices(), vec![10.0]);
        assert_eq!(source.ticks().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_ticks_are_skipped_in_order() {
        let source = ScriptedSource::new(vec![
            Ok(Sample::new(at(0), 1.0)),
            Err("timeout"),
            Ok(Sample::new(at(2), 3.0)),
            Ok(Sample::new(at(3), 4.0)),
        ]);

        let series = Sampler::new(config(4, 1)).run(&source, &()).await;

        assert_eq!(series.prices(), vec![1.0, 3.0, 4.0]);
        assert_eq!(series.times(), vec![at(0), at(2), at(3)]);
        assert_eq!(series.total_duration(), MINUTE * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn fetch_latency_drifts_the_schedule() {
        let source = ScriptedSource::failing().with_latency(Duration::from_secs(30));

        Sampler::new(config(5, 2)).run(&source, &()).await;

        assert_eq!(source.ticks(), vec![0, 150]);
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_keeps_collected_samples() {
        let source = ScriptedSource::new(
            (0..10).map(|minute| Ok(Sample::new(at(minute), minute as f64))).collect(),
        );

        let series = Sampler::new(config(20, 2))
            .run_until(&source, &(), sleep(MINUTE * 3))
            .await;

        assert_eq!(series.prices(), vec![0.0, 1.0]);
    }
}
