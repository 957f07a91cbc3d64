use chrono::{DateTime, FixedOffset};
use pricewatch_shared_models::SampleSeries;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("cannot summarize an empty sample series")]
pub struct InsufficientDataError;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    /// Population standard deviation (divisor N).
    pub stddev: f64,
    pub min_time: DateTime<FixedOffset>,
    pub max_time: DateTime<FixedOffset>,
    pub total_duration: Duration,
}

impl SummaryReport {
    /// `(mean - stddev, mean + stddev)`.
    pub fn variability(&self) -> (f64, f64) {
        (self.mean - self.stddev, self.mean + self.stddev)
    }

    pub fn total_minutes(&self) -> f64 {
        self.total_duration.as_secs_f64() / 60.0
    }
}

/// Computes the run statistics over the sample prices.
///
/// Extremes keep the timestamp of their first occurrence. The mean is
/// clamped into `[min, max]` so summation rounding can never place it
/// outside the observed range.
pub fn summarize(series: &SampleSeries) -> Result<SummaryReport, InsufficientDataError> {
    let (first, rest) = series.samples().split_first().ok_or(InsufficientDataError)?;

    let mut min = first;
    let mut max = first;
    let mut sum = first.price();

    for sample in rest {
        if sample.price() < min.price() {
            min = sample;
        }
        if sample.price() > max.price() {
            max = sample;
        }
        sum += sample.price();
    }

    let count = series.len();
    let n = count as f64;
    let mean = (sum / n).max(min.price()).min(max.price());
    let variance = series
        .iter()
        .map(|sample| (sample.price() - mean).powi(2))
        .sum::<f64>()
        / n;

    Ok(SummaryReport {
        count,
        min: min.price(),
        max: max.price(),
        mean,
        stddev: variance.sqrt(),
        min_time: min.timestamp(),
        max_time: max.timestamp(),
        total_duration: series.total_duration(),
    })
}
