use chrono::{DateTime, FixedOffset, TimeDelta};
use pricewatch_report::format::fixed_amount;
use pricewatch_report::{summarize, InsufficientDataError};
use pricewatch_shared_models::SampleSeries;
use std::ops::Range;

use crate::render::ChartOptions;

/// An annotated point, in chart coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub x: f64,
    pub price: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bands {
    pub mean: f64,
    pub upper: f64,
    pub lower: f64,
}

/// Everything the renderer draws, resolved from a series before any
/// drawing happens. The x axis is seconds since the first sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    pub start: DateTime<FixedOffset>,
    pub points: Vec<(f64, f64)>,
    pub lowest: Marker,
    pub highest: Marker,
    pub point_labels: Vec<Marker>,
    pub bands: Option<Bands>,
    pub x_range: Range<f64>,
    pub y_range: Range<f64>,
}

impl Figure {
    pub fn from_series(
        series: &SampleSeries,
        options: &ChartOptions,
    ) -> Result<Self, InsufficientDataError> {
        let report = summarize(series)?;
        let start = series.samples()[0].timestamp();

        let points: Vec<(f64, f64)> = series
            .iter()
            .map(|sample| (seconds_since(start, sample.timestamp()), sample.price()))
            .collect();

        let marker = |time: DateTime<FixedOffset>, price: f64| Marker {
            x: seconds_since(start, time),
            price,
            label: format!(" {}", fixed_amount(price)),
        };
        let lowest = marker(report.min_time, report.min);
        let highest = marker(report.max_time, report.max);

        let point_labels = if options.show_point_labels {
            points
                .iter()
                .filter(|(_, price)| *price != report.min && *price != report.max)
                .map(|&(x, price)| Marker {
                    x,
                    price,
                    label: fixed_amount(price),
                })
                .collect()
        } else {
            Vec::new()
        };

        let bands = options.show_mean_std_bands.then(|| Bands {
            mean: report.mean,
            upper: report.mean + report.stddev,
            lower: report.mean - report.stddev,
        });

        let (mut y_low, mut y_high) = (report.min, report.max);
        if let Some(bands) = &bands {
            y_low = y_low.min(bands.lower);
            y_high = y_high.max(bands.upper);
        }

        let x_end = points.last().map_or(0.0, |(x, _)| *x);

        Ok(Self {
            title: format!(
                "Bitcoin Price Index (BPI) Over the Last {} minutes",
                series.total_minutes()
            ),
            start,
            points,
            lowest,
            highest,
            point_labels,
            bands,
            x_range: padded(0.0, x_end, 30.0),
            y_range: padded(y_low, y_high, 1.0),
        })
    }

    /// Wall-clock label for an x coordinate.
    pub fn time_label(&self, x: f64) -> String {
        let at = self.start + TimeDelta::milliseconds((x * 1000.0).round() as i64);
        at.format("%H:%M").to_string()
    }
}

fn seconds_since(start: DateTime<FixedOffset>, time: DateTime<FixedOffset>) -> f64 {
    (time - start).num_milliseconds() as f64 / 1000.0
}

/// Widens `low..high` by 5% on each side, or by `flat` when the span is empty.
fn padded(low: f64, high: f64, flat: f64) -> Range<f64> {
    let span = high - low;
    let pad = if span > 0.0 { span * 0.05 } else { flat };
    (low - pad)..(high + pad)
}
