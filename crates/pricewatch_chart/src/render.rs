use bon::Builder;
use plotters::prelude::*;
use pricewatch_report::format::fixed_amount;
use pricewatch_report::InsufficientDataError;
use pricewatch_shared_models::SampleSeries;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, warn};

use crate::figure::Figure;
use crate::font::{self, FAMILY};

const PURPLE: RGBColor = RGBColor(128, 0, 128);
const ORANGE: RGBColor = RGBColor(255, 165, 0);
const PRICE_LINE: RGBColor = RGBColor(31, 119, 180);

#[derive(Error, Debug)]
pub enum ChartError {
    #[error("no samples to plot")]
    Empty(#[from] InsufficientDataError),
    #[error("failed to draw chart: {0}")]
    Drawing(String),
}

fn drawing<E: std::fmt::Display>(error: E) -> ChartError {
    ChartError::Drawing(error.to_string())
}

#[derive(Debug, Clone, Builder)]
pub struct ChartOptions {
    /// Write the price next to every point that is not an extreme.
    #[builder(default)]
    pub show_point_labels: bool,
    /// Draw mean and mean ± one standard deviation lines.
    #[builder(default)]
    pub show_mean_std_bands: bool,
    #[builder(default = (1000, 600))]
    pub size: (u32, u32),
    /// TrueType font for titles, axes, legend and labels. Without one the
    /// chart is drawn with no text at all.
    #[builder(into)]
    pub font_path: Option<PathBuf>,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Plots the series as a PNG at `path`.
pub fn render_png(
    path: &Path,
    series: &SampleSeries,
    options: &ChartOptions,
) -> Result<(), ChartError> {
    let figure = Figure::from_series(series, options)?;

    let with_text = options
        .font_path
        .as_deref()
        .is_some_and(font::ensure_registered);
    if !with_text {
        warn!("no chart font loaded, drawing chart without text");
    }

    draw(path, &figure, options.size, with_text)?;

    info!(path = %path.display(), points = figure.points.len(), "chart saved");
    Ok(())
}

fn draw(path: &Path, figure: &Figure, size: (u32, u32), with_text: bool) -> Result<(), ChartError> {
    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut builder = ChartBuilder::on(&root);
    builder.margin(20);
    if with_text {
        builder
            .caption(&figure.title, (FAMILY, 22))
            .x_label_area_size(50)
            .y_label_area_size(90);
    }
    let mut chart = builder
        .build_cartesian_2d(figure.x_range.clone(), figure.y_range.clone())
        .map_err(drawing)?;

    if with_text {
        let x_label = |x: &f64| figure.time_label(*x);
        let y_label = |y: &f64| fixed_amount(*y);
        chart
            .configure_mesh()
            .x_desc("Time")
            .y_desc("Price (USD)")
            .x_labels(12)
            .y_labels(10)
            .x_label_formatter(&x_label)
            .y_label_formatter(&y_label)
            .label_style((FAMILY, 12))
            .draw()
            .map_err(drawing)?;
    }

    chart
        .draw_series(LineSeries::new(
            figure.points.iter().copied(),
            PRICE_LINE.stroke_width(2),
        ))
        .map_err(drawing)?
        .label("Bitcoin Price")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], PRICE_LINE.stroke_width(2)));
    chart
        .draw_series(
            figure
                .points
                .iter()
                .map(|&point| Circle::new(point, 3, PRICE_LINE.filled())),
        )
        .map_err(drawing)?;

    for (marker, color, name) in [
        (&figure.lowest, RED, "Lowest"),
        (&figure.highest, GREEN, "Highest"),
    ] {
        chart
            .draw_series(std::iter::once(Circle::new(
                (marker.x, marker.price),
                6,
                color.filled(),
            )))
            .map_err(drawing)?
            .label(format!("{name}: {}", fixed_amount(marker.price)))
            .legend(move |(x, y)| Circle::new((x + 10, y), 5, color.filled()));

        if with_text {
            chart
                .draw_series(std::iter::once(Text::new(
                    marker.label.clone(),
                    (marker.x, marker.price),
                    (FAMILY, 13).into_font().color(&color),
                )))
                .map_err(drawing)?;
        }
    }

    if with_text {
        chart
            .draw_series(figure.point_labels.iter().map(|marker| {
                Text::new(
                    marker.label.clone(),
                    (marker.x, marker.price),
                    (FAMILY, 11).into_font().color(&BLACK),
                )
            }))
            .map_err(drawing)?;
    }

    if let Some(bands) = &figure.bands {
        let (x_start, x_end) = (figure.x_range.start, figure.x_range.end);
        for (value, color, name) in [
            (bands.mean, PURPLE, "Mean"),
            (bands.upper, ORANGE, "Mean + Std"),
            (bands.lower, ORANGE, "Mean - Std"),
        ] {
            chart
                .draw_series(LineSeries::new(
                    [(x_start, value), (x_end, value)],
                    color.stroke_width(1),
                ))
                .map_err(drawing)?
                .label(format!("{name}: {}", fixed_amount(value)))
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(1)));
        }
    }

    if with_text {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font((FAMILY, 13))
            .draw()
            .map_err(drawing)?;
    }

    root.present().map_err(drawing)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeDelta, TimeZone};
    use pricewatch_shared_models::Sample;
    use std::time::Duration;

    fn series(prices: &[f64]) -> SampleSeries {
        let start = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
            .unwrap();
        SampleSeries::from_samples(
            prices
                .iter()
                .enumerate()
                .map(|(i, price)| Sample::new(start + TimeDelta::minutes(i as i64), *price))
                .collect(),
            Duration::from_secs(600),
        )
    }

    #[test]
    fn writes_a_png_without_a_font() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");
        let options = ChartOptions::builder()
            .show_point_labels(true)
            .show_mean_std_bands(true)
            .size((320, 200))
            .font_path(dir.path().join("missing.ttf"))
            .build();

        render_png(&path, &series(&[64_000.0, 64_250.5, 63_900.25, 64_100.0]), &options).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert!(bytes.starts_with(&[0x89, b'P', b'N', b'G']));
    }

    #[test]
    fn empty_series_is_rejected_before_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chart.png");

        let error = render_png(&path, &series(&[]), &ChartOptions::default()).unwrap_err();

        assert!(matches!(error, ChartError::Empty(_)));
        assert!(!path.exists());
    }
}
