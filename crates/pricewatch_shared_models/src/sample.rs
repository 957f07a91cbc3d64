use chrono::{DateTime, FixedOffset};
use serde::{Serialize, Serializer};
use std::time::Duration;

use crate::time::format_timestamp;

/// One observation of the index: when the source says the price was
/// published, localized, and the USD price.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample {
    #[serde(rename = "time", serialize_with = "serialize_timestamp")]
    timestamp: DateTime<FixedOffset>,
    price: f64,
}

fn serialize_timestamp<S: Serializer>(
    timestamp: &DateTime<FixedOffset>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(timestamp))
}

impl Sample {
    pub fn new(timestamp: DateTime<FixedOffset>, price: f64) -> Self {
        Self { timestamp, price }
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn price(&self) -> f64 {
        self.price
    }
}

/// Samples of a single run in collection order, together with the
/// wall-clock span the run was configured for.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    samples: Vec<Sample>,
    total_duration: Duration,
}

impl SampleSeries {
    pub fn new(total_duration: Duration) -> Self {
        Self {
            samples: Vec::new(),
            total_duration,
        }
    }

    pub fn from_samples(samples: Vec<Sample>, total_duration: Duration) -> Self {
        Self {
            samples,
            total_duration,
        }
    }

    pub fn push(&mut self, sample: Sample) {
        self.samples.push(sample);
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.samples.iter()
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn total_duration(&self) -> Duration {
        self.total_duration
    }

    /// Configured span in minutes, as shown in report and chart titles.
    pub fn total_minutes(&self) -> f64 {
        self.total_duration.as_secs_f64() / 60.0
    }

    pub fn times(&self) -> Vec<DateTime<FixedOffset>> {
        self.samples.iter().map(Sample::timestamp).collect()
    }

    pub fn prices(&self) -> Vec<f64> {
        self.samples.iter().map(Sample::price).collect()
    }
}

impl<'a> IntoIterator for &'a SampleSeries {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, 1, hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn series_keeps_collection_order() {
        let mut series = SampleSeries::new(Duration::from_secs(600));
        series.push(Sample::new(at(10, 5), 2.0));
        series.push(Sample::new(at(10, 0), 1.0));

        assert_eq!(series.len(), 2);
        assert_eq!(series.prices(), vec![2.0, 1.0]);
        assert_eq!(series.times(), vec![at(10, 5), at(10, 0)]);
        assert_eq!(series.total_minutes(), 10.0);
    }

    #[test]
    fn sample_serializes_with_textual_time() {
        let sample = Sample::new(at(14, 30), 42_000.5);
        let json = serde_json::to_string(&sample).unwrap();

        assert_eq!(json, r#"{"time":"2024-03-01 14:30:00+02:00","price":42000.5}"#);
    }
}
