use chrono::{DateTime, Utc};
use pricewatch_coindesk::current_price::{CurrentPrice, CurrentPriceResponse};
use pricewatch_coindesk::CoindeskClient;
use pricewatch_sampler::PriceSource;
use pricewatch_shared_models::{Localizer, Sample};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("price request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("invalid update time {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },
}

/// The CoinDesk index as a [`PriceSource`], with timestamps localized.
pub struct CoindeskSource<L> {
    client: CoindeskClient,
    localizer: L,
}

impl<L: Localizer> CoindeskSource<L> {
    pub fn new(client: CoindeskClient, localizer: L) -> Self {
        Self { client, localizer }
    }

    fn to_sample(&self, response: CurrentPriceResponse) -> Result<Sample, FetchError> {
        let updated = DateTime::parse_from_rfc3339(&response.time.updated_iso).map_err(|source| {
            FetchError::Timestamp {
                value: response.time.updated_iso.clone(),
                source,
            }
        })?;
        let timestamp = self.localizer.localize(updated.with_timezone(&Utc));

        Ok(Sample::new(timestamp, response.bpi.usd.rate_float))
    }
}

impl<L: Localizer + Sync> PriceSource for CoindeskSource<L> {
    type Error = FetchError;

    async fn fetch(&self) -> Result<Sample, FetchError> {
        let response = self.client.call0::<CurrentPrice>().await?;
        let sample = self.to_sample(response)?;

        info!(
            price = sample.price(),
            time = %sample.timestamp(),
            "fetched bitcoin price"
        );
        Ok(sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;
    use pricewatch_coindesk::current_price::{Bpi, CurrencyRate, UpdateTime};
    use pricewatch_shared_models::FixedOffsetLocalizer;

    fn response(updated_iso: &str, rate: f64) -> CurrentPriceResponse {
        CurrentPriceResponse {
            time: UpdateTime {
                updated: None,
                updated_iso: updated_iso.to_string(),
                updateduk: None,
            },
            disclaimer: None,
            chart_name: None,
            bpi: Bpi {
                usd: CurrencyRate {
                    code: "USD".to_string(),
                    symbol: None,
                    rate: None,
                    description: None,
                    rate_float: rate,
                },
                gbp: None,
                eur: None,
            },
        }
    }

    fn source() -> CoindeskSource<FixedOffsetLocalizer> {
        let plus_two = FixedOffset::east_opt(2 * 3600).unwrap();
        CoindeskSource::new(CoindeskClient::new(), FixedOffsetLocalizer::new(plus_two))
    }

    #[test]
    fn response_becomes_a_localized_sample() {
        let sample = source()
            .to_sample(response("2024-03-01T10:15:00+00:00", 61_234.5678))
            .unwrap();

        assert_eq!(sample.price(), 61_234.5678);
        assert_eq!(sample.timestamp().to_rfc3339(), "2024-03-01T12:15:00+02:00");
    }

    #[test]
    fn unparseable_update_time_is_a_fetch_error() {
        let error = source()
            .to_sample(response("yesterday", 1.0))
            .unwrap_err();

        assert!(matches!(error, FetchError::Timestamp { ref value, .. } if value == "yesterday"));
    }
}
