use crate::method::Method0;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug)]
pub struct CurrentPriceResponse {
    pub time: UpdateTime,
    #[serde(default)]
    pub disclaimer: Option<String>,
    #[serde(rename = "chartName", default)]
    pub chart_name: Option<String>,
    pub bpi: Bpi,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct UpdateTime {
    #[serde(default)]
    pub updated: Option<String>,
    #[serde(rename = "updatedISO")]
    pub updated_iso: String,
    #[serde(default)]
    pub updateduk: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct Bpi {
    #[serde(rename = "USD")]
    pub usd: CurrencyRate,
    #[serde(rename = "GBP", default)]
    pub gbp: Option<CurrencyRate>,
    #[serde(rename = "EUR", default)]
    pub eur: Option<CurrencyRate>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CurrencyRate {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub rate: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub rate_float: f64,
}

pub struct CurrentPrice;

impl Method0 for CurrentPrice {
    const PATH: &'static str = "https://api.coindesk.com/v1/bpi/currentprice.json";
    type Response = CurrentPriceResponse;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_minimal_payload() {
        let body = r#"{"time":{"updatedISO":"2024-03-01T10:15:00+00:00"},"bpi":{"USD":{"rate_float":61234.5678}}}"#;

        let response: CurrentPriceResponse = serde_json::from_str(body).unwrap();

        assert_eq!(response.time.updated_iso, "2024-03-01T10:15:00+00:00");
        assert_eq!(response.bpi.usd.rate_float, 61234.5678);
        assert!(response.bpi.eur.is_none());
    }

    #[test]
    fn rejects_payload_without_usd_rate() {
        let body = r#"{"time":{"updatedISO":"2024-03-01T10:15:00+00:00"},"bpi":{"USD":{"code":"USD"}}}"#;

        assert!(serde_json::from_str::<CurrentPriceResponse>(body).is_err());
    }
}
