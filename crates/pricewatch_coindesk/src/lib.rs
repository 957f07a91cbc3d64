pub mod current_price;
pub mod method;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use reqwest::{Client, ClientBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;

pub struct CoindeskClient {
    endpoint: Option<String>,
    reqwest: Client,
}

impl CoindeskClient {
    pub fn new() -> Self {
        Self::with_endpoint(None, None)
    }

    /// `endpoint` replaces the method's own URL, `timeout` bounds each
    /// request. Without a timeout requests wait as long as reqwest lets them.
    pub fn with_endpoint(endpoint: Option<String>, timeout: Option<Duration>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = ClientBuilder::new().default_headers(default_headers);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let reqwest = builder.build().expect("Failed to build reqwest client");

        Self { endpoint, reqwest }
    }

    pub(crate) async fn get0<R: DeserializeOwned>(&self, url: &str) -> reqwest::Result<R> {
        let response = self.reqwest.get(url).send().await?;
        let response = response.error_for_status()?;

        response.json().await
    }

    pub async fn call0<M: method::Method0>(&self) -> reqwest::Result<M::Response> {
        let url = self.endpoint.as_deref().unwrap_or(M::PATH);
        self.get0(url).await
    }
}

impl Default for CoindeskClient {
    fn default() -> Self {
        Self::new()
    }
}
