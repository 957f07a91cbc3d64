use pricewatch_shared_models::Sample;
use std::fmt::Display;
use std::future::Future;

/// Something that can be asked for the current price once per tick.
pub trait PriceSource {
    type Error: Display;

    fn fetch(&self) -> impl Future<Output = Result<Sample, Self::Error>> + Send;
}
