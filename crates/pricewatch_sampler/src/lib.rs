pub mod progress;
pub mod sampler;
pub mod source;

pub use progress::Progress;
pub use sampler::{Sampler, SamplerConfig};
pub use source::PriceSource;
