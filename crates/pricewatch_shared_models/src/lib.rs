pub mod sample;
pub mod time;
pub mod zone;

pub use sample::{Sample, SampleSeries};
pub use time::format_timestamp;
pub use zone::{FixedOffsetLocalizer, Localizer, ZoneLocalizer};
