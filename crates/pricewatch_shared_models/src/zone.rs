use chrono::{DateTime, FixedOffset, Offset, Utc};
use chrono_tz::Tz;

/// Turns a UTC instant into the wall-clock time of the configured zone.
pub trait Localizer {
    fn localize(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset>;
}

/// Localizes through the IANA time zone database.
#[derive(Debug, Clone, Copy)]
pub struct ZoneLocalizer {
    zone: Tz,
}

impl ZoneLocalizer {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }
}

impl Localizer for ZoneLocalizer {
    fn localize(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc.with_timezone(&self.zone).fixed_offset()
    }
}

/// Always applies the same offset; used where zone rules must not matter.
#[derive(Debug, Clone, Copy)]
pub struct FixedOffsetLocalizer {
    offset: FixedOffset,
}

impl FixedOffsetLocalizer {
    pub fn new(offset: FixedOffset) -> Self {
        Self { offset }
    }

    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }
}

impl Localizer for FixedOffsetLocalizer {
    fn localize(&self, utc: DateTime<Utc>) -> DateTime<FixedOffset> {
        utc.with_timezone(&self.offset)
    }
}
