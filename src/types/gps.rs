use chrono::{DateTime, Utc};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A valid GPS fix recovered from a GPRMC sentence.
///
/// A `GpsFix` is only ever constructed for a sentence whose checksum verifies
/// and whose status field is `A` (active). A void or garbled sentence yields
/// no fix at all, so "no GPS" can never be confused with a fix at (0, 0).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct GpsFix {
    /// UTC instant combined from the sentence's date and time fields
    pub utc: DateTime<Utc>,
    /// Speed over ground in km/h, never negative
    pub speed_kmh: f64,
    /// True course over ground in degrees, normalized to [0, 360)
    pub course_deg: f64,
    /// Latitude in fractional degrees, negative south of the equator
    pub latitude_deg: f64,
    /// Longitude in fractional degrees, negative west of Greenwich
    pub longitude_deg: f64,
}
