//! Decoded-line record parsing
//!
//! A decoded cue is tab-separated: three signed integer accelerometer fields
//! in milli-g, then an optional raw GPRMC sentence. Accelerometer data must
//! always be recoverable even when the GPS portion is garbled, so only the
//! numeric fields can fail the record.

use crate::error::{DcstError, Result};
use crate::types::TelemetryRecord;

/// Marker a trailing field must carry to count as the GPS sentence
const GPRMC_PREFIX: &str = "$GPRMC,";

/// Parse one decoded plaintext line into a telemetry record.
pub fn parse_record(plaintext: &str) -> Result<TelemetryRecord> {
    let fields: Vec<&str> = plaintext.split('\t').collect();
    if fields.len() < 3 {
        return Err(DcstError::MalformedNumeric(format!(
            "expected at least 3 accelerometer fields, got {}",
            fields.len()
        )));
    }

    let gforce_x = parse_milli_g(fields[0], "X")?;
    let gforce_y = parse_milli_g(fields[1], "Y")?;
    let gforce_z = parse_milli_g(fields[2], "Z")?;

    // A fourth field is kept only when it is recognizable as a GPRMC
    // sentence; anything else leaves the GPS portion absent.
    let nmea_sentence = fields
        .get(3)
        .filter(|field| field.starts_with(GPRMC_PREFIX))
        .map(|field| field.to_string());

    Ok(TelemetryRecord {
        gforce_x,
        gforce_y,
        gforce_z,
        nmea_sentence,
    })
}

fn parse_milli_g(field: &str, axis: &str) -> Result<i32> {
    field.parse().map_err(|_| {
        DcstError::MalformedNumeric(format!("{} axis field {:?} is not a signed integer", axis, field))
    })
}
