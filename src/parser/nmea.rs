//! GPRMC sentence parsing
//!
//! Parses the one NMEA sentence type the camera embeds, `$GPRMC`, into a
//! typed [`GpsFix`]. This is deliberately not a general NMEA toolkit: any
//! sentence that is not a checksum-valid, status-active GPRMC yields no fix.

use crate::types::GpsFix;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Knots to km/h
const KNOTS_TO_KMH: f64 = 1.852;

/// Two-digit GPRMC years are offsets from 2000
const GPRMC_YEAR_BASE: i32 = 2000;

/// Sentence frame: `$` + body + `*` + two hex checksum digits
fn sentence_frame_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\$(GPRMC,[^*$]*)\*([0-9A-Fa-f]{2})$").unwrap())
}

/// XOR-fold checksum over the sentence body (between `$` and `*`, exclusive)
pub fn nmea_checksum(body: &[u8]) -> u8 {
    body.iter().fold(0, |sum, &byte| sum ^ byte)
}

/// Parse a GPRMC sentence into a GPS fix.
///
/// Returns `None` rather than an error for anything unusable: malformed
/// structure, checksum mismatch, or a void (`V`) status. GPS absence is a
/// normal state, never a pipeline failure.
pub fn parse_gprmc(sentence: &str) -> Option<GpsFix> {
    let captures = sentence_frame_re().captures(sentence)?;
    let body = captures.get(1)?.as_str();
    let transmitted = u8::from_str_radix(captures.get(2)?.as_str(), 16).ok()?;

    // Cipher recovery maps high bytes to multibyte characters, and a garbled
    // body can still checksum-collide. NMEA is ASCII; the field slicing below
    // relies on it.
    if !body.is_ascii() {
        return None;
    }

    if nmea_checksum(body.as_bytes()) != transmitted {
        return None;
    }

    // GPRMC,hhmmss[.sss],A|V,ddmm.mmmm,N|S,dddmm.mmmm,E|W,knots,course,ddmmyy,...
    let fields: Vec<&str> = body.split(',').collect();
    if fields.len() < 10 {
        return None;
    }

    // A void fix carries no usable position or speed
    if fields[2] != "A" {
        return None;
    }

    let utc = parse_utc_instant(fields[9], fields[1])?;
    let latitude_deg = parse_coordinate(fields[3], 2, fields[4], "N", "S")?;
    let longitude_deg = parse_coordinate(fields[5], 3, fields[6], "E", "W")?;
    let speed_knots: f64 = fields[7].parse().ok()?;
    let course: f64 = fields[8].parse().ok()?;
    if speed_knots < 0.0 {
        return None;
    }

    Some(GpsFix {
        utc,
        speed_kmh: speed_knots * KNOTS_TO_KMH,
        course_deg: course.rem_euclid(360.0),
        latitude_deg,
        longitude_deg,
    })
}

/// Convert `ddmm.mmmm` / `dddmm.mmmm` plus hemisphere into fractional degrees.
///
/// `degree_digits` is the width of the whole-degree part (2 for latitude,
/// 3 for longitude); the remainder of the field is minutes. Southern and
/// western hemispheres negate.
fn parse_coordinate(
    field: &str,
    degree_digits: usize,
    hemisphere: &str,
    positive: &str,
    negative: &str,
) -> Option<f64> {
    if field.len() <= degree_digits {
        return None;
    }
    let degrees: f64 = field[..degree_digits].parse().ok()?;
    let minutes: f64 = field[degree_digits..].parse().ok()?;
    let value = degrees + minutes / 60.0;

    if hemisphere == positive {
        Some(value)
    } else if hemisphere == negative {
        Some(-value)
    } else {
        None
    }
}

/// Combine the `ddmmyy` date and `hhmmss[.sss]` time fields into a UTC instant.
fn parse_utc_instant(date: &str, time: &str) -> Option<DateTime<Utc>> {
    if date.len() != 6 || time.len() < 6 {
        return None;
    }

    let day: u32 = date[0..2].parse().ok()?;
    let month: u32 = date[2..4].parse().ok()?;
    let year: i32 = date[4..6].parse::<i32>().ok()? + GPRMC_YEAR_BASE;

    let hour: u32 = time[0..2].parse().ok()?;
    let minute: u32 = time[2..4].parse().ok()?;
    let second: u32 = time[4..6].parse().ok()?;
    let millis = match time.get(6..) {
        Some("") | None => 0,
        Some(fraction) => {
            let digits = fraction.strip_prefix('.')?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            // Scale the fraction to milliseconds whatever its digit count
            let padded = format!("{:0<3.3}", digits);
            padded.parse::<u32>().ok()?
        }
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_milli_opt(
        hour, minute, second, millis,
    )?;
    Some(Utc.from_utc_datetime(&naive))
}

/// Build a conforming GPRMC sentence body checksum suffix for a body string.
///
/// Helper for composing test captures; the full sentence is
/// `$<body>*<checksum>`.
pub fn format_checksum(body: &str) -> String {
    format!("{:02X}", nmea_checksum(body.as_bytes()))
}
