use crate::parser::nmea::parse_gprmc;
use crate::types::GpsFix;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One obfuscated subtitle cue exactly as embedded in the source track
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawFrame {
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    /// Raw cue bytes, still carrying the per-message shift
    pub payload: Vec<u8>,
}

/// A cue after the shift cipher has been broken
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DecodedFrame {
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    pub plaintext: String,
}

/// A cue after template rendering, ready for the subtitle muxer
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderedFrame {
    pub start_time_ms: u64,
    pub end_time_ms: u64,
    /// Rendered subtitle text; empty for cues that failed to decode
    pub text: String,
}

/// Typed telemetry recovered from one decoded cue
///
/// The three g-force fields are always present; the NMEA sentence is kept
/// only when the decoded line carried a trailing field recognizable as a
/// GPRMC sentence, so accelerometer data survives garbled GPS.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TelemetryRecord {
    /// Acceleration on the X axis in milli-g
    pub gforce_x: i32,
    /// Acceleration on the Y axis in milli-g
    pub gforce_y: i32,
    /// Acceleration on the Z axis in milli-g
    pub gforce_z: i32,
    /// Raw GPRMC sentence text, if the cue carried one
    pub nmea_sentence: Option<String>,
}

impl TelemetryRecord {
    /// Parse the carried GPRMC sentence into a valid fix, if there is one.
    ///
    /// Returns `None` for records without a sentence and for sentences that
    /// fail checksum or report a void (`V`) status.
    pub fn gps_fix(&self) -> Option<GpsFix> {
        self.nmea_sentence.as_deref().and_then(parse_gprmc)
    }
}

/// Variable values a compiled template is expanded against
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RenderContext {
    /// X-axis acceleration in g
    pub gx: f64,
    /// Y-axis acceleration in g
    pub gy: f64,
    /// Z-axis acceleration in g
    pub gz: f64,
    /// Ground speed in km/h, 0.0 when the cue has no valid fix
    pub v_kmh: f64,
}

impl RenderContext {
    /// Build the render context for one record and its optional fix.
    pub fn from_record(record: &TelemetryRecord, fix: Option<&GpsFix>) -> Self {
        Self {
            gx: record.gforce_x as f64 / 1000.0,
            gy: record.gforce_y as f64 / 1000.0,
            gz: record.gforce_z as f64 / 1000.0,
            v_kmh: fix.map(|f| f.speed_kmh).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_context_scales_milli_g() {
        let record = TelemetryRecord {
            gforce_x: 124,
            gforce_y: -1008,
            gforce_z: -362,
            nmea_sentence: None,
        };
        let ctx = RenderContext::from_record(&record, None);
        assert!((ctx.gx - 0.124).abs() < 1e-9);
        assert!((ctx.gy - (-1.008)).abs() < 1e-9);
        assert!((ctx.gz - (-0.362)).abs() < 1e-9);
        assert_eq!(ctx.v_kmh, 0.0);
    }
}
