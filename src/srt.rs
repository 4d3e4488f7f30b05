//! SRT timing parsing and subtitle output
//!
//! The extractor renders the source track to SRT once, purely to recover the
//! cue timestamps; the rendered replacement track is written back out as SRT
//! for the external muxer. Only the `HH:MM:SS,mmm --> HH:MM:SS,mmm` timing
//! lines of the input are consumed, everything else is ignored.

use crate::error::{DcstError, Result};
use crate::types::RenderedFrame;
use regex::Regex;
use std::io::Write;
use std::sync::OnceLock;

/// Styling wrapper the dashcam's bundled player expects around cue text
const FONT_OPEN: &str = "<font face=\"Arial\" size=\"12\" color=\"#000000\">";
const FONT_CLOSE: &str = "</font>";

fn timing_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{2}):(\d{2}):(\d{2})[,.](\d{3}) --> (\d{2}):(\d{2}):(\d{2})[,.](\d{3})")
            .unwrap()
    })
}

/// Extract `(start_ms, end_ms)` cue timings from SRT text, in cue order.
pub fn parse_timings(srt_text: &str) -> Result<Vec<(u64, u64)>> {
    let mut timings = Vec::new();
    for line in srt_text.lines() {
        if !line.contains(" --> ") {
            continue;
        }
        let captures = timing_line_re().captures(line).ok_or_else(|| {
            DcstError::Parse(format!("unparseable timing line: {:?}", line))
        })?;
        let field = |i: usize| -> u64 { captures.get(i).unwrap().as_str().parse().unwrap() };
        let start = ((field(1) * 60 + field(2)) * 60 + field(3)) * 1000 + field(4);
        let end = ((field(5) * 60 + field(6)) * 60 + field(7)) * 1000 + field(8);
        timings.push((start, end));
    }
    Ok(timings)
}

/// Render a millisecond offset as an SRT timestamp.
pub fn format_timestamp(ms: u64) -> String {
    format!(
        "{:02}:{:02}:{:02},{:03}",
        ms / 3_600_000,
        ms / 60_000 % 60,
        ms / 1000 % 60,
        ms % 1000
    )
}

/// Write rendered frames as a numbered SRT subtitle track.
pub fn write_srt<W: Write>(writer: &mut W, frames: &[RenderedFrame]) -> Result<()> {
    for (number, frame) in frames.iter().enumerate() {
        writeln!(writer, "{}", number + 1)?;
        writeln!(
            writer,
            "{} --> {}",
            format_timestamp(frame.start_time_ms),
            format_timestamp(frame.end_time_ms)
        )?;
        writeln!(writer, "{}{}{}", FONT_OPEN, frame.text, FONT_CLOSE)?;
        writeln!(writer)?;
    }
    Ok(())
}
