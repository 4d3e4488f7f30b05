//! Frame-by-frame decode pipeline
//!
//! Orchestrates cipher breaking, record parsing and template rendering over
//! a sequence of raw subtitle cues. Processing is strictly sequential and
//! stateless across frames: output count, order and timestamps always match
//! the input exactly, which is what the external subtitle muxer expects.

use crate::error::Result;
use crate::parser::cipher::decode_payload;
use crate::parser::record::parse_record;
use crate::parser::stream::split_payloads;
use crate::render::Template;
use crate::srt::parse_timings;
use crate::types::{DecodedFrame, RawFrame, RenderContext, RenderedFrame};
use anyhow::Context;
use std::path::Path;

/// Decode, parse and render a sequence of raw frames.
///
/// The template is compiled and validated before any frame is touched, so
/// configuration errors halt the run up front. Per-frame decode and parse
/// failures never abort the stream: the affected cue is emitted with empty
/// text, leaving a visible gap instead of silently dropping neighbors.
pub fn process_frames(
    frames: &[RawFrame],
    template_source: &str,
    debug: bool,
) -> Result<Vec<RenderedFrame>> {
    let template = Template::compile(template_source)?;
    let mut rendered = Vec::with_capacity(frames.len());
    for frame in frames {
        rendered.push(render_frame(frame, &template, debug)?);
    }
    Ok(rendered)
}

/// Process one frame; frame-local failures render as empty text.
fn render_frame(frame: &RawFrame, template: &Template, debug: bool) -> Result<RenderedFrame> {
    let text = match decode_and_render(frame, template) {
        Ok(text) => text,
        Err(err) if err.is_frame_local() => {
            if debug {
                println!(
                    "Skipping cue {}ms..{}ms: {}",
                    frame.start_time_ms, frame.end_time_ms, err
                );
            }
            String::new()
        }
        Err(err) => return Err(err),
    };

    Ok(RenderedFrame {
        start_time_ms: frame.start_time_ms,
        end_time_ms: frame.end_time_ms,
        text,
    })
}

fn decode_and_render(frame: &RawFrame, template: &Template) -> Result<String> {
    let decoded = DecodedFrame {
        start_time_ms: frame.start_time_ms,
        end_time_ms: frame.end_time_ms,
        plaintext: decode_payload(&frame.payload)?,
    };
    let record = parse_record(&decoded.plaintext)?;
    let fix = record.gps_fix();
    let ctx = RenderContext::from_record(&record, fix.as_ref());
    Ok(template.render(&ctx))
}

/// Zip extractor cue payloads with SRT cue timings into raw frames.
///
/// The extractor produces the two artifacts from the same track, so they
/// pair positionally; a length mismatch keeps the shorter prefix, matching
/// the original tool's behavior.
pub fn pair_frames(payloads: Vec<Vec<u8>>, timings: &[(u64, u64)]) -> Vec<RawFrame> {
    payloads
        .into_iter()
        .zip(timings.iter())
        .map(|(payload, &(start_time_ms, end_time_ms))| RawFrame {
            start_time_ms,
            end_time_ms,
            payload,
        })
        .collect()
}

/// Decode both extractor artifacts and render the replacement cues.
///
/// `data_path` is the raw subtitle track dump, `timing_path` the SRT
/// rendering of the same track carrying the cue timestamps.
pub fn decode_subtitle_files(
    data_path: &Path,
    timing_path: &Path,
    template_source: &str,
    debug: bool,
) -> Result<Vec<RenderedFrame>> {
    let track_data = std::fs::read(data_path)
        .with_context(|| format!("Failed to read subtitle track dump: {:?}", data_path))?;
    let timing_text = std::fs::read_to_string(timing_path)
        .with_context(|| format!("Failed to read subtitle timing file: {:?}", timing_path))?;

    if debug {
        println!(
            "Track dump: {} bytes, timing file: {} bytes",
            track_data.len(),
            timing_text.len()
        );
    }

    let payloads = split_payloads(&track_data)?;
    let timings = parse_timings(&timing_text)?;
    if debug {
        println!("Found {} cue payloads, {} timings", payloads.len(), timings.len());
    }
    if payloads.len() != timings.len() {
        eprintln!(
            "Warning: {} cue payloads but {} timings; pairing the shorter prefix",
            payloads.len(),
            timings.len()
        );
    }

    let frames = pair_frames(payloads, &timings);
    process_frames(&frames, template_source, debug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::cipher::encode_payload;
    use crate::render::DEFAULT_TEMPLATE;

    const SAMPLE: &str =
        "124\t-1008\t-362\t$GPRMC,102936.000,A,4841.1110,N,00900.5670,E,17.53,221.01,030617,,,0*26";

    fn frame(start_time_ms: u64, payload: Vec<u8>) -> RawFrame {
        RawFrame {
            start_time_ms,
            end_time_ms: start_time_ms + 1000,
            payload,
        }
    }

    #[test]
    fn test_valid_frame_renders_telemetry() {
        let frames = vec![frame(0, encode_payload(SAMPLE, 17))];
        let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
        assert_eq!(rendered.len(), 1);
        assert_eq!(rendered[0].text, "0.12 -1.01 -0.36 32 km/h");
    }

    #[test]
    fn test_frame_without_fix_renders_zero_speed() {
        let frames = vec![frame(0, b"124\t-1008\t-362".to_vec())];
        let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
        assert_eq!(rendered[0].text, "0.12 -1.01 -0.36 0 km/h");
    }

    #[test]
    fn test_corrupted_frame_leaves_visible_gap() {
        let frames = vec![
            frame(0, encode_payload(SAMPLE, 5)),
            frame(1000, b"\x01\x02\x03".to_vec()),
            frame(2000, encode_payload(SAMPLE, 99)),
        ];
        let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
        assert_eq!(rendered.len(), 3);
        assert_eq!(rendered[0].text, "0.12 -1.01 -0.36 32 km/h");
        assert_eq!(rendered[1].text, "");
        assert_eq!(rendered[2].text, "0.12 -1.01 -0.36 32 km/h");
    }

    #[test]
    fn test_output_preserves_count_order_timestamps() {
        // Every frame fails to decode; the stream still emits 1:1.
        let frames: Vec<RawFrame> = (0..5).map(|i| frame(i * 500, vec![0xff])).collect();
        let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
        assert_eq!(rendered.len(), frames.len());
        for (raw, out) in frames.iter().zip(&rendered) {
            assert_eq!(raw.start_time_ms, out.start_time_ms);
            assert_eq!(raw.end_time_ms, out.end_time_ms);
            assert_eq!(out.text, "");
        }
    }

    #[test]
    fn test_bad_template_fails_before_any_frame() {
        let frames = vec![frame(0, encode_payload(SAMPLE, 1))];
        assert!(process_frames(&frames, "%(bogus).2f", false).is_err());
    }

    #[test]
    fn test_pair_frames_zips_shorter_prefix() {
        let payloads = vec![b"a".to_vec(), b"b".to_vec(), b"c".to_vec()];
        let timings = [(0, 500), (500, 1000)];
        let frames = pair_frames(payloads, &timings);
        assert_eq!(frames.len(), 2);
        assert_eq!(frames[1].payload, b"b");
        assert_eq!(frames[1].end_time_ms, 1000);
    }
}
