use dcst_parser::{
    decode_subtitle_files, encode_payload, nmea_checksum, process_frames, split_payloads,
    write_srt, RawFrame, DcstError, DEFAULT_TEMPLATE,
};
use std::io::Write as _;

/// Integration tests driving the pipeline end to end through the public API,
/// from synthesized extractor artifacts to the rendered SRT track.

const SAMPLE_LINE: &str =
    "124\t-1008\t-362\t$GPRMC,102936.000,A,4841.1110,N,00900.5670,E,17.53,221.01,030617,,,0*26";

/// Build one wire cue record around a payload, as the extractor dumps them
fn wire_record(payload: &[u8]) -> Vec<u8> {
    let length = (payload.len() + 2) as u16;
    let mut bytes = length.to_be_bytes().to_vec();
    bytes.push(0x00);
    bytes.extend_from_slice(payload);
    bytes.push(0x00);
    bytes
}

fn sample_frames(count: usize) -> Vec<RawFrame> {
    (0..count)
        .map(|i| RawFrame {
            start_time_ms: i as u64 * 1000,
            end_time_ms: i as u64 * 1000 + 1000,
            // A different shift per message, like the real stream
            payload: encode_payload(SAMPLE_LINE, (i * 37 % 256) as u8),
        })
        .collect()
}

#[test]
fn decodes_every_per_message_shift() {
    let frames = sample_frames(8);
    let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
    assert_eq!(rendered.len(), 8);
    for frame in &rendered {
        assert_eq!(frame.text, "0.12 -1.01 -0.36 32 km/h");
    }
}

#[test]
fn frame_count_and_timestamps_survive_total_corruption() {
    let frames: Vec<RawFrame> = (0..6)
        .map(|i| RawFrame {
            start_time_ms: i * 250,
            end_time_ms: i * 250 + 250,
            payload: vec![0x07, 0x07, 0x07],
        })
        .collect();

    let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
    assert_eq!(rendered.len(), frames.len());
    for (raw, out) in frames.iter().zip(&rendered) {
        assert_eq!((raw.start_time_ms, raw.end_time_ms), (out.start_time_ms, out.end_time_ms));
        assert!(out.text.is_empty());
    }
}

#[test]
fn template_errors_surface_before_processing() {
    let frames = sample_frames(3);
    let result = process_frames(&frames, "%(bogus).2f", false);
    assert!(matches!(result, Err(DcstError::UnknownVariable(_))));
}

#[test]
fn custom_template_controls_output() {
    let frames = sample_frames(1);
    let rendered = process_frames(&frames, "v=%(v_kmh)6.1f", false).unwrap();
    assert_eq!(rendered[0].text, "v=  32.5");
}

#[test]
fn gps_loss_falls_back_within_the_frame() {
    // Frame 2 loses its fix (void status); speed must fall back to 0 for
    // that frame only, without referencing neighbors.
    let body = "GPRMC,102936.000,V,4841.1110,N,00900.5670,E,17.53,221.01,030617,,,0";
    let void_line = format!(
        "124\t-1008\t-362\t${}*{:02X}",
        body,
        nmea_checksum(body.as_bytes())
    );

    let frames = vec![
        RawFrame {
            start_time_ms: 0,
            end_time_ms: 1000,
            payload: encode_payload(SAMPLE_LINE, 12),
        },
        RawFrame {
            start_time_ms: 1000,
            end_time_ms: 2000,
            payload: encode_payload(&void_line, 12),
        },
        RawFrame {
            start_time_ms: 2000,
            end_time_ms: 3000,
            payload: encode_payload(SAMPLE_LINE, 200),
        },
    ];

    let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
    assert_eq!(rendered[0].text, "0.12 -1.01 -0.36 32 km/h");
    assert_eq!(rendered[1].text, "0.12 -1.01 -0.36 0 km/h");
    assert_eq!(rendered[2].text, "0.12 -1.01 -0.36 32 km/h");
}

#[test]
fn track_dump_splits_into_cue_payloads() {
    let first = encode_payload(SAMPLE_LINE, 3);
    let second = b"124\t-5\t999".to_vec();
    let mut dump = wire_record(&first);
    dump.extend(wire_record(&second));

    let payloads = split_payloads(&dump).unwrap();
    assert_eq!(payloads, vec![first, second]);
}

#[test]
fn file_level_api_renders_an_srt_track() {
    let dir = tempfile::tempdir().unwrap();

    // Synthesize both extractor artifacts: the binary track dump and the
    // SRT rendering carrying the timings.
    let mut dump = Vec::new();
    dump.extend(wire_record(&encode_payload(SAMPLE_LINE, 42)));
    dump.extend(wire_record(b"\x01\x02")); // corrupted cue
    dump.extend(wire_record(b"50\t0\t-992"));

    let timing_text = "1\n00:00:00,000 --> 00:00:01,000\nx\n\n\
                       2\n00:00:01,000 --> 00:00:02,000\nx\n\n\
                       3\n00:00:02,000 --> 00:00:03,000\nx\n\n";

    let data_path = dir.path().join("dump.bin");
    let timing_path = dir.path().join("dump.srt");
    std::fs::write(&data_path, &dump).unwrap();
    std::fs::write(&timing_path, timing_text).unwrap();

    let frames = decode_subtitle_files(&data_path, &timing_path, DEFAULT_TEMPLATE, false).unwrap();
    assert_eq!(frames.len(), 3);
    assert_eq!(frames[0].text, "0.12 -1.01 -0.36 32 km/h");
    assert_eq!(frames[1].text, "");
    assert_eq!(frames[2].text, "0.05 0.00 -0.99 0 km/h");

    let out_path = dir.path().join("rendered.srt");
    let mut out_file = std::fs::File::create(&out_path).unwrap();
    write_srt(&mut out_file, &frames).unwrap();
    out_file.flush().unwrap();

    let rendered = std::fs::read_to_string(&out_path).unwrap();
    assert_eq!(rendered.matches(" --> ").count(), 3);
    assert!(rendered.contains("00:00:02,000 --> 00:00:03,000"));
    assert!(rendered.contains("0.05 0.00 -0.99 0 km/h"));
}

#[test]
fn missing_input_file_is_a_fatal_error() {
    let dir = tempfile::tempdir().unwrap();
    let timing_path = dir.path().join("dump.srt");
    std::fs::write(&timing_path, "").unwrap();

    let result = decode_subtitle_files(
        &dir.path().join("missing.bin"),
        &timing_path,
        DEFAULT_TEMPLATE,
        false,
    );
    assert!(result.is_err());
}
