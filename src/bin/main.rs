//! CLI binary for the dashcam subtitle telemetry parser
//!
//! Operates on a subtitle track that has already been extracted from the
//! recording, e.g. with
//! `ffmpeg -i dashcam.mp4 -map 0:s -c copy -f data dump.bin` and
//! `ffmpeg -i dashcam.mp4 -f srt dump.srt`; remuxing the rendered track back
//! into the video is likewise left to the media tool.

use anyhow::{Context, Result};
use clap::{Arg, Command};
use dcst_parser::{decode_subtitle_files, write_srt, DEFAULT_TEMPLATE};
use std::io::Write;
use std::path::Path;

fn main() -> Result<()> {
    let matches = Command::new("dcst_parser")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Decode obfuscated dashcam subtitle telemetry and re-render it as a readable SRT track.")
        .arg(
            Arg::new("data")
                .help("Raw subtitle track dump extracted from the recording (binary cue records)")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("timing")
                .help("SRT rendering of the same track, used for the cue timestamps")
                .required(true)
                .index(2),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .help("Path for the rendered SRT track (default: stdout)")
                .value_name("FILE"),
        )
        .arg(
            Arg::new("render-string")
                .short('r')
                .long("render-string")
                .help("printf-style template for the rendered cues; valid variables are gx, gy, gz, v_kmh")
                .value_name("TEMPLATE")
                .default_value(DEFAULT_TEMPLATE),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Enable debug output and detailed decoding information")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let data_path = Path::new(matches.get_one::<String>("data").unwrap());
    let timing_path = Path::new(matches.get_one::<String>("timing").unwrap());
    let output = matches.get_one::<String>("output");
    let template = matches.get_one::<String>("render-string").unwrap();
    let debug = matches.get_flag("debug");

    let frames = decode_subtitle_files(data_path, timing_path, template, debug)
        .with_context(|| format!("Failed to decode {:?}", data_path))?;

    if debug {
        let decoded = frames.iter().filter(|f| !f.text.is_empty()).count();
        println!(
            "Rendered {} cues ({} decoded, {} left as gaps)",
            frames.len(),
            decoded,
            frames.len() - decoded
        );
    }

    match output {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create output file: {:?}", path))?;
            write_srt(&mut file, &frames)?;
            file.flush()?;
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            write_srt(&mut handle, &frames)?;
        }
    }

    Ok(())
}
