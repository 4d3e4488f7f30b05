//! Dashcam Subtitle Telemetry Parser
//!
//! A Rust library for decoding the obfuscated telemetry stream some dashcams
//! embed as a subtitle track in their recordings, and re-rendering it as a
//! human-readable subtitle track. Each cue carries a per-message shift
//! cipher which is broken by known-plaintext inference (every GPS-bearing
//! record contains the literal `GPRMC`), then parsed into accelerometer and
//! GPS telemetry and expanded through a printf-style template.
//!
//! Extracting the subtitle track from the video container and remuxing the
//! rendered track back are left to an external media tool (e.g. ffmpeg);
//! this crate operates on the extracted artifacts.
//!
//! # Features
//!
//! - **`cli`** (default): Build the command-line interface binary
//! - **`serde`**: Enable serialization/deserialization of types
//!
//! # Quick Start
//!
//! Decode already-extracted artifacts and render replacement cues:
//! ```rust,no_run
//! use dcst_parser::{decode_subtitle_files, write_srt, DEFAULT_TEMPLATE};
//! use std::path::Path;
//!
//! let frames = decode_subtitle_files(
//!     Path::new("dump.bin"),
//!     Path::new("dump.srt"),
//!     DEFAULT_TEMPLATE,
//!     false,
//! ).unwrap();
//! let mut out = Vec::new();
//! write_srt(&mut out, &frames).unwrap();
//! ```
//!
//! Or drive the pipeline from in-memory frames:
//! ```rust
//! use dcst_parser::{process_frames, RawFrame, DEFAULT_TEMPLATE};
//!
//! let frames = vec![RawFrame {
//!     start_time_ms: 0,
//!     end_time_ms: 1000,
//!     payload: b"124\t-1008\t-362".to_vec(),
//! }];
//! let rendered = process_frames(&frames, DEFAULT_TEMPLATE, false).unwrap();
//! assert_eq!(rendered[0].text, "0.12 -1.01 -0.36 0 km/h");
//! ```
//!
//! # Public API
//!
//! ## Pipeline
//! - [`process_frames`] - Decode, parse and render a sequence of raw frames
//! - [`decode_subtitle_files`] - File-level convenience over both artifacts
//! - [`pair_frames`] - Zip cue payloads with SRT timings into [`RawFrame`]s
//!
//! ## Decoding
//! - [`decode_payload`] / [`find_shift`] - Break the per-message shift cipher
//! - [`parse_record`] - Split a decoded line into typed telemetry
//! - [`parse_gprmc`] - Parse a GPRMC sentence into a [`GpsFix`]
//! - [`split_payloads`] / [`SubtitleStream`] - Walk an extracted track dump
//!
//! ## Rendering
//! - [`Template`] - Compile and expand the subtitle template
//! - [`write_srt`] / [`parse_timings`] - SRT output and timing input

// Module declarations
pub mod error;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod srt;
pub mod types;

// Re-export everything from modules for convenience
pub use error::*;
pub use parser::*;
pub use pipeline::*;
pub use render::*;
pub use srt::*;
pub use types::*;
