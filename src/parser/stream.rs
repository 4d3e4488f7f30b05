//! Subtitle track stream for reading cue records
//!
//! The external extractor dumps the embedded subtitle track as concatenated
//! cue records. Each record is a two-byte big-endian length field `L`, a
//! reserved zero byte, `L - 2` payload bytes, and one trailing pad byte, for
//! `L + 2` bytes total. Only the payload is obfuscated telemetry; the
//! framing itself is plain.

use crate::error::{DcstError, Result};

/// Bytes preceding the payload in every record: length field + reserved byte
const RECORD_HEADER_LEN: usize = 3;

/// Cue record stream over an extracted subtitle track dump
pub struct SubtitleStream<'a> {
    data: &'a [u8],
    pub pos: usize,
    end: usize,
}

impl<'a> SubtitleStream<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            end: data.len(),
        }
    }

    /// Read the next cue payload, or `None` at the end of the track.
    ///
    /// Truncated records and a nonzero reserved byte are framing corruption
    /// and fail the stream; per-cue telemetry garbling is handled later and
    /// never surfaces here.
    pub fn next_payload(&mut self) -> Result<Option<Vec<u8>>> {
        if self.pos >= self.end {
            return Ok(None);
        }

        if self.end - self.pos < RECORD_HEADER_LEN {
            return Err(DcstError::InvalidFrame(format!(
                "truncated record header at byte {}",
                self.pos
            )));
        }

        let length = u16::from_be_bytes([self.data[self.pos], self.data[self.pos + 1]]) as usize;
        // The length field counts the reserved byte plus the payload, so 2 is
        // the smallest value a conforming record can carry.
        if length < 2 {
            return Err(DcstError::InvalidFrame(format!(
                "record at byte {} has impossible length {}",
                self.pos, length
            )));
        }
        let record_end = self.pos + length + 1;
        if record_end > self.end {
            return Err(DcstError::InvalidFrame(format!(
                "record at byte {} claims {} bytes but only {} remain",
                self.pos,
                length + 1,
                self.end - self.pos
            )));
        }

        if self.data[self.pos + 2] != 0 {
            return Err(DcstError::InvalidFrame(format!(
                "nonzero reserved byte 0x{:02x} at byte {}",
                self.data[self.pos + 2],
                self.pos + 2
            )));
        }

        let payload = self.data[self.pos + RECORD_HEADER_LEN..record_end].to_vec();
        // Records are length + 2 bytes on the wire; the final pad byte is
        // not covered by the length field.
        self.pos += length + 2;
        Ok(Some(payload))
    }
}

/// Split a whole subtitle track dump into its cue payloads, in track order.
pub fn split_payloads(data: &[u8]) -> Result<Vec<Vec<u8>>> {
    let mut stream = SubtitleStream::new(data);
    let mut payloads = Vec::new();
    while let Some(payload) = stream.next_payload()? {
        payloads.push(payload);
    }
    Ok(payloads)
}
