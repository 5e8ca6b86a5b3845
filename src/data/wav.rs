//! Canonical RIFF/WAVE decoding.
//!
//! Only the fixed-offset fields of the canonical 44-byte header are read. No
//! chunk IDs are checked and everything from byte 44 onwards is sample data.

use std::path::Path;

use crate::error::{CorpusError, Result};

use super::model::{PcmData, WavFile};

/// Size of the canonical header; sample data starts here.
pub const WAV_HEADER_LEN: usize = 44;

const CHANNELS_OFFSET: usize = 22;
const SAMPLE_RATE_OFFSET: usize = 24;
const BITS_PER_SAMPLE_OFFSET: usize = 34;

/// Read and decode the WAV file at `path`.
pub fn read_wavfile(path: &Path) -> Result<WavFile> {
    let bytes = std::fs::read(path).map_err(|e| CorpusError::io(path, e))?;
    decode_wav(path, &bytes)
}

/// Decode an in-memory WAV image. `path` names the source in errors and
/// supplies `file_name`.
pub fn decode_wav(path: &Path, bytes: &[u8]) -> Result<WavFile> {
    if bytes.len() < WAV_HEADER_LEN {
        return Err(CorpusError::TruncatedHeader {
            path: path.to_path_buf(),
            len: bytes.len(),
        });
    }

    let n_channels = u16_at(bytes, CHANNELS_OFFSET);
    let fs = u32_at(bytes, SAMPLE_RATE_OFFSET);
    let bits_per_sample = u16_at(bytes, BITS_PER_SAMPLE_OFFSET);

    if fs == 0 {
        return Err(CorpusError::ZeroSampleRate(path.to_path_buf()));
    }

    let payload = &bytes[WAV_HEADER_LEN..];
    let data = match bits_per_sample {
        16 => PcmData::I16(
            payload
                .chunks_exact(2)
                .map(|c| i16::from_le_bytes([c[0], c[1]]))
                .collect(),
        ),
        32 => PcmData::I32(
            payload
                .chunks_exact(4)
                .map(|c| i32::from_le_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
        ),
        64 => PcmData::I64(
            payload
                .chunks_exact(8)
                .map(|c| i64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
                .collect(),
        ),
        bits => {
            return Err(CorpusError::UnsupportedBitDepth {
                path: path.to_path_buf(),
                bits,
            })
        }
    };

    let width = bits_per_sample as usize / 8;
    let trailing = payload.len() % width;
    if trailing != 0 {
        log::warn!(
            "{}: ignoring {trailing} trailing byte(s) after the last whole sample",
            path.display()
        );
    }

    let duration = data.len() as f64 / fs as f64;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    log::debug!(
        "decoded {file_name}: {n_channels} ch, {fs} Hz, {bits_per_sample} bit, {} samples",
        data.len()
    );

    Ok(WavFile {
        bits_per_sample,
        duration,
        file_name,
        fs,
        n_channels,
        data,
    })
}

fn u16_at(bytes: &[u8], offset: usize) -> u16 {
    u16::from_le_bytes([bytes[offset], bytes[offset + 1]])
}

fn u32_at(bytes: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}
