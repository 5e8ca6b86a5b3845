#![allow(dead_code)]

use std::fs;
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use serde_json::json;
use tempfile::TempDir;

/// Canonical 44-byte header followed by `payload`.
pub fn wav_image(n_channels: u16, fs: u32, bits: u16, payload: &[u8]) -> Vec<u8> {
    let block_align = n_channels * (bits / 8);
    let mut out = Vec::with_capacity(44 + payload.len());
    out.extend_from_slice(b"RIFF");
    out.extend_from_slice(&(36 + payload.len() as u32).to_le_bytes());
    out.extend_from_slice(b"WAVEfmt ");
    out.extend_from_slice(&16u32.to_le_bytes());
    out.extend_from_slice(&1u16.to_le_bytes());
    out.extend_from_slice(&n_channels.to_le_bytes());
    out.extend_from_slice(&fs.to_le_bytes());
    out.extend_from_slice(&(fs * block_align as u32).to_le_bytes());
    out.extend_from_slice(&block_align.to_le_bytes());
    out.extend_from_slice(&bits.to_le_bytes());
    out.extend_from_slice(b"data");
    out.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    out.extend_from_slice(payload);
    out
}

/// 16-bit mono WAV with `n` samples, written with hound.
pub fn write_pcm16(path: &Path, fs: u32, n: usize) {
    let spec = WavSpec {
        channels: 1,
        sample_rate: fs,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec).expect("create wav");
    for i in 0..n {
        writer.write_sample((i % 200) as i16 - 100).expect("write sample");
    }
    writer.finalize().expect("finalize wav");
}

/// A dataset of five speakers:
///
/// | alias | accent          | gender | recordings |
/// |-------|-----------------|--------|------------|
/// | aa    | English         | male   | 3          |
/// | bb    | dutch/ENGLISH   | female | 2          |
/// | cc    | German          | female | 1          |
/// | dd    | French          | male   | 2          |
/// | ee    | English         | female | 0 (no dir) |
pub fn sample_dataset() -> TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    let root = dir.path();

    let metadata = json!({
        "aa": { "accent": "English", "age": 21, "gender": "male", "native": "english" },
        "bb": { "accent": "dutch/ENGLISH", "age": 33, "gender": "female", "native": "dutch" },
        "cc": { "accent": "German", "age": 40, "gender": "female", "native": "german" },
        "dd": { "accent": "French", "age": 29, "gender": "male", "native": "french" },
        "ee": { "accent": "English", "age": 50, "gender": "female", "native": "english" }
    });
    fs::write(
        root.join("speaker_metadata.txt"),
        serde_json::to_string_pretty(&metadata).unwrap(),
    )
    .unwrap();

    let files: [(&str, &[&str]); 4] = [
        ("aa", &["1_aa_0.wav", "0_aa_1.wav", "0_aa_0.wav"]),
        ("bb", &["5_bb_0.wav", "5_bb_1.wav"]),
        ("cc", &["9_cc_12.wav"]),
        ("dd", &["2_dd_0.wav", "3_dd_0.wav"]),
    ];
    for (speaker, names) in files {
        let speaker_dir = root.join(speaker);
        fs::create_dir_all(&speaker_dir).unwrap();
        for name in names {
            write_pcm16(&speaker_dir.join(name), 8000, 4000);
        }
    }
    // Not a recording; must be ignored by the scan.
    fs::write(root.join("aa").join("notes.md"), "ignore me").unwrap();

    dir
}

pub fn aliases(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}
