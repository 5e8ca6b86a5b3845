use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value as JsonValue};

use crate::error::{CorpusError, Result};

// ---------------------------------------------------------------------------
// PcmData – raw interleaved samples at their stored width
// ---------------------------------------------------------------------------

/// Interleaved signed PCM samples, kept at the width declared in the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PcmData {
    I16(Vec<i16>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

impl PcmData {
    /// Total number of samples across all channels.
    pub fn len(&self) -> usize {
        match self {
            PcmData::I16(v) => v.len(),
            PcmData::I32(v) => v.len(),
            PcmData::I64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn bits_per_sample(&self) -> u16 {
        match self {
            PcmData::I16(_) => 16,
            PcmData::I32(_) => 32,
            PcmData::I64(_) => 64,
        }
    }

    /// Iterate the samples widened to `i64`.
    pub fn iter_i64(&self) -> Box<dyn Iterator<Item = i64> + '_> {
        match self {
            PcmData::I16(v) => Box::new(v.iter().map(|&s| s as i64)),
            PcmData::I32(v) => Box::new(v.iter().map(|&s| s as i64)),
            PcmData::I64(v) => Box::new(v.iter().copied()),
        }
    }
}

// ---------------------------------------------------------------------------
// WavFile – one decoded RIFF/WAVE file
// ---------------------------------------------------------------------------

/// A decoded WAV file.
///
/// `duration` is `data.len() / fs`, counting every interleaved sample. For
/// multi-channel files this is `n_channels` times the playback length; use
/// [`WavFile::frame_duration`] for the per-channel figure.
#[derive(Debug, Clone, PartialEq)]
pub struct WavFile {
    pub bits_per_sample: u16,
    pub duration: f64,
    pub file_name: String,
    pub fs: u32,
    pub n_channels: u16,
    pub data: PcmData,
}

impl WavFile {
    /// Number of sample frames (one sample per channel each).
    pub fn frame_count(&self) -> usize {
        match self.n_channels {
            0 => 0,
            n => self.data.len() / n as usize,
        }
    }

    /// Playback length in seconds.
    pub fn frame_duration(&self) -> f64 {
        self.frame_count() as f64 / self.fs as f64
    }
}

// ---------------------------------------------------------------------------
// Recording – a WAV file plus the fields encoded in its name
// ---------------------------------------------------------------------------

/// One utterance: `<digit>_<speaker>_<index>.wav`.
#[derive(Debug, Clone, PartialEq)]
pub struct Recording {
    /// The spoken digit, 0–9.
    pub digit: u8,
    /// Utterance index of this speaker for this digit.
    pub index: u32,
    /// Two-character speaker alias.
    pub speaker: String,
    pub wav: WavFile,
}

impl fmt::Display for Recording {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (digit {}, speaker {}, #{}, {:.3}s)",
            self.wav.file_name, self.digit, self.speaker, self.index, self.wav.duration
        )
    }
}

// ---------------------------------------------------------------------------
// SpeakerInfo – one entry of the metadata file
// ---------------------------------------------------------------------------

/// Attributes of one speaker.
///
/// The metadata file does not fix its key names, so the accent and gender
/// are taken by position: the first attribute is a `/`-separated accent list
/// and the third is the gender. A missing or non-string value at either
/// position leaves that field empty, so the speaker simply never matches the
/// corresponding filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SpeakerInfo {
    pub accents: Vec<String>,
    pub gender: Option<String>,
    /// Every attribute in file order.
    pub attributes: Map<String, JsonValue>,
}

/// Speaker alias → attributes.
pub type SpeakerMetadata = BTreeMap<String, SpeakerInfo>;

const ACCENT_POSITION: usize = 0;
const GENDER_POSITION: usize = 2;

impl SpeakerInfo {
    /// Only a record that is not a JSON object is an error.
    pub fn from_record(speaker: &str, record: &JsonValue) -> Result<Self> {
        let attributes = record
            .as_object()
            .ok_or_else(|| CorpusError::InvalidMetadata {
                speaker: speaker.to_string(),
                reason: "record is not a JSON object".to_string(),
            })?
            .clone();

        let accents: Vec<String> = positional_string(speaker, &attributes, ACCENT_POSITION, "accent")
            .map(|accent| accent.split('/').map(str::to_string).collect())
            .unwrap_or_default();
        let gender =
            positional_string(speaker, &attributes, GENDER_POSITION, "gender").map(str::to_string);

        Ok(SpeakerInfo {
            accents,
            gender,
            attributes,
        })
    }
}

fn positional_string<'a>(
    speaker: &str,
    attributes: &'a Map<String, JsonValue>,
    position: usize,
    what: &str,
) -> Option<&'a str> {
    let Some(value) = attributes.values().nth(position) else {
        log::debug!(
            "speaker '{speaker}' has no {what} (attribute #{}): record has {} attributes",
            position + 1,
            attributes.len()
        );
        return None;
    };

    let text = value.as_str();
    if text.is_none() {
        log::debug!(
            "speaker '{speaker}' {what} (attribute #{}) is not a string: {value}",
            position + 1
        );
    }
    text
}
