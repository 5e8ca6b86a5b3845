use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value as JsonValue};

use crate::error::{CorpusError, Result};

use super::model::{Recording, SpeakerInfo, SpeakerMetadata};
use super::wav::read_wavfile;

pub const METADATA_EXTENSION: &str = "txt";
pub const RECORDING_EXTENSION: &str = "wav";

// ---------------------------------------------------------------------------
// Recordings
// ---------------------------------------------------------------------------

/// Fields encoded in a recording's file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingName {
    pub digit: u8,
    pub speaker: String,
    pub index: u32,
}

/// Parse `<digit>_<speaker>_<index>.wav`.
///
/// The layout is positional: the digit is the first character, the speaker
/// alias is characters 3–4 and the index runs from character 6 up to the
/// first `.`. The separators themselves are not checked.
///
/// Positions are byte offsets, not characters: a non-ASCII speaker alias is
/// rejected when a slice boundary falls inside a multi-byte character.
pub fn parse_recording_name(name: &str) -> Result<RecordingName> {
    let invalid = |reason: &str| CorpusError::InvalidFileName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let digit = name
        .chars()
        .next()
        .and_then(|c| c.to_digit(10))
        .ok_or_else(|| invalid("first character is not a digit"))? as u8;

    let speaker = name
        .get(2..4)
        .ok_or_else(|| invalid("too short for a two-character speaker alias"))?
        .to_string();

    let dot = name.find('.').ok_or_else(|| invalid("no extension"))?;
    let index = name
        .get(5..dot)
        .ok_or_else(|| invalid("no utterance index before the extension"))?
        .parse::<u32>()
        .map_err(|e| invalid(&format!("utterance index is not a number ({e})")))?;

    Ok(RecordingName {
        digit,
        speaker,
        index,
    })
}

/// Decode one recording, taking digit, speaker and index from its name.
pub fn read_recording(path: &Path) -> Result<Recording> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let RecordingName {
        digit,
        speaker,
        index,
    } = parse_recording_name(&name)?;

    Ok(Recording {
        digit,
        index,
        speaker,
        wav: read_wavfile(path)?,
    })
}

/// Decode every `*.wav` in `<dataset>/<speaker>/`, ordered by file name.
///
/// A speaker without a directory has no recordings; that is not an error.
pub fn scan_speaker(dataset: &Path, speaker: &str) -> Result<Vec<Recording>> {
    let dir = dataset.join(speaker);
    let paths = match files_with_extension(&dir, RECORDING_EXTENSION) {
        Ok(paths) => paths,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::warn!("no directory for speaker '{speaker}' at {}", dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(CorpusError::io(dir, e)),
    };

    log::debug!("speaker '{speaker}': {} recording(s)", paths.len());
    paths.iter().map(|p| read_recording(p)).collect()
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Locate the metadata file: the first `*.txt` in `dataset` by name.
pub fn find_meta_file(dataset: &Path) -> Result<PathBuf> {
    let candidates =
        files_with_extension(dataset, METADATA_EXTENSION).map_err(|e| match e.kind() {
            ErrorKind::NotFound => CorpusError::MetadataNotFound(dataset.to_path_buf()),
            _ => CorpusError::io(dataset, e),
        })?;

    if candidates.len() > 1 {
        log::warn!(
            "{} metadata candidates in {}, using {}",
            candidates.len(),
            dataset.display(),
            candidates[0].display()
        );
    }

    candidates
        .into_iter()
        .next()
        .ok_or_else(|| CorpusError::MetadataNotFound(dataset.to_path_buf()))
}

/// Load the speaker metadata of a dataset.
///
/// Expected shape (the `.txt` file holds JSON):
///
/// ```json
/// {
///   "jk": { "accent": "English/Dutch", "age": 30, "gender": "male" },
///   ...
/// }
/// ```
pub fn read_meta_file(dataset: &Path) -> Result<SpeakerMetadata> {
    let path = find_meta_file(dataset)?;
    let text = std::fs::read_to_string(&path).map_err(|e| CorpusError::io(&path, e))?;
    let root: Map<String, JsonValue> =
        serde_json::from_str(&text).map_err(|source| CorpusError::Json {
            path: path.clone(),
            source,
        })?;

    root.iter()
        .map(|(alias, record)| {
            let info = SpeakerInfo::from_record(alias, record)?;
            Ok::<_, CorpusError>((alias.clone(), info))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Files in `dir` with extension `ext`, sorted by path. Symlinks are
/// followed; dangling links and directories are skipped.
fn files_with_extension(dir: &Path, ext: &str) -> std::io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|e| e.to_str()) == Some(ext) && path.is_file() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_name() {
        let name = parse_recording_name("3_jk_07.wav").unwrap();
        assert_eq!(
            name,
            RecordingName {
                digit: 3,
                speaker: "jk".to_string(),
                index: 7
            }
        );
    }

    #[test]
    fn parses_multi_digit_index() {
        let name = parse_recording_name("9_ab_123.wav").unwrap();
        assert_eq!(name.index, 123);
        assert_eq!(name.speaker, "ab");
    }

    #[test]
    fn rejects_non_digit_prefix() {
        let err = parse_recording_name("x_jk_07.wav").unwrap_err();
        assert!(matches!(err, CorpusError::InvalidFileName { .. }));
    }

    #[test]
    fn rejects_short_name() {
        assert!(parse_recording_name("3_j").is_err());
        assert!(parse_recording_name("").is_err());
    }

    #[test]
    fn rejects_non_ascii_alias() {
        let err = parse_recording_name("3_xé_07.wav").unwrap_err();
        assert!(matches!(err, CorpusError::InvalidFileName { .. }));
    }

    #[test]
    fn rejects_missing_or_bad_index() {
        assert!(parse_recording_name("3_jk_.wav").is_err());
        assert!(parse_recording_name("3_jk_ab.wav").is_err());
        assert!(parse_recording_name("3_jk_07").is_err());
    }
}
