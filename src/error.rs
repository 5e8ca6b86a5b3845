use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading a corpus from disk.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no *.txt metadata file found in {}", .0.display())]
    MetadataNotFound(PathBuf),

    #[error("malformed metadata JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid metadata for speaker '{speaker}': {reason}")]
    InvalidMetadata { speaker: String, reason: String },

    #[error("invalid recording file name '{name}': {reason}")]
    InvalidFileName { name: String, reason: String },

    #[error("{}: file is {len} bytes, shorter than the 44-byte WAV header", path.display())]
    TruncatedHeader { path: PathBuf, len: usize },

    #[error("{}: sample rate is zero", .0.display())]
    ZeroSampleRate(PathBuf),

    #[error("{}: unsupported bit depth {bits} (expected 16, 32 or 64)", path.display())]
    UnsupportedBitDepth { path: PathBuf, bits: u16 },

    #[error("corpora are rooted at different datasets: {} vs {}", left.display(), right.display())]
    DatasetMismatch { left: PathBuf, right: PathBuf },
}

impl CorpusError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CorpusError::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, CorpusError>;
