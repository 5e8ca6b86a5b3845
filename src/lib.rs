//! Load a spoken-digit speech corpus (per-speaker WAV recordings plus a JSON
//! speaker metadata file) and build speaker subsets of it by alias, accent or
//! gender, combined by union and intersection.

pub mod data;
pub mod error;

pub use data::corpus::{make_corpus, Corpus};
pub use data::loader::{read_meta_file, read_recording};
pub use data::model::{PcmData, Recording, SpeakerInfo, SpeakerMetadata, WavFile};
pub use data::wav::read_wavfile;
pub use error::{CorpusError, Result};
