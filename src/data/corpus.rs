use std::collections::BTreeSet;
use std::ops::{BitAnd, BitOr};
use std::path::{Path, PathBuf};

use crate::error::{CorpusError, Result};

use super::filter::{speakers_with_accent, speakers_with_gender};
use super::loader::{read_meta_file, scan_speaker};
use super::model::Recording;

// ---------------------------------------------------------------------------
// Corpus – a speaker subset of a dataset and its decoded recordings
// ---------------------------------------------------------------------------

/// A set of speakers drawn from one dataset directory, together with every
/// recording those speakers have on disk.
///
/// A corpus is never modified in place. Each operation returns a new corpus
/// whose recordings are re-read from disk for its whole speaker set, ordered
/// by speaker alias and then file name.
#[derive(Debug, Clone, PartialEq)]
pub struct Corpus {
    dataset_path: PathBuf,
    recordings: Vec<Recording>,
    speakers: BTreeSet<String>,
}

/// An empty corpus rooted at `dataset_path`.
pub fn make_corpus(dataset_path: impl Into<PathBuf>) -> Corpus {
    Corpus::new(dataset_path)
}

impl Corpus {
    /// An empty corpus: no speakers, no recordings. Nothing is read yet.
    pub fn new(dataset_path: impl Into<PathBuf>) -> Self {
        Corpus {
            dataset_path: dataset_path.into(),
            recordings: Vec::new(),
            speakers: BTreeSet::new(),
        }
    }

    /// Load the corpus for exactly `speakers`.
    fn rebuild(dataset_path: &Path, speakers: BTreeSet<String>) -> Result<Self> {
        let mut recordings = Vec::new();
        for speaker in &speakers {
            recordings.extend(scan_speaker(dataset_path, speaker)?);
        }

        log::info!(
            "built corpus from {}: {} speaker(s), {} recording(s)",
            dataset_path.display(),
            speakers.len(),
            recordings.len()
        );

        Ok(Corpus {
            dataset_path: dataset_path.to_path_buf(),
            recordings,
            speakers,
        })
    }

    fn with_speakers(&self, added: BTreeSet<String>) -> Result<Self> {
        let speakers = self.speakers.union(&added).cloned().collect();
        Corpus::rebuild(&self.dataset_path, speakers)
    }

    fn check_same_dataset(&self, other: &Corpus) -> Result<()> {
        if self.dataset_path != other.dataset_path {
            return Err(CorpusError::DatasetMismatch {
                left: self.dataset_path.clone(),
                right: other.dataset_path.clone(),
            });
        }
        Ok(())
    }

    // -- filters --

    /// Add speakers by alias. Aliases without a directory contribute no
    /// recordings but still count as speakers.
    pub fn add_speakers<I, S>(&self, speakers: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.with_speakers(speakers.into_iter().map(Into::into).collect())
    }

    /// Add every speaker whose accent list contains `accent`, compared after
    /// capitalizing (`"english"`, `"ENGLISH"` and `"eNGLISH"` are the same).
    pub fn add_accent(&self, accent: &str) -> Result<Self> {
        let metadata = read_meta_file(&self.dataset_path)?;
        let matched = speakers_with_accent(&metadata, accent);
        log::debug!("accent '{accent}' matched {} speaker(s)", matched.len());
        self.with_speakers(matched)
    }

    /// Add every speaker whose gender is exactly `gender`.
    pub fn add_gender(&self, gender: &str) -> Result<Self> {
        let metadata = read_meta_file(&self.dataset_path)?;
        let matched = speakers_with_gender(&metadata, gender);
        log::debug!("gender '{gender}' matched {} speaker(s)", matched.len());
        self.with_speakers(matched)
    }

    // -- set algebra --

    /// Speakers present in both corpora. Both must share a dataset path.
    pub fn intersect(&self, other: &Corpus) -> Result<Self> {
        self.check_same_dataset(other)?;
        let speakers = self
            .speakers
            .intersection(&other.speakers)
            .cloned()
            .collect();
        Corpus::rebuild(&self.dataset_path, speakers)
    }

    /// Speakers present in either corpus. Both must share a dataset path.
    pub fn union(&self, other: &Corpus) -> Result<Self> {
        self.check_same_dataset(other)?;
        self.with_speakers(other.speakers.clone())
    }

    // -- accessors --

    pub fn dataset_path(&self) -> &Path {
        &self.dataset_path
    }

    pub fn recordings(&self) -> &[Recording] {
        &self.recordings
    }

    pub fn speakers(&self) -> &BTreeSet<String> {
        &self.speakers
    }

    /// Number of **speakers** in the corpus, not recordings.
    /// See [`Corpus::recording_count`] for the latter.
    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    /// True when the corpus has no speakers.
    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }

    pub fn recording_count(&self) -> usize {
        self.recordings.len()
    }

    /// Sum of the `duration` of every recording, in seconds.
    pub fn total_duration(&self) -> f64 {
        self.recordings.iter().map(|r| r.wav.duration).sum()
    }

    pub fn recordings_for_digit(&self, digit: u8) -> impl Iterator<Item = &Recording> {
        self.recordings.iter().filter(move |r| r.digit == digit)
    }
}

impl BitAnd for &Corpus {
    type Output = Result<Corpus>;

    fn bitand(self, other: Self) -> Result<Corpus> {
        self.intersect(other)
    }
}

impl BitOr for &Corpus {
    type Output = Result<Corpus>;

    fn bitor(self, other: Self) -> Result<Corpus> {
        self.union(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_corpus_is_empty() {
        let corpus = make_corpus("/nonexistent/dataset");
        assert!(corpus.is_empty());
        assert_eq!(corpus.len(), 0);
        assert_eq!(corpus.recording_count(), 0);
        assert_eq!(corpus.dataset_path(), Path::new("/nonexistent/dataset"));
    }

    #[test]
    fn missing_speaker_directory_yields_no_recordings() {
        let corpus = make_corpus("/nonexistent/dataset")
            .add_speakers(["zz"])
            .unwrap();
        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.recording_count(), 0);
    }

    #[test]
    fn intersect_rejects_other_dataset() {
        let a = make_corpus("/data/one");
        let b = make_corpus("/data/two");
        let err = (&a & &b).unwrap_err();
        assert!(matches!(err, CorpusError::DatasetMismatch { .. }));
        assert!((&a | &b).is_err());
    }
}
