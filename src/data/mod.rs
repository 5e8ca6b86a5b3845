/// Data layer: WAV decoding, recording and metadata loading, corpus algebra.
///
/// Architecture:
/// ```text
///  <dataset>/<speaker>/*.wav      <dataset>/*.txt (JSON)
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                 ┌──────────┐
///   │   wav     │ header → WavFile│  loader   │ → SpeakerMetadata
///   └──────────┘                 └──────────┘
///        │                              │
///        ▼                              ▼
///   ┌──────────┐                 ┌──────────┐
///   │  loader   │ name → Recording│  filter   │ accent / gender → aliases
///   └──────────┘                 └──────────┘
///        │                              │
///        └──────────────┬───────────────┘
///                       ▼
///                 ┌──────────┐
///                 │  corpus   │  speaker set → rebuilt recordings
///                 └──────────┘
/// ```

pub mod corpus;
pub mod filter;
pub mod loader;
pub mod model;
pub mod wav;
