use std::collections::BTreeMap;
use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use hound::{SampleFormat, WavSpec, WavWriter};
use serde::Serialize;

/// Write a small synthetic spoken-digit dataset.
#[derive(Parser, Debug)]
#[command(about)]
struct CliArgs {
    /// Output directory; created if missing.
    output: PathBuf,

    /// Utterances per digit per speaker.
    #[clap(long, default_value_t = 2)]
    utterances: u32,

    /// Sample rate of the generated WAVs.
    #[clap(long, default_value_t = 8000)]
    sample_rate: u32,

    #[clap(long, default_value_t = 42)]
    seed: u64,
}

#[derive(Serialize)]
struct SpeakerRecord {
    accent: &'static str,
    age: u32,
    gender: &'static str,
    native_language: &'static str,
}

const SPEAKERS: [(&str, SpeakerRecord); 4] = [
    (
        "jk",
        SpeakerRecord {
            accent: "English",
            age: 34,
            gender: "male",
            native_language: "english",
        },
    ),
    (
        "nl",
        SpeakerRecord {
            accent: "Dutch/English",
            age: 27,
            gender: "female",
            native_language: "dutch",
        },
    ),
    (
        "de",
        SpeakerRecord {
            accent: "German",
            age: 45,
            gender: "male",
            native_language: "german",
        },
    ),
    (
        "fr",
        SpeakerRecord {
            accent: "french/english",
            age: 52,
            gender: "female",
            native_language: "french",
        },
    ),
];

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// A tone burst for one digit: pitch rises with the digit, shaped by a
/// gaussian envelope, plus noise.
fn generate_utterance(digit: u8, pitch: f64, fs: u32, noise: &mut NoiseSource) -> Vec<i16> {
    let n = (fs as f64 * (0.3 + 0.02 * digit as f64)) as usize;
    let centre = n as f64 / 2.0;
    let freq = pitch * (1.0 + digit as f64 / 10.0);
    (0..n)
        .map(|i| {
            let t = i as f64 / fs as f64;
            let envelope = gaussian(i as f64, centre, n as f64 / 6.0, 0.6);
            let value = envelope * (2.0 * PI * freq * t).sin() + noise.gauss(0.0, 0.01);
            (value.clamp(-1.0, 1.0) * i16::MAX as f64) as i16
        })
        .collect()
}

/// Seeded white noise for the synthetic utterances. SplitMix64 gives the
/// uniform draws, Box-Muller turns pairs of them into normal samples.
struct NoiseSource {
    counter: u64,
    spare: Option<f64>,
}

impl NoiseSource {
    const GOLDEN_GAMMA: u64 = 0x9e37_79b9_7f4a_7c15;

    fn new(seed: u64) -> Self {
        NoiseSource {
            counter: seed,
            spare: None,
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.counter = self.counter.wrapping_add(Self::GOLDEN_GAMMA);
        let mut z = self.counter;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    /// Uniform in `(0, 1]`, never zero so the logarithm below is finite.
    fn unit(&mut self) -> f64 {
        ((self.next_u64() >> 11) + 1) as f64 / (1u64 << 53) as f64
    }

    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z = match self.spare.take() {
            Some(z) => z,
            None => {
                let radius = (-2.0 * self.unit().ln()).sqrt();
                let angle = 2.0 * PI * self.unit();
                self.spare = Some(radius * angle.sin());
                radius * angle.cos()
            }
        };
        mean + std_dev * z
    }
}

fn write_wav(path: &Path, samples: &[i16], fs: u32) -> Result<()> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: fs,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("creating {}", path.display()))?;
    for &s in samples {
        writer.write_sample(s)?;
    }
    writer.finalize()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let mut noise = NoiseSource::new(args.seed);

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let metadata: BTreeMap<&str, &SpeakerRecord> =
        SPEAKERS.iter().map(|(alias, record)| (*alias, record)).collect();
    let meta_path = args.output.join("speakers.txt");
    let json = serde_json::to_string_pretty(&metadata).context("serialising metadata")?;
    std::fs::write(&meta_path, json)
        .with_context(|| format!("writing {}", meta_path.display()))?;

    let mut written = 0usize;
    for (n, (alias, record)) in SPEAKERS.iter().enumerate() {
        let dir = args.output.join(alias);
        std::fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;

        let base = if record.gender == "female" { 210.0 } else { 120.0 };
        let pitch = base + 7.0 * n as f64;
        for digit in 0..10u8 {
            for index in 0..args.utterances {
                let samples = generate_utterance(digit, pitch, args.sample_rate, &mut noise);
                let path = dir.join(format!("{digit}_{alias}_{index}.wav"));
                write_wav(&path, &samples, args.sample_rate)?;
                written += 1;
            }
        }
        log::info!("wrote speaker {alias} to {}", dir.display());
    }

    println!(
        "Wrote {written} recordings for {} speakers to {}",
        SPEAKERS.len(),
        args.output.display()
    );
    Ok(())
}
