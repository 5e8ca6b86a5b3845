use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use digit_corpus::{Corpus, make_corpus};

/// Summarise a subset of a spoken-digit corpus.
#[derive(Parser, Debug)]
#[command(about)]
struct CliArgs {
    /// Dataset directory (metadata *.txt plus one directory per speaker).
    dataset: PathBuf,

    /// Include a speaker by alias. Repeatable.
    #[clap(long = "speaker")]
    speakers: Vec<String>,

    /// Include speakers with this accent (case-insensitive). Repeatable.
    #[clap(long = "accent")]
    accents: Vec<String>,

    /// Include speakers with exactly this gender. Repeatable.
    #[clap(long = "gender")]
    genders: Vec<String>,

    /// Intersect the filters instead of taking their union.
    #[clap(long)]
    intersect: bool,
}

enum Selection {
    Speaker(String),
    Accent(String),
    Gender(String),
}

impl Selection {
    fn apply(&self, corpus: &Corpus) -> digit_corpus::Result<Corpus> {
        match self {
            Selection::Speaker(alias) => corpus.add_speakers([alias.as_str()]),
            Selection::Accent(accent) => corpus.add_accent(accent),
            Selection::Gender(gender) => corpus.add_gender(gender),
        }
    }

    fn describe(&self) -> String {
        match self {
            Selection::Speaker(s) => format!("speaker {s}"),
            Selection::Accent(a) => format!("accent {a}"),
            Selection::Gender(g) => format!("gender {g}"),
        }
    }
}

fn build(args: &CliArgs) -> Result<Corpus> {
    let selections: Vec<Selection> = args
        .speakers
        .iter()
        .cloned()
        .map(Selection::Speaker)
        .chain(args.accents.iter().cloned().map(Selection::Accent))
        .chain(args.genders.iter().cloned().map(Selection::Gender))
        .collect();

    if selections.is_empty() {
        bail!("nothing selected: pass at least one --speaker, --accent or --gender");
    }

    let empty = make_corpus(&args.dataset);

    if !args.intersect {
        let mut corpus = empty;
        for selection in &selections {
            corpus = selection
                .apply(&corpus)
                .with_context(|| format!("selecting {}", selection.describe()))?;
        }
        return Ok(corpus);
    }

    let mut result: Option<Corpus> = None;
    for selection in &selections {
        let part = selection
            .apply(&empty)
            .with_context(|| format!("selecting {}", selection.describe()))?;
        result = Some(match result {
            None => part,
            Some(acc) => (&acc & &part).context("intersecting selections")?,
        });
    }
    result.context("no selections")
}

fn main() -> Result<()> {
    env_logger::init();
    let args = CliArgs::parse();

    let corpus = build(&args)?;

    let speakers: Vec<&str> = corpus.speakers().iter().map(String::as_str).collect();
    println!("dataset:    {}", corpus.dataset_path().display());
    println!("speakers:   {} [{}]", corpus.len(), speakers.join(", "));
    println!("recordings: {}", corpus.recording_count());
    println!("duration:   {:.2}s", corpus.total_duration());

    let mut per_digit: BTreeMap<u8, usize> = BTreeMap::new();
    for recording in corpus.recordings() {
        *per_digit.entry(recording.digit).or_default() += 1;
    }
    for (digit, count) in per_digit {
        println!("  digit {digit}: {count}");
    }

    Ok(())
}
