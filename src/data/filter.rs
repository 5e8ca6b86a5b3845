use std::collections::BTreeSet;

use super::model::{SpeakerInfo, SpeakerMetadata};

// ---------------------------------------------------------------------------
// Speaker predicates over the metadata file
// ---------------------------------------------------------------------------

/// First character upper-cased, the rest lower-cased: `"eNGLISH"` → `"English"`.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Whether any of the speaker's accents equals `accent` after capitalizing
/// both sides.
pub fn has_accent(info: &SpeakerInfo, accent: &str) -> bool {
    let wanted = capitalize(accent);
    info.accents.iter().any(|a| capitalize(a) == wanted)
}

/// Exact, case-sensitive gender match. A speaker without a gender never matches.
pub fn has_gender(info: &SpeakerInfo, gender: &str) -> bool {
    info.gender.as_deref() == Some(gender)
}

/// Aliases of all speakers that pass `predicate`.
pub fn select_speakers<F>(metadata: &SpeakerMetadata, predicate: F) -> BTreeSet<String>
where
    F: Fn(&SpeakerInfo) -> bool,
{
    metadata
        .iter()
        .filter(|(_, info)| predicate(info))
        .map(|(alias, _)| alias.clone())
        .collect()
}

pub fn speakers_with_accent(metadata: &SpeakerMetadata, accent: &str) -> BTreeSet<String> {
    select_speakers(metadata, |info| has_accent(info, accent))
}

pub fn speakers_with_gender(metadata: &SpeakerMetadata, gender: &str) -> BTreeSet<String> {
    select_speakers(metadata, |info| has_gender(info, gender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metadata() -> SpeakerMetadata {
        [
            ("aa", json!({"accent": "English/Dutch", "age": 20, "gender": "male"})),
            ("bb", json!({"accent": "german", "age": 31, "gender": "female"})),
            ("cc", json!({"accent": "ENGLISH", "age": 44, "gender": "Female"})),
            ("dd", json!({"accent": "English-American", "age": 25, "gender": "female"})),
            ("ee", json!({"accent": "English", "age": 60, "gender": null})),
            ("ff", json!({"accent": 7, "age": 19})),
        ]
        .into_iter()
        .map(|(alias, record)| {
            (alias.to_string(), SpeakerInfo::from_record(alias, &record).unwrap())
        })
        .collect()
    }

    #[test]
    fn capitalize_folds_case() {
        assert_eq!(capitalize("english"), "English");
        assert_eq!(capitalize("ENGLISH"), "English");
        assert_eq!(capitalize("eNgLiSh"), "English");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("é"), "É");
    }

    #[test]
    fn accent_match_is_case_insensitive() {
        let meta = metadata();
        let expected: BTreeSet<String> = ["aa", "cc", "ee"].iter().map(|s| s.to_string()).collect();
        for query in ["english", "ENGLISH", "EnGlIsH"] {
            assert_eq!(speakers_with_accent(&meta, query), expected);
        }
    }

    #[test]
    fn accent_match_checks_every_listed_accent() {
        let meta = metadata();
        let dutch = speakers_with_accent(&meta, "dutch");
        assert_eq!(dutch.into_iter().collect::<Vec<_>>(), vec!["aa"]);
    }

    #[test]
    fn accent_match_is_whole_entry() {
        let meta = metadata();
        assert!(speakers_with_accent(&meta, "American").is_empty());
        assert!(speakers_with_accent(&meta, "").is_empty());
    }

    #[test]
    fn gender_match_is_exact() {
        let meta = metadata();
        let female = speakers_with_gender(&meta, "female");
        assert_eq!(female.into_iter().collect::<Vec<_>>(), vec!["bb", "dd"]);
        assert_eq!(speakers_with_gender(&meta, "Female").len(), 1);
        assert!(speakers_with_gender(&meta, "FEMALE").is_empty());
        assert!(speakers_with_gender(&meta, "null").is_empty());
    }
}
