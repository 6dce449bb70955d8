//! Word-level spelling correction behind the `SpellCorrector` trait.
//!
//! Default: `SymSpellCorrector`, a symmetric-delete lookup (the `symspell`
//! crate) over a frequency dictionary. The dictionary file uses SymSpell's
//! `term count` line format; a bare term gets a count derived from its rank.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use symspell::{SymSpell, UnicodeStringStrategy, Verbosity};
use thiserror::Error;

/// Text → corrected text. Carried in `AppState` as `Arc<dyn SpellCorrector>`.
pub trait SpellCorrector: Send + Sync {
    fn correct(&self, text: &str) -> String;
}

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("Cannot read spelling lexicon at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Spelling lexicon at {0} contains no words")]
    Empty(PathBuf),

    #[error("Invalid frequency on line {line} of the spelling lexicon: '{value}'")]
    BadFrequency { line: usize, value: String },
}

static WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\p{L}+(?:'\p{L}+)*").expect("word pattern is valid"));

/// Shortest word that may be corrected at all.
const MIN_CORRECTABLE_LEN: usize = 3;
/// Shortest word that may be corrected at edit distance 2.
const MIN_DISTANCE_TWO_LEN: usize = 5;

pub struct SymSpellCorrector {
    speller: SymSpell<UnicodeStringStrategy>,
    words: HashSet<String>,
}

impl SymSpellCorrector {
    pub fn load(path: &Path) -> Result<Self, LexiconError> {
        let raw = std::fs::read_to_string(path).map_err(|source| LexiconError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        let corrector = Self::parse(&raw)?;
        if corrector.is_empty() {
            return Err(LexiconError::Empty(path.to_path_buf()));
        }
        Ok(corrector)
    }

    /// Parses `term [count]` lines. Lines starting with `#` are comments.
    /// Repeated terms keep their first line.
    pub fn parse(raw: &str) -> Result<Self, LexiconError> {
        let rows: Vec<(usize, &str)> = raw
            .lines()
            .enumerate()
            .map(|(i, l)| (i + 1, l.trim()))
            .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'))
            .collect();
        let row_count = rows.len() as u64;

        let mut speller = SymSpell::<UnicodeStringStrategy>::default();
        let mut words = HashSet::with_capacity(rows.len());
        for (rank, (line, row)) in rows.into_iter().enumerate() {
            let mut parts = row.split_whitespace();
            let Some(term) = parts.next().map(str::to_lowercase) else {
                continue;
            };
            let count = match parts.next() {
                Some(value) => value
                    .parse::<u64>()
                    .ok()
                    .filter(|c| *c > 0)
                    .ok_or_else(|| LexiconError::BadFrequency {
                        line,
                        value: value.to_string(),
                    })?,
                None => row_count - rank as u64,
            };
            if !words.insert(term.clone()) {
                continue;
            }
            speller.load_dictionary_line(&format!("{term} {count}"), 0, 1, " ");
        }

        Ok(SymSpellCorrector { speller, words })
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_known(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Corrects a single word token. Only lowercase alphabetic words are
    /// candidates; capitalised words are treated as names.
    pub fn correct_word(&self, word: &str) -> String {
        if !is_correctable(word) {
            return word.to_string();
        }
        let lower = word.to_lowercase();
        if self.is_known(&lower) {
            return word.to_string();
        }

        let max_distance = if lower.chars().count() >= MIN_DISTANCE_TWO_LEN {
            2
        } else {
            1
        };
        self.speller
            .lookup(&lower, Verbosity::Top, max_distance)
            .into_iter()
            .next()
            .map_or_else(|| word.to_string(), |suggestion| suggestion.term)
    }
}

impl SpellCorrector for SymSpellCorrector {
    fn correct(&self, text: &str) -> String {
        WORD.replace_all(text, |caps: &regex::Captures| self.correct_word(&caps[0]))
            .into_owned()
    }
}

fn is_correctable(word: &str) -> bool {
    word.chars().count() >= MIN_CORRECTABLE_LEN
        && word.chars().all(char::is_alphabetic)
        && !word.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn corrector() -> SymSpellCorrector {
        SymSpellCorrector::parse(
            "# test lexicon\n\
             the 1000\n\
             experience 300\n\
             developed 250\n\
             project 240\n\
             projects 200\n\
             team 180\n\
             teams 20\n\
             with 900\n\
             and 950\n\
             managed 120\n\
             software 140\n",
        )
        .unwrap()
    }

    #[test]
    fn test_known_words_untouched() {
        let c = corrector();
        assert_eq!(c.correct("developed software with the team"), "developed software with the team");
    }

    #[test]
    fn test_single_edit_corrected() {
        let c = corrector();
        assert_eq!(c.correct_word("devloped"), "developed");
        assert_eq!(c.correct_word("softwre"), "software");
        assert_eq!(c.correct_word("teh"), "the");
    }

    #[test]
    fn test_transposition_is_single_edit() {
        assert_eq!(corrector().correct_word("mangaed"), "managed");
    }

    #[test]
    fn test_distance_two_only_for_longer_words() {
        let c = corrector();
        assert_eq!(c.correct_word("expirienc"), "experience");
        // "tmx" is two edits from "the" but too short for distance 2
        assert_eq!(c.correct_word("tmx"), "tmx");
    }

    #[test]
    fn test_frequency_breaks_distance_ties() {
        // "projectz" is one edit from "project" and "projects"; "project" is more frequent.
        assert_eq!(corrector().correct_word("projectz"), "project");
    }

    #[test]
    fn test_capitalized_and_acronyms_skipped() {
        let c = corrector();
        assert_eq!(c.correct_word("Kubernetes"), "Kubernetes");
        assert_eq!(c.correct_word("AWS"), "AWS");
        assert_eq!(c.correct_word("ab"), "ab");
    }

    #[test]
    fn test_contractions_left_alone() {
        assert_eq!(corrector().correct("don't touch"), "don't touch");
    }

    #[test]
    fn test_unknown_word_without_candidate_kept() {
        assert_eq!(corrector().correct_word("zzzzzzzz"), "zzzzzzzz");
    }

    #[test]
    fn test_punctuation_and_spacing_preserved() {
        let c = corrector();
        assert_eq!(
            c.correct("I devloped  software, with the tem!"),
            "I developed  software, with the team!"
        );
    }

    #[test]
    fn test_rank_frequency_when_counts_missing() {
        let c = SymSpellCorrector::parse("cart\ncard\n").unwrap();
        // "carx" is one edit from both; "cart" ranks first
        assert_eq!(c.correct_word("carx"), "cart");
    }

    #[test]
    fn test_repeated_terms_counted_once() {
        let c = SymSpellCorrector::parse("card 5\ncart 9\ncard 50\n").unwrap();
        assert_eq!(c.len(), 2);
        assert_eq!(c.correct_word("carx"), "cart");
    }

    #[test]
    fn test_bad_frequency_rejected() {
        let err = SymSpellCorrector::parse("word many\n").err().unwrap();
        assert!(matches!(err, LexiconError::BadFrequency { line: 1, .. }));
        let err = SymSpellCorrector::parse("the 10\nword 0\n").err().unwrap();
        assert!(matches!(err, LexiconError::BadFrequency { line: 2, .. }));
    }

    #[test]
    fn test_load_empty_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# nothing here").unwrap();
        let err = SymSpellCorrector::load(file.path()).err().unwrap();
        assert!(matches!(err, LexiconError::Empty(_)));
    }

    #[test]
    fn test_shipped_lexicon_loads() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/lexicon.txt");
        let c = SymSpellCorrector::load(&path).unwrap();
        assert!(c.len() > 500);
        assert!(c.is_known("experience"));
        assert_eq!(c.correct("I devloped softwre"), "I developed software");
    }
}
