use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum VocabularyError {
    #[error("Cannot read skill vocabulary at {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Skill vocabulary at {0} contains no skills")]
    Empty(PathBuf),
}

/// Ordered, lowercase skill phrases. Immutable for the duration of a check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    phrases: Vec<String>,
}

impl SkillVocabulary {
    /// Reads a newline-delimited vocabulary file.
    ///
    /// Lines are trimmed and lowercased, blank lines skipped, duplicates
    /// dropped keeping the first occurrence. An empty result is an error.
    pub fn load(path: &Path) -> Result<Self, VocabularyError> {
        let raw = std::fs::read_to_string(path).map_err(|source| VocabularyError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;

        let (vocabulary, duplicates) = Self::parse(&raw);
        if duplicates > 0 {
            warn!(
                "Skill vocabulary {} lists {duplicates} duplicate phrase(s); counting each once",
                path.display()
            );
        }
        if vocabulary.is_empty() {
            return Err(VocabularyError::Empty(path.to_path_buf()));
        }
        Ok(vocabulary)
    }

    /// Parses vocabulary text, returning the vocabulary and the number of
    /// duplicate lines that were dropped.
    pub fn parse(raw: &str) -> (Self, usize) {
        let mut seen = HashSet::new();
        let mut phrases = Vec::new();
        let mut duplicates = 0;

        for line in raw.lines() {
            let phrase = line.trim().to_lowercase();
            if phrase.is_empty() {
                continue;
            }
            if seen.insert(phrase.clone()) {
                phrases.push(phrase);
            } else {
                duplicates += 1;
            }
        }

        (SkillVocabulary { phrases }, duplicates)
    }

    #[cfg(test)]
    pub fn from_phrases<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SkillVocabulary {
            phrases: phrases.into_iter().map(Into::into).collect(),
        }
    }

    pub fn phrases(&self) -> &[String] {
        &self.phrases
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }
}

/// Partition of the vocabulary into phrases found / not found in a resume.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkillMatch {
    pub matched: Vec<String>,
    pub missing: Vec<String>,
    pub total: usize,
}

/// Case-insensitive substring match of every vocabulary phrase against the
/// resume text. Both output lists keep vocabulary order.
pub fn match_skills(text: &str, vocabulary: &SkillVocabulary) -> SkillMatch {
    let haystack = text.to_lowercase();
    let (matched, missing): (Vec<String>, Vec<String>) = vocabulary
        .phrases()
        .iter()
        .cloned()
        .partition(|phrase| haystack.contains(phrase.to_lowercase().as_str()));

    SkillMatch {
        matched,
        missing,
        total: vocabulary.len(),
    }
}
