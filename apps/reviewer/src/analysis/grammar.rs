use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::analysis::spelling::SpellCorrector;

/// A sentence whose corrected form differs from the original.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GrammarIssue {
    pub original: String,
    pub corrected: String,
}

impl GrammarIssue {
    /// Single-line form used in the exported report.
    pub fn to_report_line(&self) -> String {
        format!("{} -> {}", self.original, self.corrected)
    }
}

/// Terminal punctuation (plus closing quotes/brackets) followed by whitespace,
/// or a blank line.
static BOUNDARY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.!?]+["')\]]*\s+|\n[ \t]*\n\s*"#).expect("boundary pattern is valid")
});

/// Words whose trailing period does not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "e.g", "i.e", "etc", "mr", "mrs", "ms", "dr", "vs", "inc", "jr", "sr", "prof", "st",
];

/// Splits text into trimmed, non-empty sentences.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in BOUNDARY.find_iter(text) {
        if ends_with_abbreviation(&text[start..m.start()], m.as_str()) {
            continue;
        }
        push_trimmed(&mut sentences, &text[start..m.end()]);
        start = m.end();
    }
    push_trimmed(&mut sentences, &text[start..]);
    sentences
}

fn push_trimmed<'a>(sentences: &mut Vec<&'a str>, candidate: &'a str) {
    let trimmed = candidate.trim();
    if !trimmed.is_empty() {
        sentences.push(trimmed);
    }
}

fn ends_with_abbreviation(before: &str, boundary: &str) -> bool {
    // a blank line after the period still ends the sentence
    if !boundary.starts_with('.') || boundary.matches('\n').count() >= 2 {
        return false;
    }
    let last_word = before
        .rsplit(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("")
        .to_lowercase();
    ABBREVIATIONS.contains(&last_word.as_str())
}

/// Runs every sentence through the corrector and keeps the ones that changed,
/// in sentence order.
pub fn check_grammar(text: &str, corrector: &dyn SpellCorrector) -> Vec<GrammarIssue> {
    split_sentences(text)
        .into_iter()
        .filter_map(|sentence| {
            let corrected = corrector.correct(sentence);
            (corrected != sentence).then(|| GrammarIssue {
                original: sentence.to_string(),
                corrected,
            })
        })
        .collect()
}
