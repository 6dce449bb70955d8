use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Two or more word characters, apostrophes allowed after the first.
static TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\w[\w']+").expect("token pattern is valid"));

const STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "else",
    "ever", "few", "for", "from", "further", "get", "had", "has", "have", "having", "he", "her",
    "here", "hers", "herself", "him", "himself", "his", "how", "however", "i", "if", "in", "into",
    "is", "it", "its", "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not",
    "of", "off", "on", "once", "only", "or", "other", "ought", "our", "ours", "ourselves", "out",
    "over", "own", "same", "shall", "she", "should", "since", "so", "some", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we", "were",
    "what", "when", "where", "which", "while", "who", "whom", "why", "with", "would", "you",
    "your", "yours", "yourself", "yourselves", "don't", "can't", "won't", "i'm", "i've", "it's",
    "we're", "they're", "you're", "let's", "www", "com", "http", "https",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermFrequency {
    pub term: String,
    pub count: u32,
}

/// Counts lowercase terms in `text`, skipping stop words and pure numbers and
/// folding a trailing `'s` into the base word. Sorted by count descending,
/// then alphabetically; at most `limit` terms.
pub fn term_frequencies(text: &str, limit: usize) -> Vec<TermFrequency> {
    let mut counts: HashMap<String, u32> = HashMap::new();

    for token in TOKEN.find_iter(text) {
        let mut term = token.as_str().to_lowercase();
        if let Some(base) = term.strip_suffix("'s") {
            term = base.to_string();
        }
        let term = term.trim_end_matches('\'');
        if term.chars().count() < 2
            || term.chars().all(|c| c.is_numeric())
            || STOP_WORDS.contains(&term)
        {
            continue;
        }
        *counts.entry(term.to_string()).or_insert(0) += 1;
    }

    let mut terms: Vec<TermFrequency> = counts
        .into_iter()
        .map(|(term, count)| TermFrequency { term, count })
        .collect();
    terms.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.term.cmp(&b.term)));
    terms.truncate(limit);
    terms
}
