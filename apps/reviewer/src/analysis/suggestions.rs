//! Canned advice: recommendations, a suggested job title and a headline.
//!
//! All rule tables are pure and stateless.

pub const GRAMMAR_ADVICE: &str = "• Improve grammar and spelling consistency.";
pub const SKILLS_ADVICE: &str = "• Add more relevant technical skills based on your career goal.";
pub const WELL_OPTIMIZED: &str =
    "• Your resume is well optimized! Just ensure clarity and formatting.";

pub const DEFAULT_JOB_TITLE: &str = "IT Intern";
const HEADLINE_PREFIX: &str = "Final Year IT Student | ";
const HEADLINE_SKILLS: usize = 3;

/// Ordered keyword → title rules. First match wins.
const JOB_TITLE_RULES: &[(&[&str], &str)] = &[
    (&["machine learning", "deep learning"], "AI/ML Intern"),
    (&["web development"], "Frontend Developer"),
    (&["java"], "Java Developer"),
];

/// Always returns at least one line. The "well optimized" line never appears
/// alongside the other two.
pub fn recommendations(has_grammar_issues: bool, has_missing_skills: bool) -> Vec<String> {
    let mut lines = Vec::new();
    if has_grammar_issues {
        lines.push(GRAMMAR_ADVICE.to_string());
    }
    if has_missing_skills {
        lines.push(SKILLS_ADVICE.to_string());
    }
    if lines.is_empty() {
        lines.push(WELL_OPTIMIZED.to_string());
    }
    lines
}

pub fn suggest_job_title(matched_skills: &[String]) -> &'static str {
    let lowered: Vec<String> = matched_skills.iter().map(|s| s.to_lowercase()).collect();
    JOB_TITLE_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lowered.iter().any(|s| s == k)))
        .map(|(_, title)| *title)
        .unwrap_or(DEFAULT_JOB_TITLE)
}

/// `"Final Year IT Student | "` followed by up to three matched skills,
/// joined by `" | "` and title-cased.
pub fn suggest_headline(matched_skills: &[String]) -> String {
    let skills = matched_skills
        .iter()
        .take(HEADLINE_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(" | ");
    format!("{HEADLINE_PREFIX}{}", title_case(&skills))
}

/// Uppercases every letter that follows a non-letter and lowercases the rest,
/// so "node.js" becomes "Node.Js" and "c++" becomes "C++".
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_letter = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_letter = true;
        } else {
            out.push(c);
            previous_is_letter = false;
        }
    }
    out
}
