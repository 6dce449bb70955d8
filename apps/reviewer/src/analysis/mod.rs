// Resume analysis pipeline.
// text → {grammar check, skill match} → score → suggestions → AnalysisReport.
// Everything here is synchronous; callers run it inside spawn_blocking.

pub mod grammar;
pub mod scoring;
pub mod skills;
pub mod spelling;
pub mod suggestions;
pub mod terms;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

pub use grammar::GrammarIssue;
pub use scoring::ScoreResult;
pub use skills::SkillVocabulary;
pub use spelling::SpellCorrector;
pub use terms::TermFrequency;

/// Everything produced by one "Analyze" action.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub score: ScoreResult,
    pub grammar_issues: Vec<GrammarIssue>,
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub job_title: String,
    pub headline: String,
    pub recommendations: Vec<String>,
    pub top_terms: Vec<TermFrequency>,
    pub generated_at: DateTime<Utc>,
}

/// Runs the full pipeline over already-extracted resume text.
pub fn analyze(
    text: &str,
    vocabulary: &SkillVocabulary,
    corrector: &dyn SpellCorrector,
    max_terms: usize,
) -> AnalysisReport {
    let grammar_issues = grammar::check_grammar(text, corrector);
    let skill_match = skills::match_skills(text, vocabulary);
    let score = scoring::compute_score(
        grammar_issues.len(),
        skill_match.matched.len(),
        skill_match.total,
    );

    let job_title = suggestions::suggest_job_title(&skill_match.matched).to_string();
    let headline = suggestions::suggest_headline(&skill_match.matched);
    let recommendations = suggestions::recommendations(
        !grammar_issues.is_empty(),
        !skill_match.missing.is_empty(),
    );

    info!(
        "Analysis complete: score {}/10, {} grammar issue(s), {}/{} skills matched",
        score.total,
        grammar_issues.len(),
        skill_match.matched.len(),
        skill_match.total
    );

    AnalysisReport {
        score,
        grammar_issues,
        matched_skills: skill_match.matched,
        missing_skills: skill_match.missing,
        job_title,
        headline,
        recommendations,
        top_terms: terms::term_frequencies(text, max_terms),
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoCorrections;

    impl SpellCorrector for NoCorrections {
        fn correct(&self, text: &str) -> String {
            text.to_string()
        }
    }

    struct FixTeh;

    impl SpellCorrector for FixTeh {
        fn correct(&self, text: &str) -> String {
            text.replace("teh", "the")
        }
    }

    #[test]
    fn test_python_sql_resume() {
        let vocab = SkillVocabulary::from_phrases(["python", "java", "sql"]);
        let report = analyze(
            "Experienced in Python and SQL projects",
            &vocab,
            &NoCorrections,
            50,
        );

        assert_eq!(report.matched_skills, vec!["python", "sql"]);
        assert_eq!(report.missing_skills, vec!["java"]);
        assert_eq!(report.score.skill, 3.3);
        assert_eq!(report.score.grammar, 5.0);
        assert_eq!(report.score.total, 8.3);
        assert_eq!(report.job_title, "IT Intern");
        assert_eq!(report.headline, "Final Year IT Student | Python | Sql");
        assert_eq!(report.recommendations, vec![suggestions::SKILLS_ADVICE]);
    }

    #[test]
    fn test_perfect_resume_is_well_optimized() {
        let vocab = SkillVocabulary::from_phrases(["java"]);
        let report = analyze("Senior Java engineer.", &vocab, &NoCorrections, 50);
        assert_eq!(report.score.total, 10.0);
        assert_eq!(report.recommendations, vec![suggestions::WELL_OPTIMIZED]);
        assert_eq!(report.job_title, "Java Developer");
    }

    #[test]
    fn test_grammar_issues_lower_score_and_add_advice() {
        let vocab = SkillVocabulary::from_phrases(["java"]);
        let report = analyze(
            "Led teh java team. Fixed teh build.",
            &vocab,
            &FixTeh,
            50,
        );
        assert_eq!(report.grammar_issues.len(), 2);
        assert_eq!(report.score.grammar, 3.0);
        assert_eq!(report.score.total, 8.0);
        assert_eq!(report.recommendations, vec![suggestions::GRAMMAR_ADVICE]);

        let json = serde_json::to_value(&report).unwrap();
        assert!(json["grammar_issues"][0]["original"].as_str().unwrap().contains("teh"));
        assert!(json["grammar_issues"][0]["corrected"].as_str().unwrap().contains("the"));
    }

    #[test]
    fn test_report_serializes_to_json() {
        let vocab = SkillVocabulary::from_phrases(["sql"]);
        let report = analyze("sql sql", &vocab, &NoCorrections, 5);
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["score"]["total"], 10.0);
        assert_eq!(json["matched_skills"][0], "sql");
        assert_eq!(json["top_terms"][0]["term"], "sql");
        assert_eq!(json["top_terms"][0]["count"], 2);
    }
}
