// Report rendering: text lines, PDF export, word-cloud PNG and HTML pages.
// PDF and PNG rendering are CPU-bound; callers run them inside spawn_blocking.

pub mod pdf;
pub mod report;
pub mod templates;
pub mod wordcloud;

use bytes::Bytes;
use thiserror::Error;

use crate::analysis::AnalysisReport;

pub use pdf::REPORT_FILE_NAME;
pub use wordcloud::WordCloudOptions;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("PDF export failed: {0}")]
    Pdf(String),

    #[error("Word cloud rendering failed: {0}")]
    Image(String),
}

/// Downloadable artifacts for one analysis.
#[derive(Debug, Clone)]
pub struct ReportArtifacts {
    pub pdf: Bytes,
    pub wordcloud_png: Bytes,
}

pub fn render_artifacts(
    report: &AnalysisReport,
    cloud: &WordCloudOptions,
) -> Result<ReportArtifacts, ExportError> {
    let pdf = pdf::render_report_pdf(report)?;
    let wordcloud_png = wordcloud::render_wordcloud_png(&report.top_terms, cloud)?;
    Ok(ReportArtifacts {
        pdf: Bytes::from(pdf),
        wordcloud_png: Bytes::from(wordcloud_png),
    })
}

#[cfg(test)]
pub(crate) fn sample_report() -> AnalysisReport {
    use crate::analysis::{GrammarIssue, ScoreResult, TermFrequency};

    AnalysisReport {
        score: ScoreResult {
            total: 7.3,
            grammar: 4.0,
            skill: 3.3,
        },
        grammar_issues: vec![GrammarIssue {
            original: "Led teh team.".to_string(),
            corrected: "Led the team.".to_string(),
        }],
        matched_skills: vec!["python".to_string(), "sql".to_string()],
        missing_skills: vec!["java".to_string()],
        job_title: "IT Intern".to_string(),
        headline: "Final Year IT Student | Python | Sql".to_string(),
        recommendations: vec![
            "• Improve grammar and spelling consistency.".to_string(),
            "• Add more relevant technical skills based on your career goal.".to_string(),
        ],
        top_terms: vec![
            TermFrequency {
                term: "python".to_string(),
                count: 3,
            },
            TermFrequency {
                term: "sql".to_string(),
                count: 1,
            },
        ],
        generated_at: chrono::Utc::now(),
    }
}
