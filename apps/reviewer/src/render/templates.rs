use askama::Template;

use crate::analysis::{AnalysisReport, GrammarIssue};

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage<'a> {
    pub error: Option<&'a str>,
}

pub struct DocumentView<'a> {
    pub file_name: &'a str,
    pub text: &'a str,
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage<'a> {
    /// Current upload, if any.
    pub document: Option<DocumentView<'a>>,
    pub error: Option<String>,
}

#[derive(Template)]
#[template(path = "report.html")]
pub struct ReportPage<'a> {
    pub file_name: &'a str,
    pub total: String,
    pub grammar: String,
    pub skill: String,
    pub grammar_issues: &'a [GrammarIssue],
    pub matched: String,
    pub missing: String,
    pub job_title: &'a str,
    pub headline: &'a str,
    pub recommendations: &'a [String],
}

impl<'a> ReportPage<'a> {
    pub fn new(file_name: &'a str, report: &'a AnalysisReport) -> Self {
        let matched = if report.matched_skills.is_empty() {
            "None found.".to_string()
        } else {
            report.matched_skills.join(", ")
        };
        let missing = if report.missing_skills.is_empty() {
            "All essential skills present!".to_string()
        } else {
            report.missing_skills.join(", ")
        };

        ReportPage {
            file_name,
            total: format!("{:.1}", report.score.total),
            grammar: format!("{}", report.score.grammar),
            skill: format!("{:.1}", report.score.skill),
            grammar_issues: &report.grammar_issues,
            matched,
            missing,
            job_title: &report.job_title,
            headline: &report.headline,
            recommendations: &report.recommendations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sample_report;

    #[test]
    fn test_login_page_shows_error() {
        let html = LoginPage {
            error: Some("Invalid credentials. Try again."),
        }
        .render()
        .unwrap();
        assert!(html.contains("Invalid credentials. Try again."));
        assert!(html.contains(r#"name="password""#));
    }

    #[test]
    fn test_home_page_without_document_prompts_upload() {
        let html = HomePage {
            document: None,
            error: None,
        }
        .render()
        .unwrap();
        assert!(html.contains("Upload your resume above to begin analysis."));
        assert!(!html.contains("Analyze Resume"));
    }

    #[test]
    fn test_home_page_escapes_resume_text() {
        let html = HomePage {
            document: Some(DocumentView {
                file_name: "cv.txt",
                text: "<script>alert(1)</script>",
            }),
            error: None,
        }
        .render()
        .unwrap();
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("Analyze Resume"));
    }

    #[test]
    fn test_report_page_sections() {
        let report = sample_report();
        let html = ReportPage::new("cv.txt", &report).render().unwrap();
        assert!(html.contains("7.3/10"));
        assert!(html.contains("4/5"));
        assert!(html.contains("3.3/5"));
        assert!(html.contains("Led the team."));
        assert!(html.contains("python, sql"));
        assert!(html.contains("IT Intern"));
        assert!(html.contains("/report/pdf"));
        assert!(html.contains("/report/wordcloud.png"));
    }

    #[test]
    fn test_report_page_empty_fallbacks() {
        let mut report = sample_report();
        report.grammar_issues.clear();
        report.matched_skills.clear();
        report.missing_skills.clear();
        let html = ReportPage::new("cv.txt", &report).render().unwrap();
        assert!(html.contains("No grammar issues found!"));
        assert!(html.contains("None found."));
        assert!(html.contains("All essential skills present!"));
    }
}
