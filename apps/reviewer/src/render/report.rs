use crate::analysis::AnalysisReport;

/// The exported report as ordered lines: scores, suggestions, grammar,
/// skills, recommendations. Total and skill scores always carry one decimal;
/// the grammar score is a whole number.
pub fn report_lines(report: &AnalysisReport) -> Vec<String> {
    let mut lines = vec![
        format!("Resume Score: {:.1}/10", report.score.total),
        format!("Grammar Score: {}/5", report.score.grammar),
        format!("Skill Score: {:.1}/5", report.score.skill),
        format!("Suggested Job Title: {}", report.job_title),
        format!("LinkedIn Headline: {}", report.headline),
        "Grammar Suggestions:".to_string(),
    ];
    lines.extend(report.grammar_issues.iter().map(|g| g.to_report_line()));
    lines.push(format!("Skills Found: {}", report.matched_skills.join(", ")));
    lines.push(format!("Missing Skills: {}", report.missing_skills.join(", ")));
    lines.push("Recommendations:".to_string());
    lines.extend(report.recommendations.iter().cloned());
    lines
}

/// Drops every character outside Latin-1 (above U+00FF).
pub fn latin1_only(text: &str) -> String {
    text.chars().filter(|c| (*c as u32) <= 0xFF).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::sample_report;

    #[test]
    fn test_lines_in_fixed_order() {
        let lines = report_lines(&sample_report());
        assert_eq!(
            lines,
            vec![
                "Resume Score: 7.3/10",
                "Grammar Score: 4/5",
                "Skill Score: 3.3/5",
                "Suggested Job Title: IT Intern",
                "LinkedIn Headline: Final Year IT Student | Python | Sql",
                "Grammar Suggestions:",
                "Led teh team. -> Led the team.",
                "Skills Found: python, sql",
                "Missing Skills: java",
                "Recommendations:",
                "• Improve grammar and spelling consistency.",
                "• Add more relevant technical skills based on your career goal.",
            ]
        );
    }

    #[test]
    fn test_empty_sections_keep_labels() {
        let mut report = sample_report();
        report.grammar_issues.clear();
        report.matched_skills.clear();
        let lines = report_lines(&report);
        assert_eq!(lines[5], "Grammar Suggestions:");
        assert_eq!(lines[6], "Skills Found: ");
    }

    #[test]
    fn test_latin1_keeps_accents_drops_the_rest() {
        assert_eq!(latin1_only("Résumé → ✅ naïve"), "Résumé   naïve");
        // U+2022 bullet is outside Latin-1
        assert_eq!(latin1_only("• Improve"), " Improve");
        assert_eq!(latin1_only("plain ascii"), "plain ascii");
    }
}
