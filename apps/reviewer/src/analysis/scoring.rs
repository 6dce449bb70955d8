use serde::Serialize;

pub const MAX_GRAMMAR_SCORE: usize = 5;
pub const MAX_SKILL_SCORE: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreResult {
    /// 0 – 10, `round(grammar + unrounded skill, 1)`.
    pub total: f64,
    /// 0 – 5, one point lost per grammar issue.
    pub grammar: f64,
    /// 0 – 5, proportional to the share of vocabulary matched.
    pub skill: f64,
}

/// Pure scoring formula.
///
/// `grammar = max(0, 5 - issues)`, `skill = matched / total * 5`.
/// An empty vocabulary scores 0 for skills instead of dividing by zero.
/// The total adds the unrounded skill score and is not clamped separately.
pub fn compute_score(issue_count: usize, matched_count: usize, total_count: usize) -> ScoreResult {
    let grammar = MAX_GRAMMAR_SCORE.saturating_sub(issue_count) as f64;
    let skill = if total_count == 0 {
        0.0
    } else {
        (matched_count as f64 / total_count as f64) * MAX_SKILL_SCORE
    };

    ScoreResult {
        total: round1(grammar + skill),
        grammar,
        skill: round1(skill),
    }
}

/// Rounds to one decimal place, ties to even on the exact binary value.
///
/// Float formatting is exact, so formatting with one digit and parsing back
/// gives the correctly rounded result (0.15 is stored as 0.1499… and rounds
/// down, 1.25 is exact and rounds to 1.2).
pub fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse().unwrap_or(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_issues_full_grammar_score() {
        assert_eq!(compute_score(0, 0, 10).grammar, 5.0);
    }

    #[test]
    fn test_grammar_score_saturates_at_zero() {
        for issues in [5, 6, 12, 100, usize::MAX] {
            assert_eq!(compute_score(issues, 1, 3).grammar, 0.0, "issues: {issues}");
        }
    }

    #[test]
    fn test_grammar_score_loses_one_per_issue() {
        let scores: Vec<f64> = (0..=5).map(|n| compute_score(n, 0, 1).grammar).collect();
        assert_eq!(scores, vec![5.0, 4.0, 3.0, 2.0, 1.0, 0.0]);
    }

    #[test]
    fn test_two_of_three_skills() {
        let score = compute_score(0, 2, 3);
        assert_eq!(score.skill, 3.3);
        assert_eq!(score.grammar, 5.0);
        assert_eq!(score.total, 8.3);
    }

    #[test]
    fn test_skill_score_matches_rounded_formula() {
        for total in 1..=40usize {
            for matched in 0..=total {
                let expected = round1(matched as f64 / total as f64 * 5.0);
                let score = compute_score(0, matched, total);
                assert_eq!(score.skill, expected, "{matched}/{total}");
                assert!((0.0..=5.0).contains(&score.skill));
            }
        }
    }

    #[test]
    fn test_total_bounded_zero_to_ten() {
        for issues in 0..8 {
            for matched in 0..=7 {
                let score = compute_score(issues, matched, 7);
                assert!((0.0..=10.0).contains(&score.total), "{score:?}");
            }
        }
    }

    #[test]
    fn test_total_rounded_after_summing() {
        // 4 + 1/6*5 = 4.8333…
        let score = compute_score(1, 1, 6);
        assert_eq!(score.skill, 0.8);
        assert_eq!(score.total, 4.8);
        // 2 + 1/12*5 = 2.41666…
        let score = compute_score(3, 1, 12);
        assert_eq!(score.skill, 0.4);
        assert_eq!(score.total, 2.4);
    }

    #[test]
    fn test_empty_vocabulary_scores_zero() {
        let score = compute_score(0, 0, 0);
        assert_eq!(score.skill, 0.0);
        assert_eq!(score.total, 5.0);
    }

    #[test]
    fn test_all_skills_matched_no_issues_is_ten() {
        let score = compute_score(0, 9, 9);
        assert_eq!(score.total, 10.0);
        assert_eq!(score.skill, 5.0);
    }

    #[test]
    fn test_round1_representation_aware() {
        assert_eq!(round1(3.3333333), 3.3);
        assert_eq!(round1(0.15), 0.1);
        assert_eq!(round1(2.96), 3.0);
        assert_eq!(round1(0.0), 0.0);
    }
}
