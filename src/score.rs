use crate::question::{OptionKey, Question, QuestionId};
use std::collections::HashMap;

pub type UserAnswers = HashMap<QuestionId, OptionKey>;

/// Strictly above this percentage passes; exactly at it fails.
pub const PASS_THRESHOLD_PERCENT: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuizResults {
    pub score: u64,
    pub total_points: u64,
    pub percentage: f64,
    pub passed: bool,
}

/// Linear point sum over the session questions, accumulated in `u64`.
pub fn compute_results(questions: &[Question], answers: &UserAnswers) -> QuizResults {
    let (score, total_points) = questions.iter().fold((0u64, 0u64), |(score, total), q| {
        let points = u64::from(q.points);
        let earned = match answers.get(&q.id) {
            Some(key) if q.is_correct(key) => points,
            _ => 0,
        };
        (score + earned, total + points)
    });

    let percentage = if total_points > 0 {
        score as f64 / total_points as f64 * 100.0
    } else {
        0.0
    };

    QuizResults {
        score,
        total_points,
        percentage,
        passed: percentage > PASS_THRESHOLD_PERCENT,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    WrongChoice,
    Neutral,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewOption {
    pub key: OptionKey,
    pub text: String,
    pub mark: OptionMark,
}

/// One row of the post-quiz summary
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewItem {
    pub number: usize,
    pub question_id: QuestionId,
    pub question: String,
    pub chosen: Option<OptionKey>,
    pub correct: OptionKey,
    pub is_correct: bool,
    pub options: Vec<ReviewOption>,
}

pub fn review(questions: &[Question], answers: &UserAnswers) -> Vec<ReviewItem> {
    questions
        .iter()
        .enumerate()
        .map(|(idx, q)| {
            let chosen = answers.get(&q.id).cloned();
            let options = q
                .options
                .iter()
                .map(|(key, text)| {
                    let mark = if q.is_correct(key) {
                        OptionMark::Correct
                    } else if chosen.as_deref() == Some(key.as_str()) {
                        OptionMark::WrongChoice
                    } else {
                        OptionMark::Neutral
                    };
                    ReviewOption {
                        key: key.clone(),
                        text: text.clone(),
                        mark,
                    }
                })
                .collect();

            ReviewItem {
                number: idx + 1,
                question_id: q.id,
                question: q.question.clone(),
                is_correct: chosen.as_deref().is_some_and(|c| q.is_correct(c)),
                chosen,
                correct: q.correct_answer.clone(),
                options,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::sample_question;

    fn answers(pairs: &[(QuestionId, &str)]) -> UserAnswers {
        pairs.iter().map(|(id, k)| (*id, k.to_string())).collect()
    }

    #[test]
    fn three_of_four_passes_at_75_percent() {
        let qs: Vec<Question> = (1..=4).map(|id| sample_question(id, "a", 1)).collect();
        let results = compute_results(&qs, &answers(&[(1, "a"), (2, "a"), (3, "a"), (4, "b")]));
        assert_eq!(results.score, 3);
        assert_eq!(results.total_points, 4);
        assert_eq!(results.percentage, 75.0);
        assert!(results.passed);
    }

    #[test]
    fn exactly_half_fails() {
        let qs = vec![sample_question(1, "a", 1), sample_question(2, "a", 1)];
        let results = compute_results(&qs, &answers(&[(1, "a"), (2, "c")]));
        assert_eq!(results.percentage, 50.0);
        assert!(!results.passed);
    }

    #[test]
    fn just_above_half_passes() {
        let qs = vec![sample_question(1, "a", 51), sample_question(2, "a", 49)];
        let results = compute_results(&qs, &answers(&[(1, "a")]));
        assert_eq!(results.score, 51);
        assert!(results.percentage > 50.0);
        assert!(results.passed);
    }

    #[test]
    fn empty_answers_score_zero() {
        let qs = vec![sample_question(1, "a", 2), sample_question(2, "b", 3)];
        let results = compute_results(&qs, &UserAnswers::new());
        assert_eq!(results.score, 0);
        assert_eq!(results.total_points, 5);
        assert_eq!(results.percentage, 0.0);
        assert!(!results.passed);
    }

    #[test]
    fn zero_total_points_is_zero_percent() {
        let qs = vec![sample_question(1, "a", 0)];
        let results = compute_results(&qs, &answers(&[(1, "a")]));
        assert_eq!(results.total_points, 0);
        assert_eq!(results.percentage, 0.0);
        assert!(!results.passed);
    }

    #[test]
    fn points_are_weighted() {
        let qs = vec![sample_question(1, "a", 3), sample_question(2, "b", 1)];
        let results = compute_results(&qs, &answers(&[(1, "a"), (2, "a")]));
        assert_eq!(results.score, 3);
        assert_eq!(results.percentage, 75.0);
    }

    #[test]
    fn large_point_values_do_not_overflow() {
        let qs = vec![
            sample_question(1, "a", 3_000_000_000),
            sample_question(2, "a", 3_000_000_000),
        ];
        let results = compute_results(&qs, &answers(&[(1, "a"), (2, "a")]));
        assert_eq!(results.score, 6_000_000_000);
        assert_eq!(results.total_points, 6_000_000_000);
        assert_eq!(results.percentage, 100.0);

        let results = compute_results(&qs, &UserAnswers::new());
        assert_eq!(results.score, 0);
        assert_eq!(results.total_points, 6_000_000_000);
    }

    #[test]
    fn compute_results_is_repeatable() {
        let qs: Vec<Question> = (1..=3).map(|id| sample_question(id, "b", 2)).collect();
        let given = answers(&[(1, "b"), (3, "d")]);
        assert_eq!(compute_results(&qs, &given), compute_results(&qs, &given));
    }

    #[test]
    fn answers_for_other_questions_are_ignored() {
        let qs = vec![sample_question(1, "a", 1)];
        let results = compute_results(&qs, &answers(&[(99, "a")]));
        assert_eq!(results.score, 0);
    }

    #[test]
    fn review_marks_options() {
        let qs = vec![sample_question(1, "a", 1), sample_question(2, "b", 1)];
        let rows = review(&qs, &answers(&[(1, "a"), (2, "c")]));

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].number, 1);
        assert!(rows[0].is_correct);
        assert_eq!(rows[0].options[0].mark, OptionMark::Correct);
        assert!(rows[0].options[1..]
            .iter()
            .all(|o| o.mark == OptionMark::Neutral));

        assert!(!rows[1].is_correct);
        assert_eq!(rows[1].chosen.as_deref(), Some("c"));
        let marks: Vec<OptionMark> = rows[1].options.iter().map(|o| o.mark).collect();
        assert_eq!(
            marks,
            vec![
                OptionMark::Neutral,
                OptionMark::Correct,
                OptionMark::WrongChoice,
                OptionMark::Neutral
            ]
        );
    }

    #[test]
    fn review_unanswered_question_is_wrong() {
        let qs = vec![sample_question(5, "d", 1)];
        let rows = review(&qs, &UserAnswers::new());
        assert_eq!(rows[0].chosen, None);
        assert!(!rows[0].is_correct);
        assert!(rows[0]
            .options
            .iter()
            .all(|o| o.mark != OptionMark::WrongChoice));
    }
}
