//! Submission grading.
//!
//! # Purpose
//! Pure scoring of a submission against a test snapshot. No partial credit:
//! a question is correct iff an answer entry exists and its selected index
//! equals the stored correct index. The per-question detail list reveals
//! correct answers and explanations; that is intentional, because the report
//! is only produced after the submission is final for that call.
//!
//! # Edge cases
//! - Unanswered questions are valid and simply incorrect.
//! - Answer entries for unknown question ids are ignored.
//! - A zero-question test scores 0 with `passed = 0 >= passing_marks`,
//!   sidestepping the division by zero in the score formula.
use crate::model::Test;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone, Copy)]
#[serde(rename_all = "camelCase")]
pub struct SubmittedAnswer {
    pub question_id: Uuid,
    /// Zero-based index of the option the student selected.
    pub selected_answer: usize,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct AnswerDetail {
    pub question_id: Uuid,
    pub question: String,
    pub user_answer: Option<usize>,
    pub correct_answer: usize,
    pub is_correct: bool,
    pub explanation: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ScoreReport {
    pub total_questions: usize,
    pub correct_answers: usize,
    /// Real-valued; `total_marks` need not divide evenly by question count.
    pub score: f64,
    pub total_marks: f64,
    pub passing_marks: f64,
    pub passed: bool,
    pub details: Vec<AnswerDetail>,
}

/// Grade `answers` against `test` in the test's fixed question order.
pub fn score(test: &Test, answers: &[SubmittedAnswer]) -> ScoreReport {
    let mut correct_answers = 0;
    let details: Vec<AnswerDetail> = test
        .questions
        .iter()
        .map(|question| {
            let user_answer = answers
                .iter()
                .find(|answer| answer.question_id == question.id)
                .map(|answer| answer.selected_answer);
            let is_correct = user_answer == Some(question.correct_answer);
            if is_correct {
                correct_answers += 1;
            }
            AnswerDetail {
                question_id: question.id,
                question: question.question.clone(),
                user_answer,
                correct_answer: question.correct_answer,
                is_correct,
                explanation: question.explanation.clone(),
            }
        })
        .collect();

    let total_questions = test.questions.len();
    let score = if total_questions == 0 {
        0.0
    } else {
        (correct_answers as f64 / total_questions as f64) * test.total_marks
    };
    ScoreReport {
        total_questions,
        correct_answers,
        score,
        total_marks: test.total_marks,
        passing_marks: test.passing_marks,
        passed: score >= test.passing_marks,
        details,
    }
}
