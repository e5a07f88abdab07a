use std::collections::HashMap;

use crate::models::domain::QuizItem;
use crate::models::dto::response::{GradeReport, GradedItem};

pub const POINTS_PER_QUESTION: u32 = 10;

/// Scores submitted answers against a quiz. An answer counts only when it is
/// byte-for-byte equal to the expected one; unanswered questions score zero.
pub fn grade_quiz(quizzes: &[QuizItem], answers: &HashMap<String, String>) -> GradeReport {
    let details: Vec<GradedItem> = quizzes
        .iter()
        .map(|item| {
            let user_answer = answers.get(&item.quiz_id).cloned();
            let is_correct = user_answer.as_deref() == Some(item.answer.as_str());

            GradedItem {
                quiz_id: item.quiz_id.clone(),
                question_text: item.question_text.clone(),
                answer: item.answer.clone(),
                explanation: item.explanation.clone(),
                user_answer,
                is_correct,
            }
        })
        .collect();

    let correct = details.iter().filter(|d| d.is_correct).count() as u32;

    GradeReport {
        score: correct * POINTS_PER_QUESTION,
        max_score: details.len() as u32 * POINTS_PER_QUESTION,
        details,
    }
}
