use uuid::Uuid;

use crate::core::{
    Card,
    Feedback,
};

#[derive(Debug, Clone)]
pub enum TaskResult {
    /// Parsed cards from a deck-generation request, or the error message to
    /// surface. An empty list is a valid outcome, not an error.
    DeckGenerated(Result<Vec<Card>, String>),

    /// Grading outcome for one submitted answer. Always carries feedback;
    /// failures are synthesized into it upstream. The card id keys the
    /// result back onto the deck — if that deck is gone, the result is
    /// dropped.
    AnswerEvaluated { card_id: Uuid, feedback: Feedback },
}

impl TaskResult {
    pub fn task_type(&self) -> &'static str {
        match self {
            TaskResult::DeckGenerated(_) => "deck_generated",
            TaskResult::AnswerEvaluated { .. } => "answer_evaluated",
        }
    }
}
