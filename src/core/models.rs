use serde::{
    Deserialize,
    Serialize,
};
use uuid::Uuid;

/// Grade assigned to a spoken answer by the evaluation model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Assessment {
    Correct,
    PartiallyCorrect,
    Incorrect,
}

impl Assessment {
    pub fn text(&self) -> &'static str {
        match self {
            Assessment::Correct => "correct",
            Assessment::PartiallyCorrect => "partially correct",
            Assessment::Incorrect => "incorrect",
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            Assessment::Correct => "CORRECT",
            Assessment::PartiallyCorrect => "PARTIALLY CORRECT",
            Assessment::Incorrect => "INCORRECT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    pub assessment: Assessment,
    pub explanation: String,
}

/// One flashcard and its flip state.
///
/// The front face shows the term; the back face shows the definition and,
/// once an answer has been graded, the attached feedback. A card with
/// feedback is always flipped to its back: `attach_feedback` forces the flip
/// and `flip_to_front` clears the feedback, so `feedback.is_some()` implies
/// `flipped`.
#[derive(Debug, Clone)]
pub struct Card {
    pub id: Uuid,
    pub term: String,
    pub definition: String,
    pub flipped: bool,
    pub feedback: Option<Feedback>,
    /// Accessible description of the currently visible face.
    pub label: String,
}

impl Card {
    pub fn new(term: impl Into<String>, definition: impl Into<String>) -> Self {
        let term = term.into();
        let label = front_label(&term);
        Self {
            id: Uuid::new_v4(),
            term,
            definition: definition.into(),
            flipped: false,
            feedback: None,
            label,
        }
    }

    /// Flip to the back face. `note` is extra label text shown in place of
    /// real feedback (skip/cancel placeholders). No-op if already flipped.
    pub fn flip_to_back(&mut self, note: Option<&str>) {
        if self.flipped {
            return;
        }
        self.flipped = true;

        let mut label = back_label(&self.term, &self.definition);
        if let Some(note) = note {
            label.push_str(&format!(" Feedback: {}", note));
        }
        self.label = label;
    }

    /// Flip to the front face, discarding any feedback. No-op if already on
    /// the front.
    pub fn flip_to_front(&mut self) {
        if !self.flipped {
            return;
        }
        self.flipped = false;
        self.feedback = None;
        self.label = front_label(&self.term);
    }

    /// Attach grading feedback, flipping the card to its back if needed.
    pub fn attach_feedback(&mut self, feedback: Feedback) {
        self.flipped = true;
        self.label = format!(
            "{} Your answer was {}. Feedback: {}",
            back_label(&self.term, &self.definition),
            feedback.assessment.text(),
            feedback.explanation
        );
        self.feedback = Some(feedback);
    }
}

fn front_label(term: &str) -> String {
    format!("Flashcard: {}. Click to provide your answer or see definition.", term)
}

fn back_label(term: &str, definition: &str) -> String {
    format!("Flashcard: {}. Definition: {}.", term, definition)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feedback() -> Feedback {
        Feedback {
            assessment: Assessment::PartiallyCorrect,
            explanation: "Close, but missed the key detail.".to_string(),
        }
    }

    #[test]
    fn starts_on_front_without_feedback() {
        let card = Card::new("Mitochondria", "The powerhouse of the cell.");
        assert!(!card.flipped);
        assert!(card.feedback.is_none());
        assert!(card.label.contains("Mitochondria"));
        assert!(!card.label.contains("powerhouse"));
    }

    #[test]
    fn flip_to_front_is_idempotent() {
        let mut card = Card::new("Ribosome", "Site of protein synthesis.");
        let before = card.label.clone();
        card.flip_to_front();
        assert!(!card.flipped);
        assert_eq!(card.label, before);
    }

    #[test]
    fn flip_to_back_is_idempotent() {
        let mut card = Card::new("Ribosome", "Site of protein synthesis.");
        card.attach_feedback(feedback());
        card.flip_to_back(Some("should not replace the feedback label"));
        assert!(card.flipped);
        assert_eq!(card.feedback, Some(feedback()));
        assert!(card.label.contains("partially correct"));
    }

    #[test]
    fn attach_feedback_forces_flip() {
        let mut card = Card::new("Osmosis", "Diffusion of water across a membrane.");
        card.attach_feedback(feedback());
        assert!(card.flipped);
        assert_eq!(card.feedback, Some(feedback()));
        assert!(card.label.contains("Your answer was partially correct"));
    }

    #[test]
    fn feedback_does_not_survive_a_front_back_round_trip() {
        let mut card = Card::new("Osmosis", "Diffusion of water across a membrane.");
        card.attach_feedback(feedback());
        card.flip_to_front();
        assert!(card.feedback.is_none());
        card.flip_to_back(None);
        assert!(card.flipped);
        assert!(card.feedback.is_none());
        assert!(card.label.contains("Definition: Diffusion of water across a membrane."));
    }

    #[test]
    fn skip_note_lands_in_the_label_not_in_feedback() {
        let mut card = Card::new("Enzyme", "A biological catalyst.");
        card.flip_to_back(Some("The user chose to skip voice input."));
        assert!(card.flipped);
        assert!(card.feedback.is_none());
        assert!(card.label.contains("The user chose to skip voice input."));
    }
}
