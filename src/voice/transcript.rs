use super::recognizer::RecognitionFragment;

/// Accumulates recognition output for one recording session.
///
/// Final fragments append to a transcript that is never rewritten for the
/// lifetime of a session; interim fragments only ever replace the previous
/// batch's interim text. What the user sees is final + interim, what gets
/// submitted is final only.
#[derive(Debug, Default)]
pub struct TranscriptAccumulator {
    final_text: String,
    interim_text: String,
}

impl TranscriptAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one batch of fragments: finals append in arrival order, interims
    /// replace the previous interim text wholesale.
    pub fn apply_batch(&mut self, fragments: &[RecognitionFragment]) {
        let mut interim = String::new();
        for fragment in fragments {
            if fragment.is_final {
                self.final_text.push_str(&fragment.text);
            } else {
                interim.push_str(&fragment.text);
            }
        }
        self.interim_text = interim;
    }

    /// The submittable transcript (finalized speech only).
    pub fn final_text(&self) -> &str {
        &self.final_text
    }

    /// What to display while recording: finalized speech plus the in-flight
    /// interim guess.
    pub fn display_text(&self) -> String {
        format!("{}{}", self.final_text, self.interim_text)
    }

    pub fn can_submit(&self) -> bool {
        !self.final_text.trim().is_empty()
    }

    /// Called exactly once at session start.
    pub fn reset(&mut self) {
        self.final_text.clear();
        self.interim_text.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frag(text: &str, is_final: bool) -> RecognitionFragment {
        RecognitionFragment { text: text.to_string(), is_final }
    }

    #[test]
    fn interim_is_superseded_by_final() {
        let mut acc = TranscriptAccumulator::new();
        acc.apply_batch(&[frag("hi", false)]);
        assert_eq!(acc.final_text(), "");
        assert_eq!(acc.display_text(), "hi");
        assert!(!acc.can_submit());

        acc.apply_batch(&[frag("hi there", true)]);
        assert_eq!(acc.final_text(), "hi there");
        assert_eq!(acc.display_text(), "hi there");
        assert!(acc.can_submit());
    }

    #[test]
    fn finals_append_across_batches() {
        let mut acc = TranscriptAccumulator::new();
        acc.apply_batch(&[frag("the cell ", true)]);
        acc.apply_batch(&[frag("makes energy", true), frag(" and also", false)]);
        assert_eq!(acc.final_text(), "the cell makes energy");
        assert_eq!(acc.display_text(), "the cell makes energy and also");
    }

    #[test]
    fn interim_replaces_previous_interim() {
        let mut acc = TranscriptAccumulator::new();
        acc.apply_batch(&[frag("the", false)]);
        acc.apply_batch(&[frag("the cell", false)]);
        assert_eq!(acc.display_text(), "the cell");
    }

    #[test]
    fn whitespace_only_finals_do_not_enable_submission() {
        let mut acc = TranscriptAccumulator::new();
        acc.apply_batch(&[frag("   ", true)]);
        assert!(!acc.can_submit());
    }

    #[test]
    fn reset_clears_both_buffers() {
        let mut acc = TranscriptAccumulator::new();
        acc.apply_batch(&[frag("done", true), frag("more", false)]);
        acc.reset();
        assert_eq!(acc.final_text(), "");
        assert_eq!(acc.display_text(), "");
        assert!(!acc.can_submit());
    }
}
