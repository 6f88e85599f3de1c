use std::sync::mpsc;

use log::info;
use uuid::Uuid;

use super::{
    recognizer::{
        MicrophoneGate,
        RecognitionEvent,
        SpeechRecognizer,
    },
    transcript::TranscriptAccumulator,
};
use crate::core::SpeakdeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Recording,
    Stopped,
}

/// One recording attempt against one card. Holds the card's id only — the
/// deck owns the card, and closing the session never touches it.
pub struct VoiceSession {
    pub card_id: Uuid,
    pub term: String,
    status: SessionStatus,
    transcript: TranscriptAccumulator,
    events: Option<mpsc::Receiver<RecognitionEvent>>,
}

impl VoiceSession {
    fn new(card_id: Uuid, term: String) -> Self {
        Self {
            card_id,
            term,
            status: SessionStatus::Idle,
            transcript: TranscriptAccumulator::new(),
            events: None,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn display_text(&self) -> String {
        self.transcript.display_text()
    }

    /// The answer that would be submitted (finalized speech only).
    pub fn final_transcript(&self) -> &str {
        self.transcript.final_text()
    }

    pub fn can_submit(&self) -> bool {
        self.transcript.can_submit()
    }
}

/// Owns the app-wide single recording slot and the recognition collaborator.
///
/// Constructed once per process. `open` claims the slot after the microphone
/// permission check, `close` releases it; recognition events are drained each
/// frame via `poll`. An error or unilateral end of the recognition stream is
/// folded into the same transition as a user stop, surfaced only through the
/// status message.
pub struct VoiceSessionController {
    recognizer: Option<Box<dyn SpeechRecognizer>>,
    gate: Box<dyn MicrophoneGate>,
    session: Option<VoiceSession>,
    status_message: String,
}

const PROMPT_MESSAGE: &str = "Click \"Start Recording\" to speak your answer.";
const LISTENING_MESSAGE: &str = "Listening... Speak now.";
const STOPPED_MESSAGE: &str = "Recording stopped.";

impl VoiceSessionController {
    /// `recognizer` is `None` when the platform has no recognition backend;
    /// the record affordance stays disabled for the process lifetime.
    pub fn new(
        recognizer: Option<Box<dyn SpeechRecognizer>>,
        gate: Box<dyn MicrophoneGate>,
    ) -> Self {
        Self { recognizer, gate, session: None, status_message: String::new() }
    }

    pub fn is_supported(&self) -> bool {
        self.recognizer.is_some()
    }

    pub fn is_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&VoiceSession> {
        self.session.as_ref()
    }

    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// Claim the session slot for `card_id`. Requires the microphone
    /// permission check to pass and the recognition capability to exist; on
    /// failure no session opens and the error doubles as the status message.
    pub fn open(&mut self, card_id: Uuid, term: &str) -> Result<(), SpeakdeckError> {
        if self.session.is_some() {
            // UI gating keeps this unreachable; reject rather than replace
            // the live session.
            return Err(SpeakdeckError::Custom("A voice session is already open".to_string()));
        }
        if self.recognizer.is_none() {
            self.status_message = SpeakdeckError::Unsupported.to_string();
            return Err(SpeakdeckError::Unsupported);
        }
        if let Err(e) = self.gate.request_access() {
            self.status_message = e.to_string();
            return Err(e);
        }

        self.session = Some(VoiceSession::new(card_id, term.to_string()));
        self.status_message = PROMPT_MESSAGE.to_string();
        Ok(())
    }

    /// Begin a recording attempt: reset the transcript and ask the
    /// recognizer to stream fragment batches.
    pub fn start(&mut self) -> Result<(), SpeakdeckError> {
        let Some(session) = self.session.as_mut() else {
            return Err(SpeakdeckError::Custom("No voice session is open".to_string()));
        };
        if session.status == SessionStatus::Recording {
            return Ok(());
        }

        let recognizer = self.recognizer.as_mut().ok_or(SpeakdeckError::Unsupported)?;
        match recognizer.start() {
            Ok(receiver) => {
                session.transcript.reset();
                session.events = Some(receiver);
                session.status = SessionStatus::Recording;
                self.status_message = LISTENING_MESSAGE.to_string();
                Ok(())
            }
            Err(e) => {
                self.status_message = e.to_string();
                Err(e)
            }
        }
    }

    /// Halt recording, keeping the session (and its transcript) open for
    /// submission or another attempt.
    pub fn stop(&mut self) {
        let Some(session) = self.session.as_mut() else { return };
        if session.status != SessionStatus::Recording {
            return;
        }
        if let Some(recognizer) = self.recognizer.as_mut() {
            recognizer.stop();
        }
        session.status = SessionStatus::Stopped;
        self.status_message = STOPPED_MESSAGE.to_string();
    }

    /// Release the session slot, stopping first if still recording. Returns
    /// the closed session so the caller can submit its transcript. The
    /// associated card is untouched.
    pub fn close(&mut self) -> Option<VoiceSession> {
        if self.session.is_some() {
            self.stop();
        }
        self.status_message.clear();
        let mut session = self.session.take()?;
        // Dropping the receiver: fragment batches still in flight land
        // nowhere and can never rewrite a closed session's transcript.
        session.events = None;
        info!("Voice session closed for card {}", session.card_id);
        Some(session)
    }

    /// Drain pending recognition events in arrival order. Called every
    /// frame while a session is open.
    pub fn poll(&mut self) {
        let Some(session) = self.session.as_mut() else { return };

        let mut pending = Vec::new();
        if let Some(events) = session.events.as_ref() {
            while let Ok(event) = events.try_recv() {
                pending.push(event);
            }
        }

        for event in pending {
            match event {
                RecognitionEvent::Started => {
                    self.status_message = LISTENING_MESSAGE.to_string();
                }
                RecognitionEvent::Result(fragments) => {
                    if let Some(session) = self.session.as_mut() {
                        session.transcript.apply_batch(&fragments);
                    }
                }
                RecognitionEvent::Error(err) => {
                    // Absorbed: same transition as a user stop, surfaced only
                    // as a status line.
                    let message = err.status_message();
                    self.stop();
                    self.status_message = message;
                }
                RecognitionEvent::Ended => {
                    // The capability may halt unilaterally (long silence);
                    // treat it as an implicit stop.
                    let still_recording = self
                        .session
                        .as_ref()
                        .is_some_and(|s| s.status == SessionStatus::Recording);
                    if still_recording {
                        if let Some(session) = self.session.as_mut() {
                            session.status = SessionStatus::Stopped;
                        }
                        self.status_message = STOPPED_MESSAGE.to_string();
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use super::*;
    use crate::voice::recognizer::{
        RecognitionError,
        RecognitionFragment,
    };

    /// Recognizer that replays a fixed event script on start.
    struct ScriptedRecognizer {
        script: Vec<RecognitionEvent>,
    }

    impl SpeechRecognizer for ScriptedRecognizer {
        fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeakdeckError> {
            let (sender, receiver) = mpsc::channel();
            sender.send(RecognitionEvent::Started).unwrap();
            for event in self.script.clone() {
                sender.send(event).unwrap();
            }
            Ok(receiver)
        }

        fn stop(&mut self) {}
    }

    struct OpenGate;

    impl MicrophoneGate for OpenGate {
        fn request_access(&self) -> Result<(), SpeakdeckError> {
            Ok(())
        }
    }

    struct DeniedGate;

    impl MicrophoneGate for DeniedGate {
        fn request_access(&self) -> Result<(), SpeakdeckError> {
            Err(SpeakdeckError::PermissionDenied)
        }
    }

    fn controller(script: Vec<RecognitionEvent>) -> VoiceSessionController {
        VoiceSessionController::new(
            Some(Box::new(ScriptedRecognizer { script })),
            Box::new(OpenGate),
        )
    }

    fn frag(text: &str, is_final: bool) -> RecognitionFragment {
        RecognitionFragment { text: text.to_string(), is_final }
    }

    #[test]
    fn only_one_session_may_be_open() {
        let mut ctl = controller(Vec::new());
        ctl.open(Uuid::new_v4(), "Osmosis").unwrap();
        assert!(ctl.open(Uuid::new_v4(), "Enzyme").is_err());
        assert!(ctl.is_open());
        assert_eq!(ctl.session().unwrap().term, "Osmosis");
    }

    #[test]
    fn denied_microphone_never_opens_a_session() {
        let mut ctl = VoiceSessionController::new(
            Some(Box::new(ScriptedRecognizer { script: Vec::new() })),
            Box::new(DeniedGate),
        );
        assert!(matches!(
            ctl.open(Uuid::new_v4(), "Osmosis"),
            Err(SpeakdeckError::PermissionDenied)
        ));
        assert!(!ctl.is_open());
        assert!(ctl.status_message().contains("Microphone access"));
    }

    #[test]
    fn missing_backend_is_unsupported() {
        let mut ctl = VoiceSessionController::new(None, Box::new(OpenGate));
        assert!(!ctl.is_supported());
        assert!(matches!(ctl.open(Uuid::new_v4(), "Osmosis"), Err(SpeakdeckError::Unsupported)));
        assert!(!ctl.is_open());
    }

    #[test]
    fn fragments_accumulate_in_arrival_order() {
        let mut ctl = controller(vec![
            RecognitionEvent::Result(vec![frag("hi", false)]),
            RecognitionEvent::Result(vec![frag("hi there", true)]),
        ]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();

        let session = ctl.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Recording);
        assert_eq!(session.final_transcript(), "hi there");
        assert_eq!(session.display_text(), "hi there");
        assert!(session.can_submit());
    }

    #[test]
    fn submission_gated_on_finalized_speech() {
        let mut ctl =
            controller(vec![RecognitionEvent::Result(vec![frag("only interim", false)])]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();
        assert!(!ctl.session().unwrap().can_submit());
    }

    #[test]
    fn error_event_stops_recording_with_its_message() {
        let mut ctl = controller(vec![RecognitionEvent::Error(RecognitionError::NoSpeech)]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();

        assert_eq!(ctl.session().unwrap().status(), SessionStatus::Stopped);
        assert!(ctl.status_message().contains("No speech detected"));
    }

    #[test]
    fn unexpected_end_is_an_implicit_stop() {
        let mut ctl = controller(vec![
            RecognitionEvent::Result(vec![frag("partial answer", true)]),
            RecognitionEvent::Ended,
        ]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();

        let session = ctl.session().unwrap();
        assert_eq!(session.status(), SessionStatus::Stopped);
        assert_eq!(session.final_transcript(), "partial answer");
    }

    #[test]
    fn restarting_resets_the_transcript() {
        let mut ctl = controller(vec![RecognitionEvent::Result(vec![frag("first try", true)])]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();
        ctl.stop();
        assert_eq!(ctl.session().unwrap().final_transcript(), "first try");

        ctl.start().unwrap();
        assert_eq!(ctl.session().unwrap().final_transcript(), "");
    }

    #[test]
    fn close_releases_the_slot_and_returns_the_session() {
        let card_id = Uuid::new_v4();
        let mut ctl = controller(vec![RecognitionEvent::Result(vec![frag("answer", true)])]);
        ctl.open(card_id, "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.poll();

        let closed = ctl.close().unwrap();
        assert_eq!(closed.card_id, card_id);
        assert_eq!(closed.final_transcript(), "answer");
        assert!(!ctl.is_open());
        assert!(ctl.close().is_none());

        // A new session may open once the slot is free.
        ctl.open(Uuid::new_v4(), "Enzyme").unwrap();
        assert!(ctl.is_open());
    }

    #[test]
    fn poll_after_close_is_harmless() {
        let mut ctl = controller(vec![RecognitionEvent::Result(vec![frag("late", true)])]);
        ctl.open(Uuid::new_v4(), "Greeting").unwrap();
        ctl.start().unwrap();
        ctl.close();
        ctl.poll();
        assert!(!ctl.is_open());
    }
}
