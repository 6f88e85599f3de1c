pub mod recognizer;
pub mod session;
pub mod transcript;

pub use recognizer::{
    CommandRecognizer,
    CpalMicrophoneGate,
    MicrophoneGate,
    RecognitionEvent,
    RecognitionFragment,
    SpeechRecognizer,
};
pub use session::{
    SessionStatus,
    VoiceSession,
    VoiceSessionController,
};
pub use transcript::TranscriptAccumulator;
