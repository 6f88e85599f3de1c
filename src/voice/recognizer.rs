use std::{
    io::{
        BufRead,
        BufReader,
    },
    process::{
        Child,
        Command,
        Stdio,
    },
    sync::mpsc,
    thread,
};

use log::warn;
use serde::Deserialize;

use crate::core::SpeakdeckError;

/// One piece of recognition output. Interim fragments are provisional and
/// replaced batch by batch; final fragments are settled text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecognitionFragment {
    pub text: String,
    pub is_final: bool,
}

/// Error codes surfaced by the recognition capability, mirroring the Web
/// Speech API strings external recognizers emit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionError {
    NotAllowed,
    ServiceNotAllowed,
    NoSpeech,
    Other(String),
}

impl RecognitionError {
    pub fn from_code(code: &str) -> Self {
        match code {
            "not-allowed" => RecognitionError::NotAllowed,
            "service-not-allowed" => RecognitionError::ServiceNotAllowed,
            "no-speech" => RecognitionError::NoSpeech,
            other => RecognitionError::Other(other.to_string()),
        }
    }

    /// Status line shown to the user when this error terminates a recording.
    pub fn status_message(&self) -> String {
        match self {
            RecognitionError::NotAllowed | RecognitionError::ServiceNotAllowed => {
                "Microphone access denied. Please enable it in your system settings.".to_string()
            }
            RecognitionError::NoSpeech => SpeakdeckError::NoSpeechDetected.to_string(),
            RecognitionError::Other(code) => format!("Error: {}. Please try again.", code),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Started,
    Ended,
    Result(Vec<RecognitionFragment>),
    Error(RecognitionError),
}

/// The speech-recognition collaborator: commands in, an event stream out.
/// Events are delivered over an mpsc receiver the UI polls each frame.
pub trait SpeechRecognizer: Send {
    fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeakdeckError>;
    /// Best-effort halt; the stream still terminates with `Ended`.
    fn stop(&mut self);
}

/// The microphone permission capability: one request/response check resolved
/// before recognition may start.
pub trait MicrophoneGate: Send {
    fn request_access(&self) -> Result<(), SpeakdeckError>;
}

/// Checks that an input device is actually available before recording.
pub struct CpalMicrophoneGate;

impl MicrophoneGate for CpalMicrophoneGate {
    fn request_access(&self) -> Result<(), SpeakdeckError> {
        use cpal::traits::HostTrait;

        cpal::default_host()
            .default_input_device()
            .map(|_| ())
            .ok_or(SpeakdeckError::PermissionDenied)
    }
}

/// Wire shape of one recognizer stdout line: either a transcript fragment
/// (`{"text": "...", "final": false}`) or an error (`{"error": "no-speech"}`).
#[derive(Debug, Deserialize)]
struct RecognizerLine {
    #[serde(default)]
    text: Option<String>,
    #[serde(default, rename = "final")]
    is_final: bool,
    #[serde(default)]
    error: Option<String>,
}

fn parse_line(line: &str) -> Option<RecognitionEvent> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    match serde_json::from_str::<RecognizerLine>(line) {
        Ok(RecognizerLine { error: Some(code), .. }) => {
            Some(RecognitionEvent::Error(RecognitionError::from_code(&code)))
        }
        Ok(RecognizerLine { text: Some(text), is_final, .. }) => {
            Some(RecognitionEvent::Result(vec![RecognitionFragment { text, is_final }]))
        }
        Ok(_) => None,
        Err(e) => {
            warn!("Ignoring unparsable recognizer line {:?}: {}", line, e);
            None
        }
    }
}

/// Recognition backend that drives an external recognizer process configured
/// by the user (any speech-to-text bridge that streams JSON fragments, one
/// per stdout line). The process runs in continuous mode with interim
/// results; its exit is the stream's `ended` event.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    language: String,
    child: Option<Child>,
}

impl CommandRecognizer {
    /// Builds a recognizer from the settings command line. An empty command
    /// means the platform has no recognition capability at all.
    pub fn from_command_line(command_line: &str, language: &str) -> Result<Self, SpeakdeckError> {
        let mut words = command_line.split_whitespace().map(str::to_string);
        let program = words.next().ok_or(SpeakdeckError::Unsupported)?;

        Ok(Self {
            program,
            args: words.collect(),
            language: language.to_string(),
            child: None,
        })
    }
}

impl SpeechRecognizer for CommandRecognizer {
    fn start(&mut self) -> Result<mpsc::Receiver<RecognitionEvent>, SpeakdeckError> {
        self.stop();

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg("--language")
            .arg(&self.language)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => SpeakdeckError::Unsupported,
                std::io::ErrorKind::PermissionDenied => SpeakdeckError::PermissionDenied,
                _ => SpeakdeckError::ServiceError(e.to_string()),
            })?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| SpeakdeckError::ServiceError("Recognizer has no stdout".to_string()))?;

        self.child = Some(child);

        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let _ = sender.send(RecognitionEvent::Started);
            for line in BufReader::new(stdout).lines() {
                let Ok(line) = line else { break };
                if let Some(event) = parse_line(&line) {
                    if sender.send(event).is_err() {
                        return;
                    }
                }
            }
            let _ = sender.send(RecognitionEvent::Ended);
        });

        Ok(receiver)
    }

    fn stop(&mut self) {
        if let Some(mut child) = self.child.take() {
            if let Err(e) = child.kill() {
                warn!("Failed to stop recognizer process: {}", e);
            }
            let _ = child.wait();
        }
    }
}

impl Drop for CommandRecognizer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_web_speech_error_codes() {
        assert_eq!(RecognitionError::from_code("not-allowed"), RecognitionError::NotAllowed);
        assert_eq!(
            RecognitionError::from_code("service-not-allowed"),
            RecognitionError::ServiceNotAllowed
        );
        assert_eq!(RecognitionError::from_code("no-speech"), RecognitionError::NoSpeech);
        assert_eq!(
            RecognitionError::from_code("network"),
            RecognitionError::Other("network".to_string())
        );
    }

    #[test]
    fn parses_fragment_lines() {
        assert_eq!(
            parse_line(r#"{"text": "hi there", "final": true}"#),
            Some(RecognitionEvent::Result(vec![RecognitionFragment {
                text: "hi there".to_string(),
                is_final: true,
            }]))
        );
        assert_eq!(
            parse_line(r#"{"text": "hi"}"#),
            Some(RecognitionEvent::Result(vec![RecognitionFragment {
                text: "hi".to_string(),
                is_final: false,
            }]))
        );
    }

    #[test]
    fn parses_error_lines() {
        assert_eq!(
            parse_line(r#"{"error": "no-speech"}"#),
            Some(RecognitionEvent::Error(RecognitionError::NoSpeech))
        );
    }

    #[test]
    fn skips_blank_and_malformed_lines() {
        assert_eq!(parse_line(""), None);
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("not json"), None);
        assert_eq!(parse_line("{}"), None);
    }

    #[test]
    fn empty_command_line_is_unsupported() {
        assert!(matches!(
            CommandRecognizer::from_command_line("   ", "en-US"),
            Err(SpeakdeckError::Unsupported)
        ));
    }
}
