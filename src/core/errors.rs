use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeakdeckError {
    #[error("Speech recognition is not available on this system")]
    Unsupported,

    #[error("Microphone access is required. Please allow it and try again.")]
    PermissionDenied,

    #[error("No speech detected. Please try speaking louder.")]
    NoSpeechDetected,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Reqwest error: {0}")]
    Reqwest(Box<reqwest::Error>),

    #[error("SpeakdeckError: {0}")]
    Custom(String),
}

impl From<std::io::Error> for SpeakdeckError {
    fn from(error: std::io::Error) -> Self {
        SpeakdeckError::Io(Box::new(error))
    }
}

impl From<reqwest::Error> for SpeakdeckError {
    fn from(error: reqwest::Error) -> Self {
        SpeakdeckError::Reqwest(Box::new(error))
    }
}
