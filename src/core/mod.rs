pub mod errors;
pub mod models;
pub mod tasks;

pub use errors::SpeakdeckError;
pub use models::{
    Assessment,
    Card,
    Feedback,
};
