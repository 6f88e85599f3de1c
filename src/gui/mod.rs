pub mod app;
pub mod deck_view;
pub mod message_overlay;
pub mod settings;
pub mod theme;
pub mod top_bar;
pub mod voice_modal;

pub use app::SpeakdeckApp;
