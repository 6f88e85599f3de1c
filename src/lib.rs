pub mod core;
pub mod deck;
pub mod gui;
pub mod llm;
pub mod persistence;
pub mod voice;
