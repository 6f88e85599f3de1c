use eframe::egui;
use log::warn;

use crate::persistence::{
    load_json_or_default,
    save_json,
};

const SETTINGS_FILE: &str = "settings.json";

#[derive(Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SettingsData {
    pub api_key: String,
    pub model: String,
    /// BCP-47 tag passed to the recognizer (fixed per session).
    pub language: String,
    /// External speech-to-text bridge command; empty means recognition is
    /// unavailable on this system.
    pub recognizer_command: String,
    pub max_cards: u32,
}

impl Default for SettingsData {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: "gemini-1.5-flash-latest".to_string(),
            language: "en-US".to_string(),
            recognizer_command: String::new(),
            max_cards: 30,
        }
    }
}

impl SettingsData {
    /// Load persisted settings, falling back to the `GEMINI_API_KEY`
    /// environment variable when no key has been saved.
    pub fn load() -> Self {
        let mut settings: SettingsData = load_json_or_default(SETTINGS_FILE);
        if settings.api_key.is_empty() {
            if let Ok(key) = std::env::var("GEMINI_API_KEY") {
                settings.api_key = key;
            }
        }
        settings
    }

    pub fn save(&self) {
        if let Err(e) = save_json(self, SETTINGS_FILE) {
            warn!("Failed to save settings: {}", e);
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

pub struct SettingsModal {
    open: bool,
    draft: SettingsData,
}

impl SettingsModal {
    pub fn new() -> Self {
        Self { open: false, draft: SettingsData::default() }
    }

    pub fn open_settings(&mut self, current: SettingsData) {
        self.draft = current;
        self.open = true;
    }

    /// Returns the edited settings when the user confirms.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<SettingsData> {
        if !self.open {
            return None;
        }

        let mut confirmed = None;
        let modal = egui::Modal::new(egui::Id::new("settings_modal")).show(ctx, |ui| {
            ui.set_width(420.0);
            ui.heading("Settings");
            ui.add_space(10.0);

            egui::Grid::new("settings_grid").num_columns(2).spacing([10.0, 8.0]).show(ui, |ui| {
                ui.label("API key");
                ui.add(egui::TextEdit::singleline(&mut self.draft.api_key).password(true));
                ui.end_row();

                ui.label("Model");
                ui.text_edit_singleline(&mut self.draft.model);
                ui.end_row();

                ui.label("Language");
                ui.text_edit_singleline(&mut self.draft.language);
                ui.end_row();

                ui.label("Recognizer command");
                ui.text_edit_singleline(&mut self.draft.recognizer_command);
                ui.end_row();

                ui.label("Max cards");
                ui.add(egui::DragValue::new(&mut self.draft.max_cards).range(1..=100));
                ui.end_row();
            });

            ui.add_space(12.0);
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Save").clicked() {
                        confirmed = Some(self.draft.clone());
                        ui.close();
                    }
                    if ui.button("Cancel").clicked() {
                        ui.close();
                    }
                });
            });
        });

        if modal.should_close() {
            self.open = false;
        }

        confirmed
    }
}

impl Default for SettingsModal {
    fn default() -> Self {
        Self::new()
    }
}
