use std::time::Duration;

use eframe::egui::{
    self,
    RichText,
};
use log::info;
use uuid::Uuid;

use super::{
    deck_view::{
        deck_view,
        DeckAction,
    },
    message_overlay::MessageOverlay,
    settings::{
        SettingsData,
        SettingsModal,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::TopBar,
    voice_modal::{
        VoiceAction,
        VoiceModal,
    },
};
use crate::{
    core::{
        tasks::{
            TaskManager,
            TaskResult,
        },
        Card,
    },
    voice::{
        CommandRecognizer,
        CpalMicrophoneGate,
        SpeechRecognizer,
        VoiceSessionController,
    },
};

const SKIP_NOTE: &str = "The user chose to skip voice input.";
const CANCEL_NOTE: &str = "Voice input cancelled.";

pub struct SpeakdeckApp {
    // Deck
    topic: String,
    cards: Vec<Card>,

    // Status line under the topic input (errors and notices)
    status_text: String,

    // In-flight flags: one generation and one evaluation at a time
    generating: bool,
    evaluating: bool,

    // Voice
    voice: VoiceSessionController,

    // Configuration
    settings: SettingsData,

    // UI State
    theme: Theme,
    message_overlay: MessageOverlay,
    settings_modal: SettingsModal,

    task_manager: TaskManager,
}

impl SpeakdeckApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let settings = SettingsData::load();
        let theme = Theme::dracula();
        set_theme(&cc.egui_ctx, &theme);

        let status_text = if settings.has_api_key() {
            String::new()
        } else {
            "API key is not configured. Set it in Settings or the GEMINI_API_KEY environment \
             variable."
                .to_string()
        };

        Self {
            topic: String::new(),
            cards: Vec::new(),
            status_text,
            generating: false,
            evaluating: false,
            voice: build_voice_controller(&settings),
            settings,
            theme,
            message_overlay: MessageOverlay::new(),
            settings_modal: SettingsModal::new(),
            task_manager: TaskManager::new(),
        }
    }

    fn card_mut(&mut self, id: Uuid) -> Option<&mut Card> {
        self.cards.iter_mut().find(|c| c.id == id)
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::DeckGenerated(result) => {
                self.generating = false;
                self.message_overlay.clear_message();
                match result {
                    Ok(cards) if cards.is_empty() => {
                        self.status_text = "No valid flashcards generated. Model returned an \
                                            unexpected format."
                            .to_string();
                        self.cards = Vec::new();
                    }
                    Ok(cards) => {
                        info!("Generated {} flashcards", cards.len());
                        self.status_text.clear();
                        self.cards = cards;
                    }
                    Err(e) => {
                        self.status_text = format!("Error: {}", e);
                    }
                }
            }
            TaskResult::AnswerEvaluated { card_id, feedback } => {
                self.evaluating = false;
                self.status_text.clear();
                match self.card_mut(card_id) {
                    Some(card) => card.attach_feedback(feedback),
                    // Deck was regenerated while grading was in flight.
                    None => info!("Dropping evaluation result for discarded card {}", card_id),
                }
            }
        }
    }

    fn generate_deck(&mut self) {
        if self.generating {
            return;
        }
        if !self.settings.has_api_key() {
            self.status_text =
                "API key is not configured. Flashcard generation is disabled.".to_string();
            return;
        }
        let topic = self.topic.trim().to_string();
        if topic.is_empty() {
            self.status_text =
                "Please enter a topic or some terms and definitions.".to_string();
            return;
        }

        // A new deck replaces the old one; any open session is moot.
        let _ = self.voice.close();

        self.cards = Vec::new();
        self.generating = true;
        self.message_overlay.set_message("Generating flashcards...".to_string());
        self.task_manager.generate_deck(
            self.settings.model.clone(),
            self.settings.api_key.clone(),
            topic,
            self.settings.max_cards,
        );
    }

    fn handle_deck_action(&mut self, action: DeckAction) {
        match action {
            DeckAction::OpenVoice(card_id) => {
                let Some(term) = self.cards.iter().find(|c| c.id == card_id).map(|c| c.term.clone())
                else {
                    return;
                };
                if let Err(e) = self.voice.open(card_id, &term) {
                    self.status_text = e.to_string();
                }
            }
            DeckAction::FlipToFront(card_id) => {
                if let Some(card) = self.card_mut(card_id) {
                    card.flip_to_front();
                }
            }
        }
    }

    fn handle_voice_action(&mut self, action: VoiceAction) {
        match action {
            VoiceAction::StartRecording => {
                // Failures surface through the controller's status message.
                let _ = self.voice.start();
            }
            VoiceAction::StopRecording => self.voice.stop(),
            VoiceAction::Submit => self.submit_answer(),
            VoiceAction::Cancel => self.abandon_session(SKIP_NOTE),
            VoiceAction::Escape => self.abandon_session(CANCEL_NOTE),
        }
    }

    /// Close the session and send its transcript off for grading. Feedback
    /// lands on the card when the result comes back; the session itself is
    /// already gone.
    fn submit_answer(&mut self) {
        let Some(session) = self.voice.close() else { return };
        let answer = session.final_transcript().trim().to_string();
        if answer.is_empty() {
            return;
        }
        let Some(card) = self.cards.iter().find(|c| c.id == session.card_id) else { return };

        self.evaluating = true;
        self.status_text = "Evaluating your answer...".to_string();
        self.task_manager.evaluate_answer(
            self.settings.model.clone(),
            self.settings.api_key.clone(),
            card.id,
            card.term.clone(),
            card.definition.clone(),
            answer,
        );
    }

    /// Skip or cancel: close the session and show the card's back with a
    /// placeholder note instead of real feedback.
    fn abandon_session(&mut self, note: &str) {
        let Some(session) = self.voice.close() else { return };
        if let Some(card) = self.card_mut(session.card_id) {
            card.flip_to_back(Some(note));
        }
    }

    fn apply_settings(&mut self, settings: SettingsData) {
        self.settings = settings;
        self.settings.save();
        if self.settings.has_api_key() && self.status_text.starts_with("API key") {
            self.status_text.clear();
        }
        // Swap the recognition backend once no session depends on it.
        if !self.voice.is_open() {
            self.voice = build_voice_controller(&self.settings);
        }
    }

    fn show_central_panel(&mut self, ctx: &egui::Context) {
        let mut deck_action = None;
        let mut generate_clicked = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.add_space(8.0);
            ui.heading("Speakdeck");
            ui.label(
                RichText::new("Generate flashcards on any topic and answer them out loud.")
                    .color(self.theme.comment),
            );
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.add(
                    egui::TextEdit::singleline(&mut self.topic)
                        .desired_width(320.0)
                        .hint_text("Topic, e.g. \"Cell biology\""),
                );
                let enabled = !self.generating;
                if ui.add_enabled(enabled, egui::Button::new("Generate Flashcards")).clicked() {
                    generate_clicked = true;
                }
            });

            if !self.status_text.is_empty() {
                ui.add_space(4.0);
                ui.colored_label(self.theme.red, &self.status_text);
            }

            ui.add_space(12.0);

            egui::ScrollArea::vertical().show(ui, |ui| {
                deck_action = deck_view(ui, &self.cards, &self.theme);
            });
        });

        if generate_clicked {
            self.generate_deck();
        }
        if let Some(action) = deck_action {
            self.handle_deck_action(action);
        }
    }
}

impl eframe::App for SpeakdeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let task_results = self.task_manager.poll_results();
        for result in task_results {
            log::debug!("Task result: {}", result.task_type());
            self.handle_task_result(result);
        }

        self.voice.poll();

        TopBar::show(
            ctx,
            &mut self.settings_modal,
            &self.settings,
            self.voice.is_supported(),
            &self.theme,
        );

        self.show_central_panel(ctx);

        let can_evaluate = self.settings.has_api_key() && !self.evaluating;
        if let Some(action) = VoiceModal::show(ctx, &self.voice, can_evaluate, &self.theme) {
            self.handle_voice_action(action);
        }

        if let Some(settings) = self.settings_modal.show(ctx) {
            self.apply_settings(settings);
        }

        self.message_overlay.show(ctx, &self.theme);

        // Keep polling for task results and recognition events even without
        // input events.
        if self.generating || self.evaluating || self.voice.is_open() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

fn build_voice_controller(settings: &SettingsData) -> VoiceSessionController {
    let recognizer: Option<Box<dyn SpeechRecognizer>> =
        CommandRecognizer::from_command_line(&settings.recognizer_command, &settings.language)
            .ok()
            .map(|r| Box::new(r) as Box<dyn SpeechRecognizer>);

    VoiceSessionController::new(recognizer, Box::new(CpalMicrophoneGate))
}
