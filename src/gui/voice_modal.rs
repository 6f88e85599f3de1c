use eframe::egui::{
    self,
    RichText,
};

use crate::{
    gui::theme::Theme,
    voice::{
        SessionStatus,
        VoiceSessionController,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    StartRecording,
    StopRecording,
    Submit,
    /// Cancel button: skip this card.
    Cancel,
    /// Escape key: abandon the session.
    Escape,
}

/// Modal for one voice-answer session. Open exactly while the controller
/// holds a session; all state lives in the controller, this only renders it
/// and reports the user's choice.
pub struct VoiceModal;

impl VoiceModal {
    pub fn show(
        ctx: &egui::Context,
        controller: &VoiceSessionController,
        can_evaluate: bool,
        theme: &Theme,
    ) -> Option<VoiceAction> {
        let session = controller.session()?;
        let mut action = None;

        let modal = egui::Modal::new(egui::Id::new("voice_input_modal")).show(ctx, |ui| {
            ui.set_width(400.0);

            ui.label("How would you define:");
            ui.heading(RichText::new(&session.term).color(theme.purple));
            ui.add_space(8.0);

            let recording = session.status() == SessionStatus::Recording;
            let status_color = if recording { theme.red } else { theme.comment };
            ui.colored_label(status_color, controller.status_message());
            ui.add_space(8.0);

            let display = session.display_text();
            ui.add(
                egui::TextEdit::multiline(&mut display.as_str())
                    .desired_width(f32::INFINITY)
                    .desired_rows(3)
                    .hint_text("Your spoken answer appears here"),
            );
            ui.add_space(10.0);

            ui.horizontal(|ui| {
                if recording {
                    if ui.button("⏹ Stop Recording").clicked() {
                        action = Some(VoiceAction::StopRecording);
                    }
                } else if ui.button("🎤 Start Recording").clicked() {
                    action = Some(VoiceAction::StartRecording);
                }

                let submit_enabled = session.can_submit() && can_evaluate;
                if ui
                    .add_enabled(submit_enabled, egui::Button::new("Check Answer"))
                    .clicked()
                {
                    action = Some(VoiceAction::Submit);
                }

                if ui.button("Cancel").clicked() {
                    action = Some(VoiceAction::Cancel);
                }
            });
        });

        // Esc or a click outside the modal abandons the session.
        if action.is_none() && modal.should_close() {
            action = Some(VoiceAction::Escape);
        }

        action
    }
}
