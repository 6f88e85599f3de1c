use eframe::egui::{
    self,
    RichText,
};
use egui_flex::{
    item,
    Flex,
};
use uuid::Uuid;

use crate::{
    core::Card,
    gui::theme::Theme,
};

const CARD_SIZE: egui::Vec2 = egui::Vec2::new(230.0, 150.0);

/// Interaction produced by the card grid. The asymmetry is deliberate: the
/// front face routes through the answer flow, only the back face flips
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeckAction {
    /// Front-face activation: open a voice session for this card.
    OpenVoice(Uuid),
    /// Back-face activation: flip back to the term, discarding feedback.
    FlipToFront(Uuid),
}

pub fn deck_view(ui: &mut egui::Ui, cards: &[Card], theme: &Theme) -> Option<DeckAction> {
    let mut action = None;

    Flex::horizontal().wrap(true).show(ui, |flex| {
        for card in cards {
            flex.add_ui(item(), |ui| {
                if let Some(clicked) = show_card(ui, card, theme) {
                    action = Some(clicked);
                }
            });
        }
    });

    action
}

fn show_card(ui: &mut egui::Ui, card: &Card, theme: &Theme) -> Option<DeckAction> {
    let stroke = match &card.feedback {
        Some(feedback) => egui::Stroke::new(2.0, theme.assessment_color(feedback.assessment)),
        None => egui::Stroke::new(1.0, theme.selection),
    };

    let fill = if card.flipped { theme.background_dark } else { theme.background_light };

    let inner = ui.push_id(card.id, |ui| {
        egui::Frame::new()
            .fill(fill)
            .stroke(stroke)
            .corner_radius(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_min_size(CARD_SIZE);
                ui.set_max_size(CARD_SIZE);

                if card.flipped {
                    show_back(ui, card, theme);
                } else {
                    show_front(ui, card, theme);
                }
            })
    });

    let response = inner.response.interact(egui::Sense::click()).on_hover_text(&card.label);

    if response.clicked() {
        if card.flipped {
            Some(DeckAction::FlipToFront(card.id))
        } else {
            Some(DeckAction::OpenVoice(card.id))
        }
    } else {
        None
    }
}

fn show_front(ui: &mut egui::Ui, card: &Card, theme: &Theme) {
    ui.centered_and_justified(|ui| {
        ui.label(RichText::new(&card.term).size(18.0).color(theme.purple).strong());
    });
}

fn show_back(ui: &mut egui::Ui, card: &Card, theme: &Theme) {
    ui.vertical(|ui| {
        ui.label(RichText::new(&card.term).color(theme.comment).small());
        ui.add_space(4.0);
        ui.label(&card.definition);

        if let Some(feedback) = &card.feedback {
            ui.add_space(6.0);
            ui.separator();
            ui.label(
                RichText::new(feedback.assessment.heading())
                    .color(theme.assessment_color(feedback.assessment))
                    .strong(),
            );
            ui.label(RichText::new(&feedback.explanation).small());
        }
    });
}
