use eframe::egui::{
    self,
    Color32,
    Stroke,
    Visuals,
};

use crate::core::Assessment;

/// Dracula-flavored palette, following the scheme the egui_dracula project
/// documents: https://github.com/ShabbirHasan1/egui_dracula
#[derive(Clone)]
pub struct Theme {
    pub background: Color32,
    pub foreground: Color32,
    pub selection: Color32,
    pub comment: Color32,
    pub red: Color32,
    pub yellow: Color32,
    pub green: Color32,
    pub purple: Color32,
    pub cyan: Color32,
    pub background_dark: Color32,
    pub background_light: Color32,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dracula()
    }
}

impl Theme {
    pub fn dracula() -> Self {
        Self {
            background: Color32::from_rgb(0x28, 0x2a, 0x36),
            foreground: Color32::from_rgb(0xf8, 0xf8, 0xf2),
            selection: Color32::from_rgb(0x44, 0x47, 0x5a),
            comment: Color32::from_rgb(0x62, 0x72, 0xa4),
            red: Color32::from_rgb(0xff, 0x55, 0x55),
            yellow: Color32::from_rgb(0xf1, 0xfa, 0x8c),
            green: Color32::from_rgb(0x50, 0xfa, 0x7b),
            purple: Color32::from_rgb(189, 147, 249),
            cyan: Color32::from_rgb(139, 233, 253),
            background_dark: Color32::from_rgb(33, 35, 53),
            background_light: Color32::from_rgb(52, 54, 66),
        }
    }

    /// Feedback accent used for card borders and the assessment heading.
    pub fn assessment_color(&self, assessment: Assessment) -> Color32 {
        match assessment {
            Assessment::Correct => self.green,
            Assessment::PartiallyCorrect => self.yellow,
            Assessment::Incorrect => self.red,
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    let default = Visuals::dark();

    let mut visuals = Visuals {
        dark_mode: true,
        hyperlink_color: theme.cyan,
        selection: egui::style::Selection {
            bg_fill: theme.selection,
            stroke: Stroke::new(1.0, theme.cyan),
        },
        panel_fill: theme.background,
        window_fill: theme.background_dark,
        extreme_bg_color: theme.background_dark,
        ..default
    };

    visuals.widgets.noninteractive.bg_fill = theme.background;
    visuals.widgets.noninteractive.fg_stroke.color = theme.foreground;
    visuals.widgets.inactive.bg_fill = theme.background_light;
    visuals.widgets.inactive.fg_stroke.color = theme.foreground;
    visuals.widgets.hovered.bg_fill = theme.selection;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, theme.cyan);
    visuals.widgets.active.bg_fill = theme.selection;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, theme.purple);

    ctx.set_visuals(visuals);
}
