use eframe::egui::{
    self,
    containers,
};

use crate::gui::{
    settings::{
        SettingsData,
        SettingsModal,
    },
    theme::Theme,
};

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        settings_modal: &mut SettingsModal,
        current_settings: &SettingsData,
        voice_supported: bool,
        theme: &Theme,
    ) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.menu_button("Settings", |ui| {
                    if ui.button("Preferences").clicked() {
                        settings_modal.open_settings(current_settings.clone());
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(
                        ui,
                        current_settings.has_api_key(),
                        voice_supported,
                        theme,
                    );
                });
            });
        });
    }

    fn show_status_indicators(
        ui: &mut egui::Ui,
        api_configured: bool,
        voice_supported: bool,
        theme: &Theme,
    ) {
        let indicator = |ui: &mut egui::Ui, on: bool, label: &str| {
            let color = if on { theme.green } else { theme.red };
            ui.label(label);
            ui.colored_label(color, "●");
        };

        indicator(ui, voice_supported, "Voice");
        ui.separator();
        indicator(ui, api_configured, "API");
    }
}
