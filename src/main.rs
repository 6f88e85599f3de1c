use eframe::egui;
use speakdeck::gui::SpeakdeckApp;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1080.0, 720.0])
            .with_min_inner_size([640.0, 480.0])
            .with_title("Speakdeck"),
        ..Default::default()
    };

    eframe::run_native(
        "Speakdeck",
        options,
        Box::new(|cc| Ok(Box::new(SpeakdeckApp::new(cc)))),
    )
}
