mod app;
mod select_view;
mod shortcuts;
mod whiteboard_view;

use app::BrainDumpApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_title("BrainDump"),
        ..Default::default()
    };
    eframe::run_native(
        "BrainDump",
        native_options,
        Box::new(|cc| Ok(Box::new(BrainDumpApp::new(cc)))),
    )
}
