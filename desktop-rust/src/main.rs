mod app;
mod io;

use app::InspectionApp;

fn main() -> eframe::Result<()> {
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Informe de Inspección",
        options,
        Box::new(|_cc| Box::new(InspectionApp::default())),
    )
}
