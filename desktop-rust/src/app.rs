use std::collections::HashMap;
use std::sync::mpsc::{self, Receiver};

use eframe::egui::{self, Color32, RichText};

use inspect_report_common::{
    CaptureOutcome, Error as FormError, FormController, FormPhase, GeneratedPdf,
    InspectionReport, ReportRenderer, FORM_FIELDS, MAX_PHOTOS,
};
use inspect_report_rust::config::Config;
use inspect_report_rust::export::artifact_file_name;
use inspect_report_rust::export::pdf::PdfRenderer;

use crate::io::{save_pdf, DialogCamera};

type RenderResult = Result<GeneratedPdf, FormError>;

pub struct InspectionApp {
    controller: FormController,
    camera: DialogCamera,
    renderer: PdfRenderer,
    power_input: String,
    oil_quantity_input: String,
    status: String,
    pending_report: Option<InspectionReport>,
    render_rx: Option<Receiver<RenderResult>>,
    thumbs: HashMap<usize, egui::TextureHandle>,
}

impl Default for InspectionApp {
    fn default() -> Self {
        let config = Config::load().unwrap_or_default();
        Self {
            controller: FormController::with_history_limit(config.history_limit),
            camera: DialogCamera,
            renderer: PdfRenderer::new().with_max_photo_px(config.max_photo_px),
            power_input: String::new(),
            oil_quantity_input: String::new(),
            status: String::new(),
            pending_report: None,
            render_rx: None,
            thumbs: HashMap::new(),
        }
    }
}

impl InspectionApp {
    fn poll_render(&mut self) {
        let Some(rx) = &self.render_rx else {
            return;
        };
        let Ok(result) = rx.try_recv() else {
            return;
        };
        self.render_rx = None;

        match result {
            Ok(pdf) => {
                if let Some(report) = self.pending_report.take() {
                    let file_name = self.controller.complete_submit(&report, pdf);
                    self.status = format!("PDF generado: {file_name}");
                }
                self.thumbs.clear();
                self.power_input.clear();
                self.oil_quantity_input.clear();
            }
            Err(err) => {
                self.pending_report = None;
                self.controller.abort_submit(err.to_string());
                self.status = "No se pudo generar el PDF".to_string();
            }
        }
    }

    fn start_submit(&mut self) {
        match self.controller.begin_submit() {
            Ok(report) => {
                let renderer = self.renderer.clone();
                let snapshot = report.clone();
                let (tx, rx) = mpsc::channel();
                self.render_rx = Some(rx);
                self.pending_report = Some(report);
                self.status = "Generando PDF...".to_string();

                std::thread::spawn(move || {
                    let _ = tx.send(renderer.render(&snapshot));
                });
            }
            Err(FormError::Validation) => {
                self.status = "Revisa los campos marcados".to_string();
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn capture(&mut self) {
        match self.controller.capture_photo(&mut self.camera) {
            Ok(CaptureOutcome::Captured) => {
                self.status = format!("Foto {} capturada", self.controller.photos().len());
            }
            Ok(CaptureOutcome::NoFrame) => {
                self.status = "Captura cancelada".to_string();
            }
            Err(err) => {
                self.status = err.to_string();
            }
        }
    }

    fn save_history_entry(&mut self, index: usize) {
        let Some(entry) = self.controller.history().entries().get(index) else {
            return;
        };
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(artifact_file_name(&entry.client))
            .save_file()
        else {
            return;
        };
        match save_pdf(&path, &entry.pdf) {
            Ok(_) => self.status = format!("Guardado {}", path.display()),
            Err(err) => self.status = format!("Error al guardar: {err}"),
        }
    }

    fn ensure_thumb(&mut self, ctx: &egui::Context, index: usize) {
        if self.thumbs.contains_key(&index) {
            return;
        }
        let Some(photo) = self.controller.photos().get(index) else {
            return;
        };
        let Ok(decoded) = image::load_from_memory(&photo.image.bytes) else {
            return;
        };

        let thumb = decoded.thumbnail(220, 160);
        let size = [thumb.width() as usize, thumb.height() as usize];
        let pixels = thumb.to_rgba8().into_raw();
        let color_image = egui::ColorImage::from_rgba_unmultiplied(size, &pixels);
        let texture = ctx.load_texture(
            format!("foto_{index}"),
            color_image,
            egui::TextureOptions::default(),
        );
        self.thumbs.insert(index, texture);
    }

    fn render_fields(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("campos")
            .num_columns(2)
            .min_col_width(140.0)
            .show(ui, |ui| {
                for spec in FORM_FIELDS {
                    ui.label(spec.label);
                    ui.vertical(|ui| {
                        self.field_widget(ui, spec.name);
                        if let Some(message) = self.controller.errors().message(spec.name) {
                            ui.label(
                                RichText::new(message)
                                    .color(Color32::from_rgb(220, 80, 80))
                                    .size(11.0),
                            );
                        }
                    });
                    ui.end_row();
                }
            });
    }

    fn field_widget(&mut self, ui: &mut egui::Ui, name: &str) {
        let fields = &mut self.controller.fields;
        match name {
            "client" => { ui.text_edit_singleline(&mut fields.client); }
            "reference" => { ui.text_edit_singleline(&mut fields.reference); }
            "dataPlate" => { ui.checkbox(&mut fields.data_plate, ""); }
            "oilLeak" => { ui.checkbox(&mut fields.oil_leak, ""); }
            "brand" => { ui.text_edit_singleline(&mut fields.brand); }
            "model" => { ui.text_edit_singleline(&mut fields.model); }
            "serial" => { ui.text_edit_singleline(&mut fields.serial); }
            "ratio" => { ui.text_edit_singleline(&mut fields.ratio); }
            "oilType" => { ui.text_edit_singleline(&mut fields.oil_type); }
            "powerKw" => {
                if ui.text_edit_singleline(&mut self.power_input).changed() {
                    self.controller.fields.power_kw = self.power_input.trim().parse().ok();
                }
            }
            "oilQuantity" => {
                if ui.text_edit_singleline(&mut self.oil_quantity_input).changed() {
                    self.controller.fields.oil_quantity =
                        self.oil_quantity_input.trim().parse().ok();
                }
            }
            _ => {}
        }
    }

    fn render_photo_section(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("Registro Fotográfico");

        if self.controller.camera_active() {
            let can_capture = self.controller.photos().len() < MAX_PHOTOS;
            if ui
                .add_enabled(can_capture, egui::Button::new("Capturar Foto"))
                .clicked()
            {
                self.capture();
            }
        } else if ui.button("Activar Cámara").clicked() {
            self.controller.activate_camera();
        }

        let mut deleted: Option<usize> = None;
        for index in 0..self.controller.photos().len() {
            self.ensure_thumb(ctx, index);
            ui.horizontal(|ui| {
                let thumb_size = egui::vec2(110.0, 80.0);
                if let Some(texture) = self.thumbs.get(&index) {
                    ui.add(egui::Image::new(texture).fit_to_exact_size(thumb_size));
                } else {
                    ui.allocate_ui_with_layout(
                        thumb_size,
                        egui::Layout::centered_and_justified(egui::Direction::LeftToRight),
                        |ui| {
                            ui.label("Sin vista previa");
                        },
                    );
                }

                if let Some(description) = self.controller.description_mut(index) {
                    ui.add(
                        egui::TextEdit::singleline(description)
                            .hint_text("Agregar descripción"),
                    );
                }

                if ui.button("❌").clicked() {
                    deleted = Some(index);
                }
            });
        }
        if let Some(index) = deleted {
            if self.controller.delete_photo(index).is_ok() {
                self.thumbs.clear();
            }
        }

        if self.controller.can_confirm() {
            let label = format!("Confirmar Foto {}", self.controller.current_photo() + 1);
            if ui.button(label).clicked() {
                // a failed confirm surfaces through the banner
                let _ = self.controller.confirm_photo();
            }
        }
    }

    fn render_history(&mut self, ui: &mut egui::Ui) {
        ui.heading("Historial de PDFs Generados");
        ui.label(format!("{} informes", self.controller.history().len()));
        ui.separator();

        let mut save_index: Option<usize> = None;
        for (index, entry) in self.controller.history().entries().iter().enumerate() {
            ui.group(|ui| {
                ui.label(RichText::new(format!("{} - {}", entry.client, entry.reference)).strong());
                ui.label(&entry.file_name);
                if ui.button("Guardar PDF").clicked() {
                    save_index = Some(index);
                }
            });
            ui.add_space(4.0);
        }
        if let Some(index) = save_index {
            self.save_history_entry(index);
        }
    }
}

impl eframe::App for InspectionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.render_rx.is_some() {
            ctx.request_repaint();
        }
        self.poll_render();

        egui::TopBottomPanel::top("top").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Formulario de Inspección");
                ui.separator();
                if let Some(banner) = self.controller.banner() {
                    ui.label(RichText::new(banner).color(Color32::from_rgb(246, 196, 69)));
                }
                if !self.status.is_empty() {
                    ui.label(RichText::new(&self.status).color(Color32::from_gray(170)));
                }
            });
        });

        egui::SidePanel::right("historial")
            .resizable(true)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    self.render_history(ui);
                });
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.render_fields(ui);
                ui.separator();
                self.render_photo_section(ui, ctx);
                ui.separator();

                let submitting = self.controller.phase() == FormPhase::Submitting;
                if ui
                    .add_enabled(!submitting, egui::Button::new("Generar PDF"))
                    .clicked()
                {
                    self.start_submit();
                }
            });
        });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        // history buffers are session-lifetime only
        self.controller.revoke_history();
    }
}
