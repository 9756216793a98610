use clap::Parser;
use inspect_report_rust::{camera, cli, config, draft, error, export, prompt};

use cli::{Cli, Commands};
use config::Config;
use error::{InspectError, Result};
use export::pdf::PdfRenderer;
use inspect_report_common::{
    validation, CaptureOutcome, Error as FormError, FormController, ReportRenderer, MAX_PHOTOS,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load()?;

    match cli.command {
        Commands::Export { draft: draft_path, output, photos, max_photo_px } => {
            println!("📄 inspect-report - Exportación\n");

            // 1. Draft
            println!("[1/3] Leyendo borrador...");
            let draft = draft::Draft::load(&draft_path)?;
            let mut controller = FormController::with_history_limit(config.history_limit);
            let confirmed = draft::apply_draft(&mut controller, &draft)?;
            println!("✔ {} fotos del borrador adjuntas", confirmed);
            if confirmed < draft.photos.len() {
                println!(
                    "⚠ {} fotos del borrador omitidas (capacidad o descripción vacía)",
                    draft.photos.len() - confirmed
                );
            }

            // 2. Extra photos from a folder
            if let Some(folder) = photos {
                let mut folder_camera = camera::FolderCamera::scan(&folder)?;
                if folder_camera.remaining() == 0 {
                    return Err(InspectError::NoImagesFound(folder.display().to_string()));
                }

                let mut attached = 0;
                while controller.photos().len() < MAX_PHOTOS {
                    let Some(stem) = folder_camera.next_stem() else {
                        break;
                    };
                    match controller.capture_photo(&mut folder_camera)? {
                        CaptureOutcome::Captured => {
                            let slot = controller.photos().len() - 1;
                            controller.set_description(slot, &stem)?;
                            controller.confirm_photo()?;
                            attached += 1;
                            if cli.verbose {
                                println!("  + {}", stem);
                            }
                        }
                        CaptureOutcome::NoFrame => break,
                    }
                }
                println!("✔ {} fotos adjuntas desde {}", attached, folder.display());
            }

            // 3. Validate + render
            println!("[2/3] Validando formulario...");
            let report = match controller.begin_submit() {
                Ok(report) => report,
                Err(FormError::Validation) => {
                    println!("\n✘ El borrador tiene campos obligatorios vacíos:");
                    for (name, message) in controller.errors().iter() {
                        let label = validation::find_field(name).map(|s| s.label).unwrap_or(name);
                        println!("  - {}: {}", label, message);
                    }
                    return Err(InspectError::InvalidForm);
                }
                Err(err) => return Err(err.into()),
            };
            println!("✔ Formulario válido ({} fotos)", report.photos.len());

            println!("[3/3] Generando PDF...");
            let renderer = PdfRenderer::new()
                .with_max_photo_px(max_photo_px.unwrap_or(config.max_photo_px));
            let pdf = match renderer.render(&report) {
                Ok(pdf) => pdf,
                Err(err) => {
                    controller.abort_submit(err.to_string());
                    return Err(err.into());
                }
            };

            let file_name = export::artifact_file_name(&report.fields.client);
            let output_path = export::resolve_output_path(output.as_deref(), &config, &file_name);
            export::write_pdf(&output_path, &pdf)?;
            controller.complete_submit(&report, pdf);
            println!("✔ PDF generado: {}", output_path.display());

            println!("\n✅ Exportación completa");
        }

        Commands::Validate { draft: draft_path } => {
            println!("📋 inspect-report - Validación\n");

            let draft = draft::Draft::load(&draft_path)?;
            let errors = validation::validate(&draft.fields);

            if errors.is_empty() {
                println!("✔ Todos los campos obligatorios están completos");
            } else {
                println!("✘ Campos con errores:");
                for (name, message) in errors.iter() {
                    let label = validation::find_field(name).map(|s| s.label).unwrap_or(name);
                    println!("  - {}: {}", label, message);
                }
                return Err(InspectError::InvalidForm);
            }
        }

        Commands::New { output, interactive } => {
            println!("📝 inspect-report - Borrador nuevo\n");

            let mut new_draft = draft::Draft::template();
            if interactive {
                new_draft.fields = prompt::fill_fields()?;
            }

            let path = output.unwrap_or_else(|| std::path::PathBuf::from("borrador.json"));
            new_draft.save(&path)?;
            println!("✔ Borrador creado: {}", path.display());
        }

        Commands::Config { show, set_history_limit, set_output_dir } => {
            let mut config = config;
            let mut changed = false;

            if let Some(limit) = set_history_limit {
                config.history_limit = limit.max(1);
                changed = true;
            }
            if let Some(dir) = set_output_dir {
                config.output_dir = Some(dir);
                changed = true;
            }
            if changed {
                config.save()?;
                println!("✔ Configuración guardada");
            }

            if show || !changed {
                println!("Configuración:");
                println!("  Límite de historial: {}", config.history_limit);
                println!(
                    "  Carpeta de salida: {}",
                    config
                        .output_dir
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(carpeta actual)".to_string())
                );
                println!("  Tamaño máximo de foto: {}px", config.max_photo_px);
            }
        }
    }

    Ok(())
}
