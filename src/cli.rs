use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "inspect-report")]
#[command(about = "Generador de informes de inspección con registro fotográfico", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Salida detallada
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generar el PDF de un borrador
    Export {
        /// Borrador JSON del informe
        #[arg(required = true)]
        draft: PathBuf,

        /// Archivo o carpeta de salida (carpeta configurada por defecto)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Carpeta de fotos para adjuntar además de las del borrador
        #[arg(short, long)]
        photos: Option<PathBuf>,

        /// Tamaño máximo de foto en píxeles antes de incrustar
        #[arg(long)]
        max_photo_px: Option<u32>,
    },

    /// Validar los campos de un borrador
    Validate {
        /// Borrador JSON del informe
        #[arg(required = true)]
        draft: PathBuf,
    },

    /// Crear un borrador nuevo
    New {
        /// Archivo de salida (borrador.json por defecto)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rellenar los campos de forma interactiva
        #[arg(short, long)]
        interactive: bool,
    },

    /// Mostrar o editar la configuración
    Config {
        /// Mostrar la configuración
        #[arg(long)]
        show: bool,

        /// Límite de informes retenidos en el historial
        #[arg(long)]
        set_history_limit: Option<usize>,

        /// Carpeta de salida por defecto
        #[arg(long)]
        set_output_dir: Option<PathBuf>,
    },
}
