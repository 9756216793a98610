use thiserror::Error;

#[derive(Error, Debug)]
pub enum InspectError {
    #[error("Error de configuración: {0}")]
    Config(String),

    #[error("Archivo no encontrado: {0}")]
    FileNotFound(String),

    #[error("Carpeta no encontrada: {0}")]
    FolderNotFound(String),

    #[error("No se encontraron imágenes en: {0}")]
    NoImagesFound(String),

    #[error("Error al cargar la imagen: {0}")]
    ImageLoad(String),

    #[error("El borrador no tiene imagen ni ruta en la foto {0}")]
    EmptyDraftPhoto(usize),

    #[error("Formulario inválido")]
    InvalidForm,

    #[error("Error de entrada interactiva: {0}")]
    Prompt(String),

    #[error("Error del formulario: {0}")]
    Form(#[from] inspect_report_common::Error),

    #[error("Error de análisis JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Error de E/S: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, InspectError>;
