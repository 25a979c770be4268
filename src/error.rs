use crate::mailer::SendFailure;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplaintError {
    #[error("Chyba konfigurace: {0}")]
    Config(String),

    #[error("E-mail se neodeslal – chybí konfigurace EmailJS ({}).", .missing.join(", "))]
    ConfigurationMissing {
        missing: Vec<&'static str>,
        /// Where the rendered PDF was kept for manual follow-up
        recovery_path: Option<PathBuf>,
    },

    #[error("Odesílání již probíhá, počkejte na dokončení")]
    SubmissionInFlight,

    #[error("Soubor nenalezen: {0}")]
    FileNotFound(String),

    #[error("Složka nenalezena: {0}")]
    FolderNotFound(String),

    #[error("Nepodporovaný formát fotografie: {0}")]
    UnsupportedPhoto(String),

    #[error("Chyba generování PDF: {0}")]
    PdfGeneration(String),

    #[error("Chyba kódování přílohy: {0}")]
    Encoding(String),

    #[error("Chyba při odesílání: {0}")]
    Send(#[from] SendFailure),

    #[error("Chyba vstupu: {0}")]
    Prompt(String),

    #[error("Chyba JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO chyba: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] complaint_form_common::Error),
}

impl ComplaintError {
    /// Text shown to the user when a submission ends with this error
    pub fn user_notice(&self) -> String {
        match self {
            ComplaintError::ConfigurationMissing { .. } => {
                "E-mail se neodeslal – chybí konfigurace EmailJS.".to_string()
            }
            ComplaintError::Send(failure) => format!("Chyba při odesílání: {}", failure.text),
            other => format!("Chyba při odesílání: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, ComplaintError>;
