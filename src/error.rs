//! # Error Types Module
//!
//! Questo modulo definisce tutti i tipi di errore custom dell'applicazione.
//!
//! ## Categorie di errori:
//! - `InputNotFound`: La directory di input non esiste (errore fatale, run abortito)
//! - `Io` / `WalkDir`: Errori di I/O e di attraversamento directory
//! - `Image`: Errori di decodifica immagini
//! - `Encode`: Errori degli encoder JPEG/WebP
//! - `Transcoder` / `TranscoderSpawn`: ffmpeg terminato con errore o non avviabile
//! - `Validation`: Parametri di configurazione non validi
//!
//! Tutti gli errori per singolo file vengono catturati dall'orchestratore:
//! solo `InputNotFound` interrompe l'intero run.

use std::path::PathBuf;
use std::process::ExitStatus;

/// Custom error types for media compression
#[derive(thiserror::Error, Debug)]
pub enum CompressError {
    #[error("Input directory does not exist: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    WalkDir(#[from] walkdir::Error),

    #[error("Image processing error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Encoding error: {0}")]
    Encode(String),

    #[error("FFmpeg failed for {}: {status}", path.display())]
    Transcoder { path: PathBuf, status: ExitStatus },

    #[error("Failed to execute {command}: {source}")]
    TranscoderSpawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Validation(String),
}
