//! # JSON Output Module
//!
//! Output strutturato in JSON-lines su stdout per l'uso programmatico (`--json`).
//!
//! ## Tipi di messaggi:
//! - `start`: Inizio del run con la configurazione effettiva
//! - `file_complete`: File compresso con dimensioni prima/dopo
//! - `file_error`: Errore su un singolo file (il run continua)
//! - `complete`: Fine del run con il riepilogo finale

use crate::config::Config;
use crate::file_manager::MediaKind;
use crate::progress::RunSummary;
use serde::Serialize;
use std::path::PathBuf;

/// Tipo di messaggio JSON
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonMessage<'a> {
    /// Inizio del run
    Start {
        total_entries: usize,
        config: &'a Config,
    },

    /// Fine elaborazione di un file
    FileComplete {
        source: PathBuf,
        destination: PathBuf,
        kind: MediaKind,
        original_size: u64,
        compressed_size: u64,
    },

    /// Errore su un singolo file
    FileError { source: PathBuf, error: String },

    /// Run completato
    Complete {
        #[serde(flatten)]
        summary: &'a RunSummary,
    },
}

impl JsonMessage<'_> {
    /// Emette il messaggio JSON su stdout
    pub fn emit(&self) {
        if let Ok(json) = serde_json::to_string(self) {
            println!("{}", json);
        }
    }
}
