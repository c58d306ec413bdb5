//! # Path Resolution Module
//!
//! Centralizza tutta la logica di calcolo dei path di output.
//! Il path di destinazione rispecchia il path relativo alla radice di input,
//! ri-radicato sotto la directory di output, con l'estensione riscritta.

use crate::{config::Config, file_manager::MediaKind};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Utility per calcolare i path di output in modo centralizzato
pub struct PathResolver;

impl PathResolver {
    /// Calcola il path di output per un file dato
    pub fn get_output_path(input_path: &Path, kind: MediaKind, config: &Config) -> Result<PathBuf> {
        let relative_path = input_path.strip_prefix(&config.input_dir).map_err(|_| {
            anyhow::anyhow!(
                "{} is not inside input directory {}",
                input_path.display(),
                config.input_dir.display()
            )
        })?;

        let result = config
            .output_dir
            .join(relative_path)
            .with_extension(Self::get_output_extension(kind, config));
        debug!("Resolved output path: {} -> {}", input_path.display(), result.display());

        Ok(result)
    }

    /// Determina l'estensione di output basata sul tipo file e config
    pub fn get_output_extension(kind: MediaKind, config: &Config) -> &'static str {
        match kind {
            MediaKind::Image => config.image_extension(),
            MediaKind::Video => "mp4",
        }
    }
}
