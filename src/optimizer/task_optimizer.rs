//! # Task Optimizer Module
//!
//! Dispatcher per una singola entry della directory di input.
//! Classifica il file, calcola la destinazione, applica la regola di skip
//! e invoca il processore immagine o video.

use crate::{
    config::Config,
    file_manager::{FileManager, MediaKind},
    image_processor::ImageProcessor,
    optimizer::path_resolver::PathResolver,
    video_processor::VideoProcessor,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A completed conversion
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub kind: MediaKind,
    pub original_size: u64,
    pub compressed_size: u64,
}

impl ConversionJob {
    /// File name of the source, used in log lines
    pub fn name(&self) -> String {
        self.source
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .into_owned()
    }
}

/// Why an entry produced no output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    Directory,
    Unsupported,
    AlreadyExists(PathBuf),
}

/// Result of dispatching one entry
#[derive(Debug, Clone, PartialEq)]
pub enum JobOutcome {
    Converted(ConversionJob),
    Skipped(SkipReason),
}

/// Worker per elaborazione singoli file
pub struct TaskOptimizer {
    config: Config,
    image_processor: ImageProcessor,
    video_processor: VideoProcessor,
}

impl TaskOptimizer {
    pub fn new(config: Config) -> Self {
        let image_processor = ImageProcessor::new(&config);
        let video_processor = VideoProcessor::new(&config);

        Self {
            config,
            image_processor,
            video_processor,
        }
    }

    /// Calcola path di output atteso (delegato a PathResolver)
    pub fn get_expected_output_path(&self, input_path: &Path, kind: MediaKind) -> Result<PathBuf> {
        PathResolver::get_output_path(input_path, kind, &self.config)
    }

    /// Processa una singola entry
    pub async fn process_entry(&self, path: &Path) -> Result<JobOutcome> {
        if path.is_dir() {
            return Ok(JobOutcome::Skipped(SkipReason::Directory));
        }

        let Some(kind) = MediaKind::classify(path) else {
            debug!("Skipping unsupported file: {}", path.display());
            return Ok(JobOutcome::Skipped(SkipReason::Unsupported));
        };

        let destination = self.get_expected_output_path(path, kind)?;
        if destination.exists() && !self.config.force {
            debug!("Skipping existing file: {}", destination.display());
            return Ok(JobOutcome::Skipped(SkipReason::AlreadyExists(destination)));
        }

        let original_size = FileManager::get_file_size(path).await?;

        let written = match kind {
            MediaKind::Image => self.image_processor.compress(path, &destination).await?,
            MediaKind::Video => self.video_processor.compress(path, &destination).await?,
        };

        let compressed_size = FileManager::get_file_size(&written).await?;

        Ok(JobOutcome::Converted(ConversionJob {
            source: path.to_path_buf(),
            destination: written,
            kind,
            original_size,
            compressed_size,
        }))
    }
}
