//! # Media Optimizer Main Orchestrator
//!
//! Orchestratore principale: valida la radice di input, crea la directory di
//! output, attraversa l'albero e delega ogni entry al `TaskOptimizer`,
//! un file alla volta, accumulando il `RunSummary`.
//!
//! Un errore su un singolo file viene loggato e conteggiato, mai propagato:
//! solo una radice di input mancante interrompe il run.

use crate::{
    config::Config,
    error::CompressError,
    file_manager::{FileManager, MediaKind},
    json_output::JsonMessage,
    optimizer::task_optimizer::{JobOutcome, SkipReason, TaskOptimizer},
    progress::{format_file_line, ProgressManager, RunSummary},
    video_processor::VideoProcessor,
};
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};

/// Orchestrates a whole compression run
pub struct MediaOptimizer {
    config: Config,
    task_optimizer: TaskOptimizer,
}

impl MediaOptimizer {
    /// Create a new optimizer instance
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let task_optimizer = TaskOptimizer::new(config.clone());

        Ok(Self {
            config,
            task_optimizer,
        })
    }

    /// Run the compression process
    pub async fn run(&self) -> Result<RunSummary> {
        let input_dir = &self.config.input_dir;
        let output_dir = &self.config.output_dir;

        if !input_dir.exists() {
            return Err(CompressError::InputNotFound(input_dir.clone()).into());
        }

        tokio::fs::create_dir_all(output_dir).await?;

        info!("Compressing media from {} into {}", input_dir.display(), output_dir.display());
        if self.config.to_webp {
            info!("Images: WebP (quality: {}, max dimension: {})", self.config.img_quality, self.config.max_img_dim);
        } else {
            info!("Images: JPEG (quality: {}, max dimension: {})", self.config.img_quality, self.config.max_img_dim);
        }
        info!(
            "Videos: MP4 (CRF: {}, preset: {}, max width: {})",
            self.config.video_crf, self.config.video_preset, self.config.max_video_dim
        );
        if self.config.force {
            info!("Overwrite mode: existing outputs will be replaced");
        }

        let entries: Vec<_> = FileManager::walk(input_dir, self.nested_output_dir())?.collect();
        debug!("Found {} entries under {}", entries.len(), input_dir.display());

        self.warn_if_ffmpeg_missing(&entries).await;

        if self.config.json_output {
            JsonMessage::Start {
                total_entries: entries.len(),
                config: &self.config,
            }
            .emit();
        }

        let progress = ProgressManager::new(entries.len() as u64, self.config.show_progress);
        let mut summary = RunSummary::new();

        for entry in entries {
            match entry {
                Ok(entry) => self.process_one(entry.path(), &progress, &mut summary).await,
                Err(e) => progress.suspend(|| warn!("Skipping unreadable entry: {}", e)),
            }
            progress.inc();
        }

        progress.finish();
        info!("{}", summary.format_summary());

        if self.config.json_output {
            JsonMessage::Complete { summary: &summary }.emit();
        }

        Ok(summary)
    }

    /// Dispatch one entry; failures are logged and counted, never returned
    async fn process_one(&self, path: &Path, progress: &ProgressManager, summary: &mut RunSummary) {
        progress.set_message(&path.file_name().unwrap_or_default().to_string_lossy());

        match self.task_optimizer.process_entry(path).await {
            Ok(JobOutcome::Converted(job)) => {
                summary.add_processed(job.original_size, job.compressed_size);
                progress.suspend(|| {
                    info!("{}", format_file_line(&job.name(), job.original_size, job.compressed_size))
                });

                if self.config.json_output {
                    JsonMessage::FileComplete {
                        source: job.source,
                        destination: job.destination,
                        kind: job.kind,
                        original_size: job.original_size,
                        compressed_size: job.compressed_size,
                    }
                    .emit();
                }
            }
            Ok(JobOutcome::Skipped(SkipReason::Directory)) => {}
            Ok(JobOutcome::Skipped(_)) => summary.add_skipped(),
            Err(e) => {
                summary.add_error();
                progress.suspend(|| error!("Failed to process {}: {:#}", path.display(), e));

                if self.config.json_output {
                    JsonMessage::FileError {
                        source: path.to_path_buf(),
                        error: format!("{:#}", e),
                    }
                    .emit();
                }
            }
        }
    }

    /// The output directory as the walker will see it, when it lives inside the
    /// input root. Excluding it keeps a rerun from recompressing earlier outputs.
    fn nested_output_dir(&self) -> Option<PathBuf> {
        let input = self.config.input_dir.canonicalize().ok()?;
        let output = self.config.output_dir.canonicalize().ok()?;
        let relative = output.strip_prefix(&input).ok()?;

        if relative.as_os_str().is_empty() {
            return None;
        }
        Some(self.config.input_dir.join(relative))
    }

    async fn warn_if_ffmpeg_missing(&self, entries: &[walkdir::Result<walkdir::DirEntry>]) {
        let has_video = entries
            .iter()
            .flatten()
            .any(|e| MediaKind::classify(e.path()) == Some(MediaKind::Video));

        if has_video && !VideoProcessor::check_dependencies().await {
            warn!("ffmpeg was not found in PATH, video files will fail");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::DynamicImage;
    use tempfile::TempDir;

    fn config(temp: &TempDir) -> Config {
        Config {
            show_progress: false,
            ..Config::new(temp.path().join("in"), temp.path().join("out"))
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let temp = TempDir::new().unwrap();
        let bad = Config {
            img_quality: 0,
            ..config(&temp)
        };
        assert!(MediaOptimizer::new(bad).is_err());
    }

    #[tokio::test]
    async fn test_missing_input_aborts_without_output() {
        let temp = TempDir::new().unwrap();
        let optimizer = MediaOptimizer::new(config(&temp)).unwrap();

        let err = optimizer.run().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CompressError>(),
            Some(CompressError::InputNotFound(_))
        ));
        assert!(!temp.path().join("out").exists());
    }

    #[tokio::test]
    async fn test_failures_do_not_stop_the_run() {
        let temp = TempDir::new().unwrap();
        let config = config(&temp);
        std::fs::create_dir_all(&config.input_dir).unwrap();
        std::fs::write(config.input_dir.join("a_broken.png"), b"garbage").unwrap();
        DynamicImage::new_rgb8(20, 20)
            .save(config.input_dir.join("b_good.png"))
            .unwrap();

        let summary = MediaOptimizer::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(summary.processed, 1);
        assert_eq!(summary.errors, 1);
        assert!(config.output_dir.join("b_good.jpg").exists());
        assert!(!config.output_dir.join("a_broken.jpg").exists());
    }

    #[tokio::test]
    async fn test_nested_output_dir_is_not_walked() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("assets");
        std::fs::create_dir_all(&input).unwrap();
        DynamicImage::new_rgb8(20, 20).save(input.join("pic.png")).unwrap();

        let config = Config {
            show_progress: false,
            ..Config::new(&input, input.join("optimized"))
        };

        let first = MediaOptimizer::new(config.clone()).unwrap().run().await.unwrap();
        assert_eq!(first.processed, 1);

        let second = MediaOptimizer::new(config).unwrap().run().await.unwrap();
        assert_eq!(second.processed, 0);
        assert_eq!(second.skipped, 1);
        assert!(!input.join("optimized/optimized").exists());
    }
}
