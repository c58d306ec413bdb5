//! # Progress Tracking and Statistics Module
//!
//! Questo modulo gestisce il progress tracking e il riepilogo del run.
//!
//! ## Componenti principali:
//! - `ProgressManager`: Barra di progresso `indicatif` sulle entry della directory
//! - `RunSummary`: Accumulatore (file processati, MB risparmiati, skip, errori)
//!
//! ## Visual feedback:
//! ```text
//! ⠋ [00:02:15] [=======================>----------------] 90/150 (60%) photo.jpg
//! ```
//!
//! Il risparmio è con segno: un file che cresce dopo la compressione
//! riduce il totale.

use crate::file_manager::FileManager;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Manages progress reporting over the walked entries
#[derive(Clone)]
pub struct ProgressManager {
    bar: ProgressBar,
}

impl ProgressManager {
    /// Create a new progress manager, hidden when `visible` is false
    pub fn new(total_entries: u64, visible: bool) -> Self {
        let bar = if visible {
            ProgressBar::with_draw_target(Some(total_entries), ProgressDrawTarget::stderr())
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::default_bar().template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        ) {
            bar.set_style(style.progress_chars("=>-"));
        }

        if visible {
            bar.enable_steady_tick(Duration::from_millis(100));
        }

        Self { bar }
    }

    /// Show which entry is being worked on
    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Advance by one entry
    pub fn inc(&self) {
        self.bar.inc(1);
    }

    /// Run `f` with the bar cleared so log lines don't tear it
    pub fn suspend<F: FnOnce() -> R, R>(&self, f: F) -> R {
        self.bar.suspend(f)
    }

    /// Remove the bar from the terminal
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

/// Accumulated results of a run
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub processed: usize,
    pub skipped: usize,
    pub errors: usize,
    /// Signed: negative when outputs grew
    pub saved_mb: f64,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed job, returns the MB saved by it
    pub fn add_processed(&mut self, original_size: u64, compressed_size: u64) -> f64 {
        let saved = FileManager::to_mb(original_size) - FileManager::to_mb(compressed_size);
        self.processed += 1;
        self.saved_mb += saved;
        saved
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    pub fn format_summary(&self) -> String {
        format!(
            "All done! Processed {} files, saved {:.1}MB total",
            self.processed, self.saved_mb
        )
    }
}

/// Per-file result line
pub fn format_file_line(name: &str, original_size: u64, compressed_size: u64) -> String {
    let original_mb = FileManager::to_mb(original_size);
    let compressed_mb = FileManager::to_mb(compressed_size);
    format!(
        "Compressed {}: {:.1}MB → {:.1}MB (saved {:.1}MB)",
        name,
        original_mb,
        compressed_mb,
        original_mb - compressed_mb
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn test_summary_accumulates() {
        let mut summary = RunSummary::new();
        assert_eq!(summary.add_processed(10 * MB, 4 * MB), 6.0);
        summary.add_processed(3 * MB, MB);
        summary.add_skipped();
        summary.add_error();

        assert_eq!(summary.processed, 2);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.errors, 1);
        assert_eq!(summary.saved_mb, 8.0);
        assert_eq!(
            summary.format_summary(),
            "All done! Processed 2 files, saved 8.0MB total"
        );
    }

    #[test]
    fn test_negative_savings_are_kept() {
        let mut summary = RunSummary::new();
        let saved = summary.add_processed(MB, 3 * MB);
        assert_eq!(saved, -2.0);
        assert_eq!(
            summary.format_summary(),
            "All done! Processed 1 files, saved -2.0MB total"
        );
    }

    #[test]
    fn test_empty_summary() {
        assert_eq!(
            RunSummary::new().format_summary(),
            "All done! Processed 0 files, saved 0.0MB total"
        );
    }

    #[test]
    fn test_format_file_line() {
        assert_eq!(
            format_file_line("photo.png", 5 * MB, MB + MB / 2),
            "Compressed photo.png: 5.0MB → 1.5MB (saved 3.5MB)"
        );
    }

    #[test]
    fn test_hidden_progress() {
        let progress = ProgressManager::new(3, false);
        progress.set_message("a.png");
        progress.inc();
        progress.inc();
        assert_eq!(progress.suspend(|| 7), 7);
        progress.finish();
    }
}
