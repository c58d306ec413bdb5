//! # Configuration Management Module
//!
//! Questo modulo gestisce la configurazione del run.
//!
//! ## Responsabilità:
//! - Definisce la struct `Config` con tutti i parametri di compressione
//! - Fornisce valori di default identici a quelli della command line
//! - Valida i parametri prima dell'avvio del run
//!
//! ## Parametri di configurazione:
//! - `input_dir` / `output_dir`: Radice sorgente e radice di destinazione
//! - `img_quality`: Qualità immagini (1-100, default: 85)
//! - `max_img_dim`: Lato massimo immagini in pixel (default: 2048)
//! - `to_webp`: Output WebP invece di JPEG (default: false)
//! - `video_crf`: CRF video (0-51, default: 20, più basso = migliore qualità)
//! - `max_video_dim`: Larghezza massima video (default: 1920)
//! - `video_preset`: Preset x264 (default: slow)
//! - `force`: Sovrascrive output esistenti (default: false)
//!
//! La configurazione viene creata una sola volta in `main` e non viene più modificata.
//!
//! ## Esempio:
//! ```rust
//! use web_media_compressor::Config;
//!
//! let config = Config {
//!     to_webp: true,
//!     max_img_dim: 400,
//!     ..Config::new("./assets", "./assets/optimized")
//! };
//! assert!(config.validate().is_ok());
//! ```

use crate::error::CompressError;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// x264 speed/efficiency preset passed to ffmpeg
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum VideoPreset {
    Ultrafast,
    Superfast,
    Veryfast,
    Faster,
    Fast,
    Medium,
    #[default]
    Slow,
    Slower,
    Veryslow,
}

impl VideoPreset {
    pub fn as_str(&self) -> &'static str {
        match self {
            VideoPreset::Ultrafast => "ultrafast",
            VideoPreset::Superfast => "superfast",
            VideoPreset::Veryfast => "veryfast",
            VideoPreset::Faster => "faster",
            VideoPreset::Fast => "fast",
            VideoPreset::Medium => "medium",
            VideoPreset::Slow => "slow",
            VideoPreset::Slower => "slower",
            VideoPreset::Veryslow => "veryslow",
        }
    }
}

impl fmt::Display for VideoPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configuration for a compression run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Source folder of raw media
    pub input_dir: PathBuf,
    /// Destination folder for compressed media
    pub output_dir: PathBuf,
    /// Image quality (1-100)
    pub img_quality: u8,
    /// Max width/height for images
    pub max_img_dim: u32,
    /// Write WebP instead of JPEG
    pub to_webp: bool,
    /// Video CRF value (0-51, lower = better quality)
    pub video_crf: u8,
    /// Max width for videos
    pub max_video_dim: u32,
    /// x264 preset
    pub video_preset: VideoPreset,
    /// Overwrite outputs that already exist
    pub force: bool,
    /// Emit JSON-lines events on stdout
    pub json_output: bool,
    /// Draw a progress bar on stderr
    pub show_progress: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::new(),
            output_dir: PathBuf::new(),
            img_quality: 85,
            max_img_dim: 2048,
            to_webp: false,
            video_crf: 20,
            max_video_dim: 1920,
            video_preset: VideoPreset::default(),
            force: false,
            json_output: false,
            show_progress: true,
        }
    }
}

impl Config {
    /// Default configuration for the given input and output roots
    pub fn new(input_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            input_dir: input_dir.into(),
            output_dir: output_dir.into(),
            ..Default::default()
        }
    }

    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), CompressError> {
        if self.img_quality == 0 || self.img_quality > 100 {
            return Err(CompressError::Validation(
                "Image quality must be between 1 and 100".to_string(),
            ));
        }

        if self.max_img_dim == 0 {
            return Err(CompressError::Validation(
                "Max image dimension must be greater than 0".to_string(),
            ));
        }

        if self.video_crf > 51 {
            return Err(CompressError::Validation(
                "Video CRF must be between 0 and 51".to_string(),
            ));
        }

        if self.max_video_dim == 0 {
            return Err(CompressError::Validation(
                "Max video dimension must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Extension written for image jobs
    pub fn image_extension(&self) -> &'static str {
        crate::image_processor::output_extension(self.to_webp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_validation() {
        let mut config = Config::new("in", "out");
        assert!(config.validate().is_ok());

        config.img_quality = 0;
        assert!(config.validate().is_err());

        config.img_quality = 101;
        assert!(config.validate().is_err());

        config.img_quality = 85;
        config.video_crf = 52;
        assert!(config.validate().is_err());

        config.video_crf = 20;
        config.max_img_dim = 0;
        assert!(config.validate().is_err());

        config.max_img_dim = 2048;
        config.max_video_dim = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.img_quality, 85);
        assert_eq!(config.max_img_dim, 2048);
        assert!(!config.to_webp);
        assert_eq!(config.video_crf, 20);
        assert_eq!(config.max_video_dim, 1920);
        assert_eq!(config.video_preset, VideoPreset::Slow);
        assert!(!config.force);
    }

    #[test]
    fn test_image_extension() {
        let mut config = Config::default();
        assert_eq!(config.image_extension(), "jpg");
        config.to_webp = true;
        assert_eq!(config.image_extension(), "webp");
    }

    #[test]
    fn test_preset_names() {
        let names: Vec<&str> = VideoPreset::value_variants()
            .iter()
            .map(|p| p.as_str())
            .collect();
        assert_eq!(
            names,
            vec![
                "ultrafast", "superfast", "veryfast", "faster", "fast", "medium", "slow",
                "slower", "veryslow"
            ]
        );
    }

    #[test]
    fn test_config_serde() {
        let config = Config {
            video_preset: VideoPreset::Veryfast,
            ..Config::new("in", "out")
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"video_preset\":\"veryfast\""));

        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.video_preset, VideoPreset::Veryfast);
        assert_eq!(parsed.input_dir, PathBuf::from("in"));
    }
}
