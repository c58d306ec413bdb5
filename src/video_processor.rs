//! # Video Processing Module
//!
//! Questo modulo gestisce la compressione video tramite ffmpeg.
//!
//! ## Pipeline di compressione:
//! - Codec video: libx264 con preset e CRF configurabili
//! - Scala la larghezza a `max_video_dim` se più grande (altezza proporzionale, pari)
//! - Codec audio: AAC a 192k
//! - Pixel format `yuv420p` per massima compatibilità
//! - `+faststart` per riproduzione progressiva nel browser
//! - `-y`: ffmpeg sovrascrive sempre la destinazione (il controllo `--force`
//!   avviene prima dell'invocazione)
//!
//! stdout e stderr di ffmpeg vengono scartati; un exit status diverso da zero
//! diventa `CompressError::Transcoder`.
//!
//! ## Controllo qualità (CRF):
//! - 0-17: Visualmente lossless (file grandi)
//! - 18-23: Alta qualità (default 20)
//! - 24-28: Buona qualità
//! - 29+: File piccoli, qualità in calo

use crate::args;
use crate::config::{Config, VideoPreset};
use crate::error::CompressError;
use crate::platform::PlatformCommands;
use anyhow::Result;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

const AUDIO_BITRATE: &str = "192k";

/// Handles video compression
pub struct VideoProcessor {
    crf: u8,
    max_dim: u32,
    preset: VideoPreset,
}

impl VideoProcessor {
    pub fn new(config: &Config) -> Self {
        Self {
            crf: config.video_crf,
            max_dim: config.max_video_dim,
            preset: config.video_preset,
        }
    }

    /// Scale filter capping the width, height follows rounded to an even number
    pub fn scale_filter(&self) -> String {
        format!("scale='min({},iw)':-2", self.max_dim)
    }

    /// Encoding options placed between the input and the output path
    pub fn build_args(&self) -> Vec<String> {
        args![
            "-vf", self.scale_filter(),
            "-c:v", "libx264",
            "-preset", self.preset,
            "-crf", self.crf,
            "-c:a", "aac",
            "-b:a", AUDIO_BITRATE,
            "-movflags", "+faststart",
            "-pix_fmt", "yuv420p",
            "-y",
        ]
    }

    /// Compress a video into `output_path` (extension forced to `.mp4`) and
    /// return the path actually written
    pub async fn compress(&self, input_path: &Path, output_path: &Path) -> Result<PathBuf> {
        let final_output_path = output_path.with_extension("mp4");

        if let Some(parent) = final_output_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        debug!(
            "Compressing video: {} (CRF: {}, preset: {}, max width: {})",
            input_path.display(),
            self.crf,
            self.preset,
            self.max_dim
        );

        let ffmpeg_cmd = PlatformCommands::instance().get_command("ffmpeg");
        let status = Command::new(ffmpeg_cmd)
            .arg("-i")
            .arg(input_path)
            .args(self.build_args())
            .arg(&final_output_path)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .map_err(|source| CompressError::TranscoderSpawn {
                command: ffmpeg_cmd.to_string(),
                source,
            })?;

        if !status.success() {
            debug!("ffmpeg exited with {} for {}", status, input_path.display());
            return Err(CompressError::Transcoder {
                path: input_path.to_path_buf(),
                status,
            }
            .into());
        }

        Ok(final_output_path)
    }

    /// Check if ffmpeg is reachable
    pub async fn check_dependencies() -> bool {
        PlatformCommands::instance()
            .is_command_available("ffmpeg")
            .await
    }
}
