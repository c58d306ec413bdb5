//! # Web Media Compressor - Main Entry Point
//!
//! Questo è il punto di ingresso principale dell'applicazione.
//!
//! ## Responsabilità:
//! - Parsing degli argomenti della command line con `clap`
//! - Inizializzazione del sistema di logging con `tracing`
//! - Creazione della configurazione e avvio dell'optimizer
//!
//! ## Flusso di esecuzione:
//! 1. Parsa gli argomenti CLI
//! 2. Configura il logging (`RUST_LOG`, altrimenti INFO o DEBUG con `--verbose`)
//! 3. Crea un oggetto Config con tutti i parametri
//! 4. Avvia MediaOptimizer; se la directory di input non esiste logga l'errore ed esce
//!
//! ## Esempio di utilizzo:
//! ```bash
//! compress-media -i ./src/assets -o ./src/assets/optimized --to-webp --max-img-dim 2048
//! ```

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::error;
use tracing_subscriber::EnvFilter;

use web_media_compressor::{CompressError, Config, MediaOptimizer, RunSummary, VideoPreset};

#[derive(Parser)]
#[command(name = "compress-media")]
#[command(about = "Compress images and videos for web with optimized quality.")]
struct Args {
    /// Source folder of raw media
    #[arg(short, long)]
    input_dir: PathBuf,

    /// Destination folder for compressed media
    #[arg(short, long)]
    output_dir: PathBuf,

    /// Image quality (1-100)
    #[arg(long, default_value = "85")]
    img_quality: u8,

    /// Max width/height for images
    #[arg(long, default_value = "2048")]
    max_img_dim: u32,

    /// Convert images to WebP (better compression)
    #[arg(long)]
    to_webp: bool,

    /// FFmpeg CRF for video (18-28, lower = better)
    #[arg(long, default_value = "20")]
    video_crf: u8,

    /// Max width for videos
    #[arg(long, default_value = "1920")]
    max_video_dim: u32,

    /// FFmpeg preset
    #[arg(long, value_enum, default_value_t = VideoPreset::Slow)]
    video_preset: VideoPreset,

    /// Overwrite existing files
    #[arg(long)]
    force: bool,

    /// Emit JSON-lines events on stdout
    #[arg(long)]
    json: bool,

    /// Disable the progress bar
    #[arg(long)]
    no_progress: bool,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let default_level = if args.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let config = Config {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        img_quality: args.img_quality,
        max_img_dim: args.max_img_dim,
        to_webp: args.to_webp,
        video_crf: args.video_crf,
        max_video_dim: args.max_video_dim,
        video_preset: args.video_preset,
        force: args.force,
        json_output: args.json,
        show_progress: !args.no_progress,
    };

    let optimizer = MediaOptimizer::new(config)?;
    exit_result(optimizer.run().await)
}

/// Map a run result to the process result. A missing input root is
/// reported but does not fail the exit status.
fn exit_result(result: Result<RunSummary>) -> Result<()> {
    match result {
        Ok(_) => Ok(()),
        Err(e) => match e.downcast_ref::<CompressError>() {
            Some(CompressError::InputNotFound(_)) => {
                error!("{}", e);
                Ok(())
            }
            _ => Err(e),
        },
    }
}
