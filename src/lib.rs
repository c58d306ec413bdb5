//! # Web Media Compressor Library
//!
//! Questo è il modulo principale della libreria che espone tutte le API pubbliche.
//!
//! ## Architettura dei moduli:
//! - `config`: Configurazione del run e validazione parametri
//! - `error`: Tipi di errore custom
//! - `file_manager`: Attraversamento directory e classificazione file
//! - `image_processor`: Compressione immagini (WebP/JPEG)
//! - `video_processor`: Compressione video (MP4 via ffmpeg)
//! - `optimizer`: Orchestratore del run e dispatcher per file
//! - `progress`: Progress bar e riepilogo finale
//! - `json_output`: Eventi JSON-lines per uso programmatico
//!
//! ## Utilizzo:
//! ```rust,no_run
//! use web_media_compressor::{Config, MediaOptimizer};
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let config = Config::new("./src/assets", "./src/assets/optimized");
//! let summary = MediaOptimizer::new(config)?.run().await?;
//! println!("{}", summary.format_summary());
//! # Ok(())
//! # }
//! ```

pub mod utils;
pub mod config;
pub mod error;
pub mod file_manager;
pub mod image_processor;
pub mod video_processor;
pub mod platform;
pub mod progress;
pub mod json_output;
pub mod optimizer;

pub use config::{Config, VideoPreset};
pub use error::CompressError;
pub use file_manager::MediaKind;
pub use optimizer::MediaOptimizer;
pub use progress::RunSummary;
