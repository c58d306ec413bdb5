//! # Optimizer Module
//!
//! Modulo che separa le responsabilità in sottomoduli:
//! - `media_optimizer`: Orchestratore principale del run
//! - `task_optimizer`: Dispatcher per singole entry
//! - `path_resolver`: Logica di calcolo path centralizzata

pub mod media_optimizer;
pub mod task_optimizer;
pub mod path_resolver;

pub use media_optimizer::MediaOptimizer;
pub use task_optimizer::{ConversionJob, JobOutcome, SkipReason, TaskOptimizer};
pub use path_resolver::PathResolver;
