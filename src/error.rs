//! Structured errors for conditions the pipeline distinguishes.
//!
//! Most failures travel as plain `anyhow` errors with context; these variants
//! exist for the cases callers branch on: configuration problems that must
//! abort before any file is touched, and a generation service that returned
//! nothing for a mandatory stage.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("no worker available for framework `{framework}` with builder `{builder}`")]
    NoWorker { framework: String, builder: String },

    #[error("at least one target locale is required")]
    NoLocales,

    #[error("generation service returned no content for the {stage} stage")]
    EmptyGeneration { stage: &'static str },
}
