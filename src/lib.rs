//! Gemini Notes - A Rust CLI tool for turning source material into model-written text
//!
//! This library provides two pipelines: one summarizes the transcript of a YouTube video,
//! the other answers a question about a PDF document. Both forward text to the Google
//! Gemini API and hand back whatever the model produced.

pub mod cli;
pub mod config;
pub mod extractors;
pub mod generate;
pub mod output;
pub mod pipeline;
pub mod utils;

pub use cli::{Cli, Commands, OutputFormat};
pub use config::Config;
pub use extractors::{DocumentParser, TranscriptSource, VideoId};
pub use generate::{GeminiClient, TextGenerator};
pub use pipeline::{GenerationKind, GenerationResult, QuestionPipeline, SummaryPipeline};

/// Result type used throughout the library
pub type Result<T> = anyhow::Result<T>;

/// Error types specific to gemini-notes
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum NotesError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Extraction failed: {0}")]
    ExtractionFailed(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl NotesError {
    /// Find the `NotesError` carried by an `anyhow::Error`, if any
    pub fn kind_of(err: &anyhow::Error) -> Option<&NotesError> {
        err.chain().find_map(|cause| cause.downcast_ref::<NotesError>())
    }
}
