use serde::{Deserialize, Serialize};

use crate::extractors::{
    join_fragments, join_pages, looks_like_pdf, parse_video_id, DocumentParser, TranscriptSource,
    VideoId,
};
use crate::generate::prompt::{question_prompt, summary_prompt};
use crate::generate::TextGenerator;
use crate::{NotesError, Result};

/// What a generation was asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationKind {
    Summary,
    Answer,
}

impl GenerationKind {
    /// Heading used when rendering as markdown
    pub fn heading(&self) -> &'static str {
        match self {
            GenerationKind::Summary => "Detailed Notes:",
            GenerationKind::Answer => "Answer:",
        }
    }
}

/// Model output with metadata about the request that produced it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResult {
    /// Kind of output
    pub kind: GenerationKind,

    /// Video URL or document name the text came from
    pub source: String,

    /// Model that produced the text
    pub model: String,

    /// Length of the assembled prompt in bytes
    pub prompt_chars: usize,

    /// The generated text
    pub text: String,

    /// Timestamp when generation completed
    pub completed_at: chrono::DateTime<chrono::Utc>,
}

/// Resolve the video ID for a URL and fetch its joined transcript
pub async fn fetch_transcript<S>(source: &S, url: &str) -> Result<(VideoId, String)>
where
    S: TranscriptSource + ?Sized,
{
    let video_id = parse_video_id(url).ok_or_else(|| {
        NotesError::InvalidInput(
            "Invalid YouTube URL. Please enter a valid YouTube video URL.".to_string(),
        )
    })?;

    tracing::info!("Fetching transcript for {} from {}", video_id, source.source_name());
    let fragments = source.fetch(&video_id).await?;
    let transcript = join_fragments(&fragments);
    tracing::debug!(
        "Joined {} fragments into {} characters",
        fragments.len(),
        transcript.len()
    );

    Ok((video_id, transcript))
}

/// Parse a document and return the text of every page, newline-terminated
pub fn extract_document_text<P>(parser: &P, bytes: &[u8]) -> Result<String>
where
    P: DocumentParser + ?Sized,
{
    if !looks_like_pdf(bytes) {
        return Err(NotesError::InvalidInput("Uploaded file is not a PDF document".to_string()).into());
    }

    let pages = parser.parse(bytes)?;
    let text = join_pages(&pages);
    tracing::info!(
        "Extracted {} characters from {} pages using {}",
        text.len(),
        pages.len(),
        parser.parser_name()
    );

    Ok(text)
}

/// Video URL to summary
pub struct SummaryPipeline<S, G> {
    source: S,
    generator: G,
}

impl<S: TranscriptSource, G: TextGenerator> SummaryPipeline<S, G> {
    pub fn new(source: S, generator: G) -> Self {
        Self { source, generator }
    }

    /// Summarize the video behind a URL
    pub async fn summarize(&self, url: &str) -> Result<GenerationResult> {
        let (video_id, transcript) = fetch_transcript(&self.source, url).await?;

        if transcript.is_empty() {
            return Err(NotesError::ExtractionFailed(format!(
                "Could not retrieve transcript for video {}. Please check the video or try another.",
                video_id
            ))
            .into());
        }

        let prompt = summary_prompt(&transcript);
        tracing::info!("Generating summary with {}", self.generator.model_name());
        let text = self.generator.generate(&prompt).await?;

        Ok(GenerationResult {
            kind: GenerationKind::Summary,
            source: url.to_string(),
            model: self.generator.model_name(),
            prompt_chars: prompt.len(),
            text,
            completed_at: chrono::Utc::now(),
        })
    }
}

/// PDF document plus question to answer
pub struct QuestionPipeline<P, G> {
    parser: P,
    generator: G,
}

impl<P: DocumentParser, G: TextGenerator> QuestionPipeline<P, G> {
    pub fn new(parser: P, generator: G) -> Self {
        Self { parser, generator }
    }

    /// Answer a question about a document
    pub async fn ask(&self, name: &str, bytes: &[u8], question: &str) -> Result<GenerationResult> {
        if question.is_empty() {
            return Err(NotesError::InvalidInput("Question must not be empty".to_string()).into());
        }

        let pdf_text = extract_document_text(&self.parser, bytes)?;

        let prompt = question_prompt(&pdf_text, question);
        tracing::info!("Generating answer with {}", self.generator.model_name());
        let text = self.generator.generate(&prompt).await?;

        Ok(GenerationResult {
            kind: GenerationKind::Answer,
            source: name.to_string(),
            model: self.generator.model_name(),
            prompt_chars: prompt.len(),
            text,
            completed_at: chrono::Utc::now(),
        })
    }
}
