pub mod pdf;
pub mod youtube;

pub use pdf::{join_pages, looks_like_pdf, read_document, DocumentParser, LopdfParser};
pub use youtube::{join_fragments, parse_video_id, TranscriptSource, VideoId, YoutubeTranscriptSource};

/// One timed unit of spoken text returned by a transcript source
#[derive(Debug, Clone, PartialEq)]
pub struct TranscriptFragment {
    /// Spoken text
    pub text: String,

    /// Start offset in seconds
    pub start: f64,

    /// Duration in seconds
    pub duration: f64,
}

impl TranscriptFragment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }
}

/// Text extracted from a single document page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    /// 1-based page number
    pub number: u32,

    /// Extractable text on the page (empty for image-only pages)
    pub text: String,
}

impl PageText {
    pub fn new(number: u32, text: impl Into<String>) -> Self {
        Self {
            number,
            text: text.into(),
        }
    }
}
