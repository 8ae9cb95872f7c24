use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use std::fmt;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use super::TranscriptFragment;
use crate::config::TranscriptConfig;
use crate::{NotesError, Result};

lazy_static! {
    /// Accepted URL shapes, checked in order
    static ref VIDEO_ID_PATTERNS: [Regex; 2] = [
        Regex::new(r"^https?://(?:www\.)?youtube\.com/watch\?v=([a-zA-Z0-9_-]{11})")
            .expect("watch URL pattern is valid"),
        Regex::new(r"^https?://youtu\.be/([a-zA-Z0-9_-]{11})")
            .expect("short URL pattern is valid"),
    ];
}

/// Canonical 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Thumbnail image for the video
    pub fn thumbnail_url(&self) -> String {
        format!("http://img.youtube.com/vi/{}/0.jpg", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extract the video ID from a watch URL or a youtu.be short link.
///
/// Matching is anchored at the start of the input and case-sensitive. Anything after
/// the 11 captured characters is ignored.
pub fn parse_video_id(url: &str) -> Option<VideoId> {
    VIDEO_ID_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| VideoId(m.as_str().to_string()))
    })
}

/// Join transcript fragments with single spaces, in transcript order
pub fn join_fragments(fragments: &[TranscriptFragment]) -> String {
    fragments
        .iter()
        .map(|fragment| fragment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Source of timed transcript fragments for a video
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// Fetch the transcript for a video, in order
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>>;

    /// Name of the source for logging
    fn source_name(&self) -> &'static str;
}

/// Transcript source backed by YouTube's caption tracks
pub struct YoutubeTranscriptSource {
    api: YouTubeTranscriptApi,
    languages: Vec<String>,
    preserve_formatting: bool,
}

impl YoutubeTranscriptSource {
    pub fn new(config: &TranscriptConfig) -> Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None).map_err(|e| {
            NotesError::ExtractionFailed(format!("Failed to initialize transcript client: {}", e))
        })?;

        Ok(Self {
            api,
            languages: config.languages.clone(),
            preserve_formatting: config.preserve_formatting,
        })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscriptSource {
    async fn fetch(&self, video_id: &VideoId) -> Result<Vec<TranscriptFragment>> {
        tracing::debug!("Fetching transcript for video: {}", video_id);

        let languages: Vec<&str> = self.languages.iter().map(String::as_str).collect();

        let transcript = self
            .api
            .fetch_transcript(video_id.as_str(), &languages, self.preserve_formatting)
            .await
            .map_err(|e| {
                NotesError::ExtractionFailed(format!(
                    "Could not fetch transcript for video {}: {}",
                    video_id, e
                ))
            })?;

        tracing::debug!("Received {} transcript snippets", transcript.snippets.len());

        Ok(transcript
            .snippets
            .into_iter()
            .map(|snippet| TranscriptFragment::new(snippet.text, snippet.start, snippet.duration))
            .collect())
    }

    fn source_name(&self) -> &'static str {
        "YouTube captions"
    }
}
