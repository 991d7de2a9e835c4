use async_trait::async_trait;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use yt_transcript_rs::api::YouTubeTranscriptApi;
use yt_transcript_rs::errors::{CouldNotRetrieveTranscript, CouldNotRetrieveTranscriptReason};

use crate::core::{FormatError, VideoId};
use crate::error::Error;

/// Languages asked of YouTube; mirrors what the upstream API picks by default.
pub const DEFAULT_LANGUAGES: &[&str] = &["en"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

/// Message shown to the user when a request halts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
}

/// Every way the transcript stage of a request can end without a transcript.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum TranscriptError {
    #[from]
    #[display("Unexpected error: {_0}")]
    InvalidUrl(FormatError),

    #[display("YouTube has blocked your IP. Try using a VPN, proxy, or mobile hotspot.")]
    IpBlocked,

    #[display("This video is unavailable.")]
    VideoUnavailable,

    #[display("No transcript found for this video.")]
    NoTranscriptFound,

    #[display("Transcripts are disabled for this video.")]
    TranscriptsDisabled,

    #[display("Unexpected error: {_0}")]
    Unexpected(String),
}

impl TranscriptError {
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoTranscriptFound | Self::TranscriptsDisabled => Severity::Warning,
            Self::InvalidUrl(_) | Self::IpBlocked | Self::VideoUnavailable | Self::Unexpected(_) => {
                Severity::Error
            }
        }
    }

    pub fn notice(&self) -> Notice {
        Notice {
            severity: self.severity(),
            message: self.to_string(),
        }
    }
}

impl std::error::Error for TranscriptError {}

#[async_trait]
pub trait TranscriptProvider: Send + Sync {
    /// Segments for `video_id`, in the order the provider returns them.
    async fn fetch_segments(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError>;
}

/// Transcript provider backed by YouTube's caption tracks.
#[derive(Clone)]
pub struct YouTubeTranscripts {
    api: YouTubeTranscriptApi,
}

impl YouTubeTranscripts {
    pub fn new() -> crate::error::Result<Self> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| Error::custom(format!("Failed to build transcript client: {e}")))?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptProvider for YouTubeTranscripts {
    async fn fetch_segments(
        &self,
        video_id: &VideoId,
    ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
        let fetched = self
            .api
            .fetch_transcript(video_id.as_str(), DEFAULT_LANGUAGES, false)
            .await
            .map_err(classify_failure)?;

        Ok(fetched
            .snippets
            .into_iter()
            .map(|snippet| TranscriptSegment {
                text: snippet.text,
                start: snippet.start,
                duration: snippet.duration,
            })
            .collect())
    }
}

fn classify_failure(err: CouldNotRetrieveTranscript) -> TranscriptError {
    use CouldNotRetrieveTranscriptReason as Reason;

    match &err.reason {
        Some(Reason::IpBlocked { .. }) => TranscriptError::IpBlocked,
        Some(Reason::VideoUnavailable { .. }) => TranscriptError::VideoUnavailable,
        Some(Reason::NoTranscriptFound { .. }) => TranscriptError::NoTranscriptFound,
        Some(Reason::TranscriptsDisabled { .. }) => TranscriptError::TranscriptsDisabled,
        _ => TranscriptError::Unexpected(err.to_string()),
    }
}

/// Space-join segment texts, keeping provider order.
pub fn join_segments(segments: &[TranscriptSegment]) -> String {
    segments
        .iter()
        .map(|segment| segment.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

pub async fn fetch_transcript(
    provider: &dyn TranscriptProvider,
    video_id: &VideoId,
) -> Result<String, TranscriptError> {
    tracing::info!(video_id = %video_id, "fetching transcript");
    let segments = provider.fetch_segments(video_id).await?;
    tracing::debug!(segments = segments.len(), "transcript fetched");
    Ok(join_segments(&segments))
}
