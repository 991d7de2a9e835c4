use std::sync::Arc;

use serde::Serialize;

use crate::core::{
    GenerationError, GenerationProvider, SUMMARY_PROMPT, TranscriptError, TranscriptProvider,
    VideoId, extract_identifier, fetch_transcript, summarize,
};

/// Result of the transcript stage of a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TranscriptDetails {
    pub video_id: VideoId,
    pub transcript: String,
}

impl TranscriptDetails {
    pub fn thumbnail_url(&self) -> String {
        self.video_id.thumbnail_url()
    }

    /// Whether the summarize trigger may fire for this transcript.
    pub fn is_summarizable(&self) -> bool {
        !self.transcript.is_empty()
    }

    pub fn word_count(&self) -> usize {
        self.transcript.split_whitespace().count()
    }
}

/// extract → fetch → summarize, with the two provider clients fixed at construction.
#[derive(Clone)]
pub struct Pipeline {
    transcripts: Arc<dyn TranscriptProvider>,
    generator: Arc<dyn GenerationProvider>,
}

impl Pipeline {
    pub fn new(
        transcripts: Arc<dyn TranscriptProvider>,
        generator: Arc<dyn GenerationProvider>,
    ) -> Self {
        Self {
            transcripts,
            generator,
        }
    }

    pub fn model(&self) -> &str {
        self.generator.model()
    }

    pub async fn extract_transcript_details(
        &self,
        url: &str,
    ) -> Result<TranscriptDetails, TranscriptError> {
        let video_id = extract_identifier(url)?;
        let transcript = fetch_transcript(self.transcripts.as_ref(), &video_id).await?;

        tracing::info!(
            video_id = %video_id,
            chars = transcript.len(),
            "transcript ready"
        );
        Ok(TranscriptDetails {
            video_id,
            transcript,
        })
    }

    pub async fn summarize(&self, details: &TranscriptDetails) -> Result<String, GenerationError> {
        summarize(self.generator.as_ref(), &details.transcript, SUMMARY_PROMPT).await
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::core::{Severity, TranscriptSegment};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    pub(crate) struct FakeTranscripts {
        pub outcome: Result<Vec<TranscriptSegment>, TranscriptError>,
        pub calls: AtomicUsize,
    }

    impl FakeTranscripts {
        pub fn returning(texts: &[&str]) -> Self {
            let segments = texts
                .iter()
                .enumerate()
                .map(|(i, text)| TranscriptSegment {
                    text: text.to_string(),
                    start: i as f64,
                    duration: 1.0,
                })
                .collect();
            Self {
                outcome: Ok(segments),
                calls: AtomicUsize::new(0),
            }
        }

        pub fn failing(err: TranscriptError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl TranscriptProvider for FakeTranscripts {
        async fn fetch_segments(
            &self,
            _video_id: &VideoId,
        ) -> Result<Vec<TranscriptSegment>, TranscriptError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    pub(crate) struct FakeGenerator {
        pub reply: String,
        pub prompts: Mutex<Vec<String>>,
    }

    impl FakeGenerator {
        pub fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl GenerationProvider for FakeGenerator {
        fn model(&self) -> &str {
            "fake-model"
        }

        async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            Ok(self.reply.clone())
        }
    }

    fn pipeline(transcripts: &Arc<FakeTranscripts>, generator: &Arc<FakeGenerator>) -> Pipeline {
        Pipeline::new(transcripts.clone(), generator.clone())
    }

    /// Runs the request the way the UI does: summarize only after a usable transcript.
    async fn run(pipeline: &Pipeline, url: &str) -> Result<Option<String>, TranscriptError> {
        let details = pipeline.extract_transcript_details(url).await?;
        if !details.is_summarizable() {
            return Ok(None);
        }
        Ok(Some(pipeline.summarize(&details).await.unwrap()))
    }

    #[tokio::test]
    async fn end_to_end_long_url() {
        let transcripts = Arc::new(FakeTranscripts::returning(&["Hello", "world"]));
        let generator = Arc::new(FakeGenerator::replying("## Notes\n- greets the world"));
        let pipeline = pipeline(&transcripts, &generator);

        let details = pipeline
            .extract_transcript_details("https://www.youtube.com/watch?v=abc123")
            .await
            .unwrap();
        assert_eq!(details.video_id.as_str(), "abc123");
        assert_eq!(details.transcript, "Hello world");
        assert_eq!(
            details.thumbnail_url(),
            "http://img.youtube.com/vi/abc123/0.jpg"
        );

        let summary = pipeline.summarize(&details).await.unwrap();
        assert_eq!(summary, "## Notes\n- greets the world");
        assert_eq!(
            generator.prompts.lock().unwrap().as_slice(),
            [format!("{SUMMARY_PROMPT}Hello world")]
        );
    }

    #[tokio::test]
    async fn unrecognized_url_never_reaches_provider() {
        let transcripts = Arc::new(FakeTranscripts::returning(&["unused"]));
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let pipeline = pipeline(&transcripts, &generator);

        let err = run(&pipeline, "https://vimeo.com/42").await.unwrap_err();

        assert!(matches!(err, TranscriptError::InvalidUrl(_)));
        assert_eq!(transcripts.calls.load(Ordering::SeqCst), 0);
        assert_eq!(generator.call_count(), 0);
    }

    #[tokio::test]
    async fn provider_failures_halt_before_generation() {
        let cases = [
            (TranscriptError::IpBlocked, Severity::Error),
            (TranscriptError::VideoUnavailable, Severity::Error),
            (TranscriptError::NoTranscriptFound, Severity::Warning),
            (TranscriptError::TranscriptsDisabled, Severity::Warning),
            (TranscriptError::Unexpected("timed out".into()), Severity::Error),
        ];

        for (failure, severity) in cases {
            let transcripts = Arc::new(FakeTranscripts::failing(failure.clone()));
            let generator = Arc::new(FakeGenerator::replying("unused"));
            let pipeline = pipeline(&transcripts, &generator);

            let err = run(&pipeline, "https://youtu.be/abc123?t=5").await.unwrap_err();

            assert_eq!(err, failure);
            assert_eq!(err.notice().severity, severity);
            assert_eq!(err.notice().message, failure.to_string());
            assert_eq!(transcripts.calls.load(Ordering::SeqCst), 1);
            assert_eq!(generator.call_count(), 0, "{failure:?}");
        }
    }

    #[tokio::test]
    async fn empty_identifier_goes_to_provider() {
        let transcripts = Arc::new(FakeTranscripts::failing(TranscriptError::VideoUnavailable));
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let pipeline = pipeline(&transcripts, &generator);

        let err = run(&pipeline, "https://www.youtube.com/watch?v=").await.unwrap_err();

        assert_eq!(err, TranscriptError::VideoUnavailable);
        assert_eq!(transcripts.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_transcript_is_not_summarized() {
        let transcripts = Arc::new(FakeTranscripts::returning(&[]));
        let generator = Arc::new(FakeGenerator::replying("unused"));
        let pipeline = pipeline(&transcripts, &generator);

        let outcome = run(&pipeline, "https://youtu.be/abc123").await.unwrap();

        assert_eq!(outcome, None);
        assert_eq!(generator.call_count(), 0);
    }

    #[test]
    fn word_count_ignores_extra_whitespace() {
        let details = TranscriptDetails {
            video_id: extract_identifier("youtu.be/x").unwrap(),
            transcript: "one  two\nthree ".into(),
        };
        assert_eq!(details.word_count(), 3);
        assert!(details.is_summarizable());
    }
}
