use derive_more::Display;
use serde::{Deserialize, Serialize};

const WATCH_MARKER: &str = "watch?v=";
const SHORT_MARKER: &str = "youtu.be/";
const THUMBNAIL_HOST: &str = "http://img.youtube.com";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum FormatError {
    #[display("Invalid YouTube URL format.")]
    UnrecognizedUrl,
}

impl std::error::Error for FormatError {}

/// Identifier of a video in YouTube's namespace.
///
/// No shape checks are applied: whatever sits behind the URL marker is kept,
/// the empty string included. The transcript provider is the one to reject it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn thumbnail_url(&self) -> String {
        format!("{THUMBNAIL_HOST}/vi/{}/0.jpg", self.0)
    }
}

/// Pull the video identifier out of a long (`watch?v=`) or short (`youtu.be/`) URL.
pub fn extract_identifier(url: &str) -> Result<VideoId, FormatError> {
    let raw_id = if let Some((_, rest)) = url.split_once(WATCH_MARKER) {
        rest.split('&').next().unwrap_or(rest)
    } else if let Some((_, rest)) = url.split_once(SHORT_MARKER) {
        rest.split('?').next().unwrap_or(rest)
    } else {
        return Err(FormatError::UnrecognizedUrl);
    };

    Ok(VideoId(raw_id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{FormatError, extract_identifier};

    #[test]
    fn long_form_stops_at_ampersand() {
        let id = extract_identifier("https://www.youtube.com/watch?v=XYZ&t=5").unwrap();
        assert_eq!(id.as_str(), "XYZ");
    }

    #[test]
    fn repeated_long_marker_is_kept_in_identifier() {
        let id = extract_identifier("https://www.youtube.com/watch?v=abc/watch?v=def").unwrap();
        assert_eq!(id.as_str(), "abc/watch?v=def");
    }

    #[test]
    fn long_form_without_extra_params() {
        let id = extract_identifier("https://www.youtube.com/watch?v=abc123").unwrap();
        assert_eq!(id.as_str(), "abc123");
    }

    #[test]
    fn short_form_stops_at_question_mark() {
        let id = extract_identifier("https://youtu.be/XYZ?t=5").unwrap();
        assert_eq!(id.as_str(), "XYZ");
    }

    #[test]
    fn short_form_keeps_ampersands() {
        // Only `?` terminates a short-form identifier.
        let id = extract_identifier("youtu.be/a&b").unwrap();
        assert_eq!(id.as_str(), "a&b");
    }

    #[test]
    fn long_marker_wins_when_both_present() {
        let id = extract_identifier("https://youtu.be/short?x=https://youtube.com/watch?v=long&t=1")
            .unwrap();
        assert_eq!(id.as_str(), "long");
    }

    #[test]
    fn empty_identifier_is_accepted() {
        let id = extract_identifier("https://www.youtube.com/watch?v=").unwrap();
        assert_eq!(id.as_str(), "");

        let id = extract_identifier("https://youtu.be/?t=5").unwrap();
        assert_eq!(id.as_str(), "");
    }

    #[test]
    fn identifier_shape_is_not_checked() {
        let id = extract_identifier("watch?v=../../etc passwd").unwrap();
        assert_eq!(id.as_str(), "../../etc passwd");
    }

    #[test]
    fn rejects_unrecognized_urls() {
        for url in [
            "",
            "https://vimeo.com/12345",
            "https://www.youtube.com/embed/abc",
            "https://www.youtube.com/watch?list=abc&v=def",
        ] {
            assert_eq!(
                extract_identifier(url),
                Err(FormatError::UnrecognizedUrl),
                "{url}"
            );
        }
    }

    #[test]
    fn extraction_is_idempotent() {
        let url = "https://www.youtube.com/watch?v=dQw4w9WgXcQ&list=PL1";
        assert_eq!(extract_identifier(url), extract_identifier(url));
    }

    #[test]
    fn thumbnail_url_is_keyed_by_identifier() {
        let id = extract_identifier("https://youtu.be/abc123").unwrap();
        assert_eq!(id.thumbnail_url(), "http://img.youtube.com/vi/abc123/0.jpg");
    }

    #[test]
    fn format_error_message() {
        assert_eq!(
            FormatError::UnrecognizedUrl.to_string(),
            "Invalid YouTube URL format."
        );
    }
}
