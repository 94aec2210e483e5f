use async_trait::async_trait;
use thiserror::Error;
use yt_transcript_rs::api::YouTubeTranscriptApi;

use crate::types::TranscriptLine;

/// Why a transcript could not be produced. `Disabled` and `NotFound` are
/// expected conditions whose message doubles as the user-facing notice;
/// anything else is unexpected.
#[derive(Debug, Error)]
pub enum TranscriptError {
    #[error("Transcripts are disabled for the video.")]
    Disabled,
    #[error("No transcript was found in the requested language for video.")]
    NotFound,
    #[error("{0}")]
    Other(String),
}

impl TranscriptError {
    /// Fixed explanation posted as the issue comment for expected conditions.
    pub fn notice(&self) -> Option<String> {
        match self {
            Self::Disabled | Self::NotFound => Some(self.to_string()),
            Self::Other(_) => None,
        }
    }
}

/// Source of timed transcripts for platform videos.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    async fn fetch(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptLine>, TranscriptError>;
}

pub struct YoutubeTranscripts {
    api: YouTubeTranscriptApi,
}

impl YoutubeTranscripts {
    pub fn new() -> std::result::Result<Self, TranscriptError> {
        let api = YouTubeTranscriptApi::new(None, None, None)
            .map_err(|e| TranscriptError::Other(e.to_string()))?;
        Ok(Self { api })
    }
}

#[async_trait]
impl TranscriptSource for YoutubeTranscripts {
    async fn fetch(
        &self,
        video_id: &str,
    ) -> std::result::Result<Vec<TranscriptLine>, TranscriptError> {
        match self.api.fetch_transcript(video_id, &["en"], false).await {
            Ok(transcript) => Ok(transcript
                .snippets
                .into_iter()
                .map(|snippet| TranscriptLine {
                    start: snippet.start,
                    text: snippet.text,
                })
                .collect()),
            Err(e) => Err(classify_fetch_failure(&e.to_string())),
        }
    }
}

/// The upstream crate reports expected unavailability conditions only through
/// its error text; map them onto tagged variants so callers branch on data,
/// not strings.
fn classify_fetch_failure(message: &str) -> TranscriptError {
    let lowered = message.to_lowercase();
    if lowered.contains("disabled") {
        TranscriptError::Disabled
    } else if lowered.contains("no transcript") {
        TranscriptError::NotFound
    } else {
        TranscriptError::Other(message.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_disabled_subtitles() {
        assert!(matches!(
            classify_fetch_failure("Subtitles are disabled for this video"),
            TranscriptError::Disabled
        ));
    }

    #[test]
    fn classifies_missing_language() {
        assert!(matches!(
            classify_fetch_failure("No transcripts were found for any of the requested languages"),
            TranscriptError::NotFound
        ));
    }

    #[test]
    fn everything_else_is_unexpected() {
        assert!(matches!(
            classify_fetch_failure("connection reset by peer"),
            TranscriptError::Other(_)
        ));
    }

    #[test]
    fn only_expected_conditions_carry_a_notice() {
        assert_eq!(
            TranscriptError::Disabled.notice().as_deref(),
            Some("Transcripts are disabled for the video.")
        );
        assert_eq!(
            TranscriptError::NotFound.notice().as_deref(),
            Some("No transcript was found in the requested language for video.")
        );
        assert!(TranscriptError::Other("boom".to_string()).notice().is_none());
    }
}
