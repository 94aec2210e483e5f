//! Timecoder Core Library
//!
//! Core functionality for matching GitHub timecode-request issues to YouTube
//! playlist videos, chunking their transcripts, and posting AI-generated
//! chapter summaries back to the issues.

pub mod chunker;
pub mod config;
pub mod error;
pub mod format;
pub mod github;
pub mod pipeline;
pub mod summarizer;
pub mod transcript;
pub mod types;
pub mod youtube;

// Re-export commonly used items at crate root
pub use chunker::{TranscriptProcessor, chunk_size_for};
pub use config::{Config, Credentials, RepositoryConfig};
pub use error::{Result, TimecoderError};
pub use format::{format_timestamp, polish_timecode, strip_clock_fragments};
pub use github::{GithubClient, IssueHost, extract_video_title};
pub use pipeline::{
    AlwaysConfirm, ConfirmGate, ISSUE_PAGES, Pipeline, ProcessedIssues, VideoOutcome,
    add_issue_comment_with_confirmation, is_already_processed, match_titles_and_urls,
};
pub use summarizer::{OpenAiSummarizer, Summarizer};
pub use transcript::{TranscriptError, TranscriptSource, YoutubeTranscripts};
pub use types::{Issue, IssueComment, MatchedVideo, TranscriptLine, VideoEntry};
pub use youtube::{
    VideoPlatform, YoutubeClient, extract_video_id, parse_iso8601_duration, playlist_id_from_url,
};
