use std::path::PathBuf;
use thiserror::Error;

use crate::transcript::TranscriptError;

#[derive(Error, Debug)]
pub enum TimecoderError {
    #[error("{var} not found in environment variables")]
    MissingEnvVar { var: String },

    #[error("Failed to load config from {path}: {reason}")]
    ConfigFailed { path: PathBuf, reason: String },

    #[error("No watch?v= parameter in video url: {url}")]
    VideoUrlParse { url: String },

    #[error("Unrecognized video duration format: {value}")]
    DurationParse { value: String },

    #[error("Summarization failed: {reason}")]
    SummaryFailed { reason: String },

    #[error("Transcript retrieval failed: {0}")]
    Transcript(#[from] TranscriptError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, TimecoderError>;
