use std::path::Path;

use serde::Deserialize;
use tokio::fs;

use crate::error::{Result, TimecoderError};

pub const GITHUB_TOKEN_VAR: &str = "GITHUB_ACCESS_TOKEN";
pub const YOUTUBE_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const OPENAI_KEY_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Deserialize)]
pub struct Config {
    pub repositories: Vec<RepositoryConfig>,
}

#[derive(Debug, Deserialize)]
pub struct RepositoryConfig {
    pub organization: String,
    pub repo_name: String,
    pub playlist_urls: Vec<String>,
}

impl RepositoryConfig {
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.organization, self.repo_name)
    }
}

impl Config {
    /// Load the repository configuration from a JSON file.
    pub async fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .await
            .map_err(|e| TimecoderError::ConfigFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;
        serde_json::from_str(&raw).map_err(|e| TimecoderError::ConfigFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// API credentials pulled from the environment at startup. Missing variables
/// are a fatal startup error.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub github_token: String,
    pub youtube_api_key: String,
    pub openai_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            github_token: require_env(GITHUB_TOKEN_VAR)?,
            youtube_api_key: require_env(YOUTUBE_KEY_VAR)?,
            openai_api_key: require_env(OPENAI_KEY_VAR)?,
        })
    }
}

fn require_env(var: &str) -> Result<String> {
    std::env::var(var).map_err(|_| TimecoderError::MissingEnvVar {
        var: var.to_string(),
    })
}
