use async_trait::async_trait;

use crate::error::{Result, TimecoderError};

pub const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
const SUMMARY_MODEL: &str = "gpt-3.5-turbo";

/// External text-summarization capability, one blocking call per chunk.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(&self, chunk_text: &str) -> Result<String>;
}

pub struct OpenAiSummarizer {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl OpenAiSummarizer {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url: OPENAI_API_URL.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl Summarizer for OpenAiSummarizer {
    async fn summarize(&self, chunk_text: &str) -> Result<String> {
        let prompt = format!(
            "Summarize the following in 6 words or less: '{chunk_text}'. Strict 6-word limit."
        );

        let response = self
            .client
            .post(&self.api_url)
            .header("Content-Type", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "model": SUMMARY_MODEL,
                "messages": [
                    {
                        "role": "system",
                        "content": "You are a YouTube video creator.",
                    },
                    {
                        "role": "user",
                        "content": prompt,
                    },
                ],
                "max_tokens": 50,
                "n": 1,
                "temperature": 0,
                "top_p": 1,
                "frequency_penalty": 0,
                "presence_penalty": 0,
            }))
            .send()
            .await?
            .json::<serde_json::Value>()
            .await?;

        let description = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| TimecoderError::SummaryFailed {
                reason: format!("Invalid API response: {:?}", response),
            })?;

        Ok(description.to_string())
    }
}
