use std::path::PathBuf;

use tokio::{fs, io::AsyncWriteExt};

use crate::{
    error::Result, format::polish_timecode, summarizer::Summarizer, types::TranscriptLine,
};

/// Word threshold for a chunk. Short videos get finer-grained chapters.
pub fn chunk_size_for(duration_seconds: f64) -> usize {
    if duration_seconds <= 600.0 { 150 } else { 400 }
}

/// Splits a timed transcript into word-count-bounded chunks and turns each
/// chunk into one `H:MM:SS - description` line.
pub struct TranscriptProcessor {
    summarizer: Box<dyn Summarizer>,
    output_dir: PathBuf,
}

impl TranscriptProcessor {
    pub fn new(summarizer: Box<dyn Summarizer>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            summarizer,
            output_dir: output_dir.into(),
        }
    }

    /// Summarize one accumulated chunk into a polished timecode line.
    async fn process_chunk(&self, chunk_text: &str, chunk_start_time: f64) -> Result<String> {
        let description = self.summarizer.summarize(chunk_text).await?;
        Ok(polish_timecode(chunk_start_time, &description))
    }

    /// Single forward pass over the transcript. A chunk is flushed the moment
    /// its word count strictly exceeds `chunk_size`; a trailing partial chunk
    /// is dropped, never summarized. The newline-joined result is appended to
    /// the per-repository `timestamps.txt` and returned.
    pub async fn process_transcript(
        &self,
        transcript: &[TranscriptLine],
        chunk_size: usize,
    ) -> Result<String> {
        println!("Processing transcript...");

        let mut chunk_text = String::new();
        let mut chunk_start_time: Option<f64> = None;
        let mut comment_body: Vec<String> = Vec::new();

        for line in transcript {
            if chunk_start_time.is_none() {
                chunk_start_time = Some(line.start);
            }

            if !chunk_text.is_empty() {
                chunk_text.push(' ');
            }
            chunk_text.push_str(&line.text);

            if chunk_text.split_whitespace().count() > chunk_size {
                let start = chunk_start_time.take().unwrap_or(0.0);
                let timecode = self.process_chunk(&chunk_text, start).await?;
                comment_body.push(timecode);
                chunk_text.clear();
            }
        }

        let body = comment_body.join("\n");
        self.append_to_log(&body).await?;

        Ok(body)
    }

    async fn append_to_log(&self, body: &str) -> Result<()> {
        fs::create_dir_all(&self.output_dir).await?;
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.output_dir.join("timestamps.txt"))
            .await?;
        file.write_all(body.as_bytes()).await?;
        file.write_all(b"\n").await?;
        Ok(())
    }
}
