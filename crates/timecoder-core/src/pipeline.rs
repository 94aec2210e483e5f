use std::collections::HashSet;

use crate::{
    chunker::{TranscriptProcessor, chunk_size_for},
    error::Result,
    github::IssueHost,
    transcript::TranscriptSource,
    types::{MatchedVideo, VideoEntry},
    youtube::{VideoPlatform, extract_video_id},
};

/// How many issue pages are scanned per repository.
pub const ISSUE_PAGES: u32 = 2;

/// Issue titles confirmed as already commented on by the acting account.
/// One per repository run; never persisted across runs.
#[derive(Debug, Default)]
pub struct ProcessedIssues {
    titles: HashSet<String>,
}

impl ProcessedIssues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, issue_title: &str) -> bool {
        self.titles.contains(issue_title)
    }

    fn record(&mut self, issue_title: &str) {
        self.titles.insert(issue_title.to_string());
    }
}

/// Whether a comment may be posted on the named issue.
pub trait ConfirmGate: Send + Sync {
    fn confirm(&self, issue_title: &str) -> bool;
}

/// Non-interactive gate: always post.
pub struct AlwaysConfirm;

impl ConfirmGate for AlwaysConfirm {
    fn confirm(&self, _issue_title: &str) -> bool {
        true
    }
}

/// Terminal state for one matched video.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoOutcome {
    PublishedSummary,
    PublishedNotice,
    SkippedDuplicate,
    Failed,
}

/// Pair issue-derived titles with playlist videos by case-insensitive exact
/// title match. The first playlist hit wins; unmatched titles are dropped.
pub fn match_titles_and_urls(
    issue_titles: &[String],
    video_info: &[VideoEntry],
) -> Result<Vec<MatchedVideo>> {
    let mut matched = Vec::new();
    for title in issue_titles {
        for entry in video_info {
            if title.to_lowercase() == entry.title.to_lowercase() {
                matched.push(MatchedVideo {
                    issue_title: title.clone(),
                    video_id: extract_video_id(&entry.url)?,
                });
                break;
            }
        }
    }
    Ok(matched)
}

/// Fast path through the session cache, otherwise scan the title-matching
/// issue's comments for one authored by the acting account. The cache is
/// written only on a confirmed hit.
pub async fn is_already_processed(
    host: &dyn IssueHost,
    seen: &mut ProcessedIssues,
    issue_title: &str,
) -> Result<bool> {
    if seen.contains(issue_title) {
        return Ok(true);
    }

    for issue in host.open_issues().await? {
        if issue.title != issue_title {
            continue;
        }
        let login = host.viewer_login().await?;
        for comment in host.issue_comments(issue.number).await? {
            if comment.user.login == login {
                seen.record(issue_title);
                return Ok(true);
            }
        }
    }
    Ok(false)
}

/// Find the open issue with the matching title, show the body, and post it
/// verbatim if the gate approves. Stops after the first matching issue.
pub async fn add_issue_comment_with_confirmation(
    host: &dyn IssueHost,
    gate: &dyn ConfirmGate,
    issue_title: &str,
    comment_body: &str,
) -> Result<()> {
    for issue in host.open_issues().await? {
        if issue.title.trim() != issue_title {
            continue;
        }
        println!("\nAdding comment to issue '{}':\n", issue.title);
        println!("{comment_body}");
        if gate.confirm(&issue.title) {
            host.create_comment(issue.number, comment_body).await?;
            println!("Comment added.");
        } else {
            println!("Skipped.");
        }
        break;
    }
    Ok(())
}

/// Sequences playlist listing, title matching, the duplicate guard, transcript
/// chunking, and comment publication for one repository.
pub struct Pipeline<'a> {
    pub issues: &'a dyn IssueHost,
    pub videos: &'a dyn VideoPlatform,
    pub transcripts: &'a dyn TranscriptSource,
    pub processor: &'a TranscriptProcessor,
    pub confirm: &'a dyn ConfirmGate,
}

impl Pipeline<'_> {
    /// Process every issue title matched against one playlist. A failing video
    /// is logged and skipped; it never aborts the remaining videos.
    pub async fn process_videos(
        &self,
        seen: &mut ProcessedIssues,
        playlist_id: &str,
        issue_titles: &[String],
    ) -> Result<Vec<VideoOutcome>> {
        let video_info = self.videos.playlist_videos(playlist_id).await;
        let matched = match_titles_and_urls(issue_titles, &video_info)?;

        let mut outcomes = Vec::with_capacity(matched.len());
        for video in &matched {
            let outcome = match self.process_one(seen, video).await {
                Ok(outcome) => outcome,
                Err(e) => {
                    println!(
                        "An unexpected error occurred while processing the video `{}`: {e}",
                        video.video_id
                    );
                    VideoOutcome::Failed
                }
            };
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    async fn process_one(
        &self,
        seen: &mut ProcessedIssues,
        video: &MatchedVideo,
    ) -> Result<VideoOutcome> {
        println!("{}", video.issue_title);
        let issue_title = format!("Timecodes for \"{}\"", video.issue_title);

        if is_already_processed(self.issues, seen, &issue_title).await? {
            println!("Issue '{issue_title}' has already been processed. Skipping...");
            return Ok(VideoOutcome::SkippedDuplicate);
        }

        let video_duration = self.videos.video_duration(&video.video_id).await;
        println!("Video duration: {video_duration} seconds");
        let chunk_size = chunk_size_for(video_duration);

        match self.transcripts.fetch(&video.video_id).await {
            Ok(transcript) => {
                let comment_body = self
                    .processor
                    .process_transcript(&transcript, chunk_size)
                    .await?;
                add_issue_comment_with_confirmation(
                    self.issues,
                    self.confirm,
                    &issue_title,
                    &comment_body,
                )
                .await?;
                Ok(VideoOutcome::PublishedSummary)
            }
            Err(err) => match err.notice() {
                Some(notice) => {
                    println!(
                        "Encountered an issue with the video `{}`: {notice}",
                        video.video_id
                    );
                    add_issue_comment_with_confirmation(
                        self.issues,
                        self.confirm,
                        &issue_title,
                        &notice,
                    )
                    .await?;
                    Ok(VideoOutcome::PublishedNotice)
                }
                None => Err(err.into()),
            },
        }
    }
}
