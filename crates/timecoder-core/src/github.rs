use async_trait::async_trait;

use crate::{
    error::Result,
    types::{Issue, IssueAuthor, IssueComment},
};

const GITHUB_API_BASE: &str = "https://api.github.com";
const ISSUE_TITLE_PREFIX: &str = "Timecodes for ";

/// Narrow issue-tracker surface needed by the pipeline.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Video titles extracted from one page of open timecode-request issues.
    /// Degrades to an empty list on failure.
    async fn video_titles_from_issues(&self, page: u32) -> Vec<String>;

    async fn open_issues(&self) -> Result<Vec<Issue>>;

    async fn issue_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>>;

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()>;

    /// Login of the acting account.
    async fn viewer_login(&self) -> Result<String>;
}

pub struct GithubClient {
    client: reqwest::Client,
    api_base: String,
    token: String,
    repo: String,
}

impl GithubClient {
    /// `repo` is the full `organization/name` identifier.
    pub fn new(token: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: GITHUB_API_BASE.to_string(),
            token: token.into(),
            repo: repo.into(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("User-Agent", "timecoder")
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
    }

    async fn fetch_issue_page(&self, page: u32) -> Result<Vec<Issue>> {
        let url = format!("{}/repos/{}/issues", self.api_base, self.repo);
        let page = page.to_string();
        let issues = self
            .get(&url)
            .query(&[
                ("state", "open"),
                ("sort", "updated"),
                ("direction", "desc"),
                ("page", page.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Issue>>()
            .await?;
        Ok(issues)
    }
}

#[async_trait]
impl IssueHost for GithubClient {
    async fn video_titles_from_issues(&self, page: u32) -> Vec<String> {
        println!("Fetching video titles from issues, page {page}");
        match self.fetch_issue_page(page).await {
            Ok(issues) => {
                let video_titles: Vec<String> = issues
                    .iter()
                    .filter(|issue| issue.pull_request.is_none())
                    .filter_map(|issue| extract_video_title(&issue.title))
                    .collect();
                println!("Fetched {} video titles", video_titles.len());
                video_titles
            }
            Err(e) => {
                println!("An error occurred while fetching issues: {e}");
                Vec::new()
            }
        }
    }

    async fn open_issues(&self) -> Result<Vec<Issue>> {
        let url = format!("{}/repos/{}/issues", self.api_base, self.repo);
        let issues = self
            .get(&url)
            .query(&[("state", "open"), ("per_page", "100")])
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<Issue>>()
            .await?;
        Ok(issues)
    }

    async fn issue_comments(&self, issue_number: u64) -> Result<Vec<IssueComment>> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base, self.repo, issue_number
        );
        let comments = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<IssueComment>>()
            .await?;
        Ok(comments)
    }

    async fn create_comment(&self, issue_number: u64, body: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/issues/{}/comments",
            self.api_base, self.repo, issue_number
        );
        self.client
            .post(&url)
            .header("User-Agent", "timecoder")
            .header("Accept", "application/vnd.github+json")
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&serde_json::json!({ "body": body }))
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }

    async fn viewer_login(&self) -> Result<String> {
        let url = format!("{}/user", self.api_base);
        let viewer = self
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .json::<IssueAuthor>()
            .await?;
        Ok(viewer.login)
    }
}

/// `Timecodes for "Some Video"` -> `Some Video`. Titles without the prefix
/// are not timecode requests.
pub fn extract_video_title(issue_title: &str) -> Option<String> {
    let rest = issue_title.trim().strip_prefix(ISSUE_TITLE_PREFIX)?;
    Some(rest.replace('"', ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_title_and_strips_quotes() {
        assert_eq!(
            extract_video_title("Timecodes for \"Intro to Rust\""),
            Some("Intro to Rust".to_string())
        );
    }

    #[test]
    fn ignores_titles_without_the_prefix() {
        assert_eq!(extract_video_title("Fix the build"), None);
        assert_eq!(extract_video_title("timecodes for \"x\""), None);
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert_eq!(
            extract_video_title("  Timecodes for \"Spaced\"  "),
            Some("Spaced".to_string())
        );
    }
}
