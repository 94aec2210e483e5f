use serde::{Deserialize, Serialize};

/// One caption unit from the upstream transcript source, ordered by start time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptLine {
    pub start: f64,
    pub text: String,
}

/// A (title, url) pair from a playlist listing.
#[derive(Debug, Clone)]
pub struct VideoEntry {
    pub title: String,
    pub url: String,
}

/// An issue-derived video title paired with the playlist video that answers it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchedVideo {
    pub issue_title: String,
    pub video_id: String,
}

/// Open issue as returned by the tracker. The issues endpoint also lists pull
/// requests; those carry a `pull_request` key.
#[derive(Debug, Clone, Deserialize)]
pub struct Issue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueComment {
    pub user: IssueAuthor,
    #[serde(default)]
    pub body: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct IssueAuthor {
    pub login: String,
}
