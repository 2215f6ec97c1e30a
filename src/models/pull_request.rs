//! Pull requests and review comments.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::{GitHubClient, RequestBody};
use crate::error::{GitHubError, Result};
use crate::models::common::{GitUser, RepoRef};
use crate::models::issue::{CommentBody, CommentListOptions, IssueState};
use crate::models::repo::{Commit, CommitFile, Repo};
use crate::query::with_query;
use crate::traits::{Get, Update};
use crate::validate::{require, require_all};

/// Filter for pull request lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PullState {
    Open,
    Closed,
    All,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullRequest {
    #[serde(default)]
    pub id: Option<u64>,
    pub number: u64,
    pub state: IssueState,
    pub title: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub diff_url: Option<String>,
    #[serde(default)]
    pub patch_url: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    pub head: PullBranch,
    pub base: PullBranch,
    #[serde(default)]
    pub merged: Option<bool>,
    /// `None` while GitHub is still computing mergeability.
    #[serde(default)]
    pub mergeable: Option<bool>,
    #[serde(default)]
    pub merged_by: Option<GitUser>,
    #[serde(default)]
    pub comments: Option<u64>,
    #[serde(default)]
    pub commits: Option<u64>,
    #[serde(default)]
    pub additions: Option<u64>,
    #[serde(default)]
    pub deletions: Option<u64>,
    #[serde(default)]
    pub changed_files: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub merged_at: Option<DateTime<Utc>>,
}

/// One side of a pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullBranch {
    /// `owner:branch`.
    pub label: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    pub sha: String,
    #[serde(default)]
    pub user: Option<GitUser>,
    /// `None` when the source repository was deleted.
    #[serde(default)]
    pub repo: Option<Repo>,
}

/// What a new pull request is made from.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PullSource {
    /// A fresh pull request with its own title.
    Title {
        title: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        body: Option<String>,
    },
    /// Convert an existing issue into a pull request.
    Issue { issue: u64 },
}

/// Payload for opening a pull request from `head` into `base`.
#[derive(Debug, Clone, Serialize)]
pub struct NewPullRequest {
    pub base: String,
    pub head: String,
    #[serde(flatten)]
    pub source: PullSource,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct PullRequestEdit {
    pub title: Option<String>,
    pub body: Option<String>,
    pub state: Option<IssueState>,
}

/// Result of a merge attempt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PullMerge {
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub merged: bool,
    #[serde(default)]
    pub message: String,
}

/// A review comment on a pull request diff.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewComment {
    pub id: u64,
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub position: Option<u64>,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    #[serde(default)]
    pub in_reply_to_id: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A new review comment: either anchored to a diff position, or a reply.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum NewReviewComment {
    Anchored {
        body: String,
        commit_id: String,
        path: String,
        position: u64,
    },
    Reply {
        body: String,
        in_reply_to: u64,
    },
}

impl NewReviewComment {
    fn check(&self) -> Result<()> {
        match self {
            Self::Anchored {
                body,
                commit_id,
                path,
                ..
            } => require_all(&[("body", body), ("commit_id", commit_id), ("path", path)]),
            Self::Reply { body, .. } => require("body", body),
        }
    }
}

#[derive(Serialize)]
struct MergeMessage<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    commit_message: Option<&'a str>,
}

impl GitHubClient {
    pub async fn list_pull_requests(
        &self,
        repo: &RepoRef,
        state: Option<PullState>,
    ) -> Result<Vec<PullRequest>> {
        #[derive(Serialize)]
        struct Query {
            state: Option<PullState>,
        }
        let path = format!("{}/pulls", self.repo_path(repo)?);
        self.get(&with_query(&path, &Query { state })?).await
    }

    pub async fn get_pull_request(&self, repo: &RepoRef, number: u64) -> Result<PullRequest> {
        self.get(&format!("{}/pulls/{number}", self.repo_path(repo)?))
            .await
    }

    pub async fn create_pull_request(
        &self,
        repo: &RepoRef,
        pull: &NewPullRequest,
    ) -> Result<PullRequest> {
        require_all(&[("base", &pull.base), ("head", &pull.head)])?;
        if let PullSource::Title { title, .. } = &pull.source {
            require("title", title)?;
        }
        let path = format!("{}/pulls", self.repo_path(repo)?);
        self.post(&path, pull, StatusCode::CREATED).await
    }

    pub async fn edit_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
        edit: &PullRequestEdit,
    ) -> Result<PullRequest> {
        if matches!(edit.state, Some(IssueState::All)) {
            return Err(GitHubError::Validation(
                "a pull request can only be set to open or closed".to_string(),
            ));
        }
        self.patch(&format!("{}/pulls/{number}", self.repo_path(repo)?), edit)
            .await
    }

    pub async fn list_pull_commits(&self, repo: &RepoRef, number: u64) -> Result<Vec<Commit>> {
        self.get(&format!("{}/pulls/{number}/commits", self.repo_path(repo)?))
            .await
    }

    pub async fn list_pull_files(&self, repo: &RepoRef, number: u64) -> Result<Vec<CommitFile>> {
        self.get(&format!("{}/pulls/{number}/files", self.repo_path(repo)?))
            .await
    }

    pub async fn is_pull_merged(&self, repo: &RepoRef, number: u64) -> Result<bool> {
        self.exists(&format!("{}/pulls/{number}/merge", self.repo_path(repo)?))
            .await
    }

    /// Merge a pull request. A refused merge (`405`) is not an error: the
    /// result has `merged == false` and GitHub's reason in `message`.
    pub async fn merge_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
        commit_message: Option<&str>,
    ) -> Result<PullMerge> {
        let path = format!("{}/pulls/{number}/merge", self.repo_path(repo)?);
        let body = RequestBody::json(&MergeMessage { commit_message })?;
        self.fetch(
            Method::PUT,
            &path,
            body,
            &[StatusCode::OK, StatusCode::METHOD_NOT_ALLOWED],
        )
        .await
    }

    pub async fn list_review_comments(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<Vec<ReviewComment>> {
        self.get(&format!("{}/pulls/{number}/comments", self.repo_path(repo)?))
            .await
    }

    pub async fn list_repo_review_comments(
        &self,
        repo: &RepoRef,
        options: &CommentListOptions,
    ) -> Result<Vec<ReviewComment>> {
        let path = format!("{}/pulls/comments", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn get_review_comment(&self, repo: &RepoRef, id: u64) -> Result<ReviewComment> {
        self.get(&format!("{}/pulls/comments/{id}", self.repo_path(repo)?))
            .await
    }

    pub async fn create_review_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        comment: &NewReviewComment,
    ) -> Result<ReviewComment> {
        comment.check()?;
        let path = format!("{}/pulls/{number}/comments", self.repo_path(repo)?);
        self.post(&path, comment, StatusCode::CREATED).await
    }

    pub async fn edit_review_comment(
        &self,
        repo: &RepoRef,
        id: u64,
        body: &str,
    ) -> Result<ReviewComment> {
        require("body", body)?;
        let path = format!("{}/pulls/comments/{id}", self.repo_path(repo)?);
        self.patch(&path, &CommentBody { body }).await
    }

    pub async fn delete_review_comment(&self, repo: &RepoRef, id: u64) -> Result<bool> {
        self.delete(&format!("{}/pulls/comments/{id}", self.repo_path(repo)?))
            .await
    }

}

#[async_trait]
impl Get for PullRequest {
    type Id = (RepoRef, u64);

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, id: (RepoRef, u64)) -> Result<Self> {
        let (repo, number) = id;
        client.get_pull_request(&repo, number).await
    }
}

#[async_trait]
impl Update for PullRequest {
    type Id = (RepoRef, u64);
    type Params = PullRequestEdit;

    #[tracing::instrument(skip(client))]
    async fn update(
        client: &GitHubClient,
        id: (RepoRef, u64),
        params: PullRequestEdit,
    ) -> Result<Self> {
        let (repo, number) = id;
        client.edit_pull_request(&repo, number, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_pull_request_from_title() {
        let body = serde_json::to_value(NewPullRequest {
            base: "master".to_string(),
            head: "octocat:new-feature".to_string(),
            source: PullSource::Title {
                title: "Amazing new feature".to_string(),
                body: None,
            },
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "base": "master",
                "head": "octocat:new-feature",
                "title": "Amazing new feature"
            })
        );
    }

    #[test]
    fn test_new_pull_request_from_issue() {
        let body = serde_json::to_value(NewPullRequest {
            base: "master".to_string(),
            head: "fix".to_string(),
            source: PullSource::Issue { issue: 5 },
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({"base": "master", "head": "fix", "issue": 5})
        );
    }

    #[test]
    fn test_review_comment_validation() {
        let reply = NewReviewComment::Reply {
            body: " ".to_string(),
            in_reply_to: 4,
        };
        assert!(reply.check().is_err());

        let anchored = NewReviewComment::Anchored {
            body: "Nice change".to_string(),
            commit_id: "6dcb09b".to_string(),
            path: "file1.txt".to_string(),
            position: 4,
        };
        assert!(anchored.check().is_ok());
    }

    #[test]
    fn test_pull_request_deserialization() {
        let pull: PullRequest = serde_json::from_value(serde_json::json!({
            "number": 1,
            "state": "open",
            "title": "new-feature",
            "head": {"label": "octocat:new-topic", "ref": "new-topic", "sha": "6dcb09b", "repo": null},
            "base": {"label": "octocat:master", "ref": "master", "sha": "6dcb09b"},
            "mergeable": null,
            "merged": false
        }))
        .unwrap();
        assert_eq!(pull.head.ref_name, "new-topic");
        assert!(pull.head.repo.is_none());
        assert_eq!(pull.mergeable, None);
    }
}
