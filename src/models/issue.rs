//! Issues, milestones, labels, comments and issue events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use crate::client::{GitHubClient, RequestBody};
use crate::error::Result;
use crate::models::common::{paged, segment, Direction, GitUser, RepoRef};
use crate::query::with_query;
use crate::traits::{Get, Update};
use crate::validate::{require, require_all, require_non_empty};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Open,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// A GitHub issue. Pull requests show up here too, with `pull_request` set.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub id: Option<u64>,
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub assignee: Option<GitUser>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub pull_request: Option<IssuePullLinks>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuePullLinks {
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub diff_url: Option<String>,
    #[serde(default)]
    pub patch_url: Option<String>,
}

/// Which issues `/issues` returns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueFilter {
    #[default]
    Assigned,
    Created,
    Mentioned,
    Subscribed,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSort {
    Created,
    Updated,
    Comments,
}

/// Options for the cross-repository issue lists.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueListOptions {
    pub filter: IssueFilter,
    pub state: Option<IssueState>,
    pub labels: Option<Vec<String>>,
    pub sort: Option<IssueSort>,
    pub direction: Option<Direction>,
    pub since: Option<DateTime<Utc>>,
    pub page: Option<u32>,
}

/// Options for a single repository's issue list.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoIssueListOptions {
    /// Milestone number, `*` or `none`.
    pub milestone: Option<String>,
    pub state: Option<IssueState>,
    /// Login, `*` or `none`.
    pub assignee: Option<String>,
    pub creator: Option<String>,
    pub mentioned: Option<String>,
    pub labels: Option<Vec<String>>,
    pub sort: Option<IssueSort>,
    pub direction: Option<Direction>,
    pub since: Option<DateTime<Utc>>,
    pub page: Option<u32>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewIssue {
    pub title: String,
    pub body: Option<String>,
    pub assignee: Option<String>,
    pub milestone: Option<u64>,
    pub labels: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct IssueEdit {
    pub title: Option<String>,
    pub body: Option<String>,
    pub assignee: Option<String>,
    pub state: Option<IssueState>,
    pub milestone: Option<u64>,
    pub labels: Option<Vec<String>>,
}

/// Something that happened to an issue: closed, referenced, labeled...
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueEvent {
    pub id: u64,
    pub event: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub actor: Option<GitUser>,
    #[serde(default)]
    pub commit_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub issue: Option<Box<Issue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Milestone {
    pub number: u64,
    pub title: String,
    pub state: IssueState,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<GitUser>,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub closed_issues: u64,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_on: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MilestoneSort {
    DueDate,
    Completeness,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MilestoneListOptions {
    pub state: Option<IssueState>,
    pub sort: Option<MilestoneSort>,
    pub direction: Option<Direction>,
}

/// Payload for creating or updating a milestone.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewMilestone {
    pub title: String,
    pub state: Option<IssueState>,
    pub description: Option<String>,
    pub due_on: Option<DateTime<Utc>>,
}

/// A comment on an issue or gist.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: u64,
    pub body: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentSort {
    Created,
    Updated,
}

/// Options for the repository-wide comment lists.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommentListOptions {
    pub sort: Option<CommentSort>,
    pub direction: Option<Direction>,
    pub since: Option<DateTime<Utc>>,
}

/// Body of a comment create or edit.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct CommentBody<'a> {
    pub body: &'a str,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Label {
    pub name: String,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Payload for creating or updating a label. `color` is six hex digits
/// without the leading `#`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewLabel {
    pub name: String,
    pub color: String,
}

impl GitHubClient {
    /// Issues assigned to the acting user across visible repositories.
    pub async fn list_issues(&self, options: &IssueListOptions) -> Result<Vec<Issue>> {
        self.get(&with_query("/issues", options)?).await
    }

    /// Issues across the acting user's own and member repositories.
    pub async fn list_user_issues(&self, options: &IssueListOptions) -> Result<Vec<Issue>> {
        self.get(&with_query("/user/issues", options)?).await
    }

    pub async fn list_org_issues(
        &self,
        org: &str,
        options: &IssueListOptions,
    ) -> Result<Vec<Issue>> {
        require("org", org)?;
        let path = format!("/orgs/{}/issues", segment(org));
        self.get(&with_query(&path, options)?).await
    }

    pub async fn list_repo_issues(
        &self,
        repo: &RepoRef,
        options: &RepoIssueListOptions,
    ) -> Result<Vec<Issue>> {
        let path = format!("{}/issues", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn get_issue(&self, repo: &RepoRef, number: u64) -> Result<Issue> {
        self.get(&format!("{}/issues/{number}", self.repo_path(repo)?))
            .await
    }

    pub async fn create_issue(&self, repo: &RepoRef, issue: &NewIssue) -> Result<Issue> {
        require("title", &issue.title)?;
        let path = format!("{}/issues", self.repo_path(repo)?);
        self.post(&path, issue, StatusCode::CREATED).await
    }

    pub async fn edit_issue(&self, repo: &RepoRef, number: u64, edit: &IssueEdit) -> Result<Issue> {
        self.patch(&format!("{}/issues/{number}", self.repo_path(repo)?), edit)
            .await
    }

    /// Users that issues in `repo` may be assigned to.
    pub async fn list_assignees(&self, repo: &RepoRef) -> Result<Vec<GitUser>> {
        self.get(&format!("{}/assignees", self.repo_path(repo)?))
            .await
    }

    pub async fn check_assignee(&self, repo: &RepoRef, assignee: &str) -> Result<bool> {
        require("assignee", assignee)?;
        let path = format!("{}/assignees/{}", self.repo_path(repo)?, segment(assignee));
        self.exists(&path).await
    }

    pub async fn list_issue_events(
        &self,
        repo: &RepoRef,
        number: u64,
        page: Option<u32>,
    ) -> Result<Vec<IssueEvent>> {
        let path = format!("{}/issues/{number}/events", self.repo_path(repo)?);
        self.get(&paged(&path, page)).await
    }

    pub async fn list_repo_issue_events(
        &self,
        repo: &RepoRef,
        page: Option<u32>,
    ) -> Result<Vec<IssueEvent>> {
        let path = format!("{}/issues/events", self.repo_path(repo)?);
        self.get(&paged(&path, page)).await
    }

    pub async fn get_issue_event(&self, repo: &RepoRef, id: u64) -> Result<IssueEvent> {
        self.get(&format!("{}/issues/events/{id}", self.repo_path(repo)?))
            .await
    }

    pub async fn list_milestones(
        &self,
        repo: &RepoRef,
        options: &MilestoneListOptions,
    ) -> Result<Vec<Milestone>> {
        let path = format!("{}/milestones", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn get_milestone(&self, repo: &RepoRef, number: u64) -> Result<Milestone> {
        self.get(&format!("{}/milestones/{number}", self.repo_path(repo)?))
            .await
    }

    pub async fn create_milestone(
        &self,
        repo: &RepoRef,
        milestone: &NewMilestone,
    ) -> Result<Milestone> {
        require("title", &milestone.title)?;
        let path = format!("{}/milestones", self.repo_path(repo)?);
        self.post(&path, milestone, StatusCode::CREATED).await
    }

    pub async fn update_milestone(
        &self,
        repo: &RepoRef,
        number: u64,
        milestone: &NewMilestone,
    ) -> Result<Milestone> {
        require("title", &milestone.title)?;
        let path = format!("{}/milestones/{number}", self.repo_path(repo)?);
        self.patch(&path, milestone).await
    }

    pub async fn delete_milestone(&self, repo: &RepoRef, number: u64) -> Result<bool> {
        self.delete(&format!("{}/milestones/{number}", self.repo_path(repo)?))
            .await
    }

    /// Labels of the issues in a milestone.
    pub async fn list_milestone_labels(&self, repo: &RepoRef, number: u64) -> Result<Vec<Label>> {
        self.get(&format!("{}/milestones/{number}/labels", self.repo_path(repo)?))
            .await
    }

    pub async fn list_issue_comments(&self, repo: &RepoRef, number: u64) -> Result<Vec<Comment>> {
        self.get(&format!("{}/issues/{number}/comments", self.repo_path(repo)?))
            .await
    }

    pub async fn list_repo_issue_comments(
        &self,
        repo: &RepoRef,
        options: &CommentListOptions,
    ) -> Result<Vec<Comment>> {
        let path = format!("{}/issues/comments", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn get_issue_comment(&self, repo: &RepoRef, id: u64) -> Result<Comment> {
        self.get(&format!("{}/issues/comments/{id}", self.repo_path(repo)?))
            .await
    }

    pub async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        number: u64,
        body: &str,
    ) -> Result<Comment> {
        require("body", body)?;
        let path = format!("{}/issues/{number}/comments", self.repo_path(repo)?);
        self.post(&path, &CommentBody { body }, StatusCode::CREATED)
            .await
    }

    pub async fn edit_issue_comment(&self, repo: &RepoRef, id: u64, body: &str) -> Result<Comment> {
        require("body", body)?;
        let path = format!("{}/issues/comments/{id}", self.repo_path(repo)?);
        self.patch(&path, &CommentBody { body }).await
    }

    pub async fn delete_issue_comment(&self, repo: &RepoRef, id: u64) -> Result<bool> {
        self.delete(&format!("{}/issues/comments/{id}", self.repo_path(repo)?))
            .await
    }

    pub async fn list_labels(&self, repo: &RepoRef) -> Result<Vec<Label>> {
        self.get(&format!("{}/labels", self.repo_path(repo)?)).await
    }

    pub async fn get_label(&self, repo: &RepoRef, name: &str) -> Result<Label> {
        require("name", name)?;
        self.get(&format!("{}/labels/{}", self.repo_path(repo)?, segment(name)))
            .await
    }

    pub async fn create_label(&self, repo: &RepoRef, label: &NewLabel) -> Result<Label> {
        require_all(&[("name", &label.name), ("color", &label.color)])?;
        let path = format!("{}/labels", self.repo_path(repo)?);
        self.post(&path, label, StatusCode::CREATED).await
    }

    pub async fn update_label(&self, repo: &RepoRef, name: &str, label: &NewLabel) -> Result<Label> {
        require_all(&[
            ("current name", name),
            ("name", &label.name),
            ("color", &label.color),
        ])?;
        let path = format!("{}/labels/{}", self.repo_path(repo)?, segment(name));
        self.patch(&path, label).await
    }

    pub async fn delete_label(&self, repo: &RepoRef, name: &str) -> Result<bool> {
        require("name", name)?;
        self.delete(&format!("{}/labels/{}", self.repo_path(repo)?, segment(name)))
            .await
    }

    pub async fn list_issue_labels(&self, repo: &RepoRef, number: u64) -> Result<Vec<Label>> {
        self.get(&format!("{}/issues/{number}/labels", self.repo_path(repo)?))
            .await
    }

    /// Add labels to an issue; returns the issue's full label set.
    pub async fn add_issue_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        require_non_empty("labels", labels)?;
        let path = format!("{}/issues/{number}/labels", self.repo_path(repo)?);
        self.post(&path, labels, StatusCode::OK).await
    }

    pub async fn remove_issue_label(&self, repo: &RepoRef, number: u64, name: &str) -> Result<bool> {
        require("name", name)?;
        let path = format!(
            "{}/issues/{number}/labels/{}",
            self.repo_path(repo)?,
            segment(name)
        );
        self.delete(&path).await
    }

    /// Replace every label on an issue. An empty list clears them.
    pub async fn replace_issue_labels(
        &self,
        repo: &RepoRef,
        number: u64,
        labels: &[String],
    ) -> Result<Vec<Label>> {
        let path = format!("{}/issues/{number}/labels", self.repo_path(repo)?);
        self.put(&path, labels, StatusCode::OK).await
    }

    pub async fn remove_all_issue_labels(&self, repo: &RepoRef, number: u64) -> Result<bool> {
        let path = format!("{}/issues/{number}/labels", self.repo_path(repo)?);
        self.expect_status(Method::DELETE, &path, RequestBody::Empty, StatusCode::NO_CONTENT)
            .await
    }
}

#[async_trait]
impl Get for Issue {
    type Id = (RepoRef, u64);

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, id: (RepoRef, u64)) -> Result<Self> {
        let (repo, number) = id;
        client.get_issue(&repo, number).await
    }
}

#[async_trait]
impl Update for Issue {
    type Id = (RepoRef, u64);
    type Params = IssueEdit;

    #[tracing::instrument(skip(client))]
    async fn update(
        client: &GitHubClient,
        id: (RepoRef, u64),
        params: IssueEdit,
    ) -> Result<Self> {
        let (repo, number) = id;
        client.edit_issue(&repo, number, &params).await
    }
}

#[async_trait]
impl Get for Milestone {
    type Id = (RepoRef, u64);

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, id: (RepoRef, u64)) -> Result<Self> {
        let (repo, number) = id;
        client.get_milestone(&repo, number).await
    }
}

#[async_trait]
impl Update for Milestone {
    type Id = (RepoRef, u64);
    type Params = NewMilestone;

    #[tracing::instrument(skip(client))]
    async fn update(
        client: &GitHubClient,
        id: (RepoRef, u64),
        params: NewMilestone,
    ) -> Result<Self> {
        let (repo, number) = id;
        client.update_milestone(&repo, number, &params).await
    }
}
