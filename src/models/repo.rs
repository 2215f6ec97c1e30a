//! Repository model and endpoints.

use std::collections::BTreeMap;
use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, Response, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;

use crate::client::{extract_error_message, hide_url, unexpected_status, GitHubClient, RequestBody};
use crate::error::{GitHubError, Result};
use crate::models::common::{
    segment, segments, Direction, GitUser, Key, NewKey, RepoRef, Signature,
};
use crate::models::org::Team;
use crate::query::{join_query, with_query};
use crate::traits::{Get, Update};
use crate::validate::{is_present, require, require_all};

/// A GitHub repository.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub owner: Option<GitUser>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub clone_url: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub ssh_url: Option<String>,
    #[serde(default)]
    pub svn_url: Option<String>,
    #[serde(default)]
    pub mirror_url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub forks_count: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub watchers_count: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub open_issues_count: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub default_branch: Option<String>,
    /// Legacy name of `default_branch`.
    #[serde(default)]
    pub master_branch: Option<String>,
    #[serde(default)]
    pub has_issues: Option<bool>,
    #[serde(default)]
    pub has_wiki: Option<bool>,
    #[serde(default)]
    pub has_downloads: Option<bool>,
    #[serde(default)]
    pub permissions: Option<RepoPermissions>,
    #[serde(default)]
    pub organization: Option<GitUser>,
    #[serde(default)]
    pub parent: Option<Box<Repo>>,
    #[serde(default)]
    pub source: Option<Box<Repo>>,
    #[serde(default)]
    pub pushed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Repo {
    /// `owner/name`, built from the owner when `full_name` is absent.
    pub fn full_name(&self) -> String {
        match (&self.full_name, &self.owner) {
            (Some(full), _) => full.clone(),
            (None, Some(owner)) => format!("{}/{}", owner.login, self.name),
            (None, None) => self.name.clone(),
        }
    }

    /// The [`RepoRef`] addressing this repository.
    pub fn repo_ref(&self) -> RepoRef {
        match &self.owner {
            Some(owner) => RepoRef::new(owner.login.clone(), self.name.clone()),
            None => RepoRef::owned(self.name.clone()),
        }
    }
}

/// Caller's permissions on a repository.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoPermissions {
    #[serde(default)]
    pub admin: bool,
    #[serde(default)]
    pub push: bool,
    #[serde(default)]
    pub pull: bool,
}

/// Repository visibility filter for list endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoType {
    All,
    Owner,
    Public,
    Private,
    Member,
    Forks,
    Sources,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RepoSort {
    Created,
    Updated,
    Pushed,
    FullName,
}

/// Options for the repository list endpoints.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoListOptions {
    #[serde(rename = "type")]
    pub repo_type: Option<RepoType>,
    pub sort: Option<RepoSort>,
    pub direction: Option<Direction>,
    pub page: Option<u32>,
}

/// Payload for creating a repository.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRepo {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub private: Option<bool>,
    pub has_issues: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_downloads: Option<bool>,
    pub team_id: Option<u64>,
    pub auto_init: Option<bool>,
    pub gitignore_template: Option<String>,
}

/// Payload for editing a repository. GitHub requires `name` even when it
/// does not change.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoEdit {
    pub name: String,
    pub description: Option<String>,
    pub homepage: Option<String>,
    pub private: Option<bool>,
    pub has_issues: Option<bool>,
    pub has_wiki: Option<bool>,
    pub has_downloads: Option<bool>,
    pub default_branch: Option<String>,
}

/// Pointer to a commit: sha plus API url.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRef {
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub protected: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub commit: CommitRef,
    #[serde(default)]
    pub zipball_url: Option<String>,
    #[serde(default)]
    pub tarball_url: Option<String>,
}

/// A file, directory, symlink or submodule entry from the contents API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub size: u64,
    /// Base64 body; only present for single files.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub git_url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Result of the contents endpoint: one file or a directory listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Contents {
    Directory(Vec<Content>),
    File(Box<Content>),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ArchiveFormat {
    #[default]
    Zipball,
    Tarball,
}

impl ArchiveFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Zipball => "zipball",
            Self::Tarball => "tarball",
        }
    }

    /// File extension of saved archives.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Zipball => ".zip",
            Self::Tarball => ".tar.gz",
        }
    }
}

/// Which archive to download. Without a `reference` GitHub serves the
/// default branch.
#[derive(Debug, Clone, Default)]
pub struct ArchiveRequest {
    pub format: ArchiveFormat,
    pub reference: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ForkSort {
    Newest,
    Oldest,
    Stargazers,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct ForkListOptions {
    pub sort: Option<ForkSort>,
    pub page: Option<u32>,
}

/// A commit as returned by the repository commits API.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commit {
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    pub commit: CommitDetail,
    #[serde(default)]
    pub author: Option<GitUser>,
    #[serde(default)]
    pub committer: Option<GitUser>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub parents: Vec<CommitRef>,
    #[serde(default)]
    pub stats: Option<CommitStats>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub files: Vec<CommitFile>,
}

/// The git-level part of a [`Commit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitDetail {
    pub message: String,
    #[serde(default)]
    pub author: Option<Signature>,
    #[serde(default)]
    pub committer: Option<Signature>,
    #[serde(default)]
    pub tree: Option<CommitRef>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub comment_count: Option<u64>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitStats {
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub total: u64,
}

/// A file touched by a commit or pull request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitFile {
    pub filename: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub additions: u64,
    #[serde(default)]
    pub deletions: u64,
    #[serde(default)]
    pub changes: u64,
    #[serde(default)]
    pub sha: Option<String>,
    #[serde(default)]
    pub blob_url: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    #[serde(default)]
    pub patch: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct CommitListOptions {
    /// Branch name or sha to start listing from.
    pub sha: Option<String>,
    pub path: Option<String>,
    pub author: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub until: Option<DateTime<Utc>>,
    pub page: Option<u32>,
}

/// Payload for merging `head` into `base`.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct MergeRequest {
    pub base: String,
    pub head: String,
    pub commit_message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusState {
    Pending,
    Success,
    Error,
    Failure,
}

/// A commit status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Status {
    pub id: u64,
    pub state: StatusState,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub target_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
    #[serde(default)]
    pub creator: Option<GitUser>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct NewStatus {
    pub state: StatusState,
    pub target_url: Option<String>,
    pub description: Option<String>,
    pub context: Option<String>,
}

/// A repository webhook.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hook {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub events: Vec<String>,
    #[serde(default)]
    pub active: bool,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub config: BTreeMap<String, serde_json::Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Payload for creating or editing a webhook.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewHook {
    pub name: String,
    pub config: BTreeMap<String, String>,
    pub events: Option<Vec<String>>,
    pub active: Option<bool>,
}

#[derive(Serialize)]
struct ForkTarget<'a> {
    organization: &'a str,
}

impl GitHubClient {
    /// List repositories of the acting user.
    pub async fn list_user_repos(&self, options: &RepoListOptions) -> Result<Vec<Repo>> {
        self.get(&with_query("/user/repos", options)?).await
    }

    /// List public repositories of `user`.
    pub async fn list_repos_for_user(
        &self,
        user: &str,
        options: &RepoListOptions,
    ) -> Result<Vec<Repo>> {
        require("user", user)?;
        let path = format!("/users/{}/repos", segment(user));
        self.get(&with_query(&path, options)?).await
    }

    pub async fn list_org_repos(&self, org: &str, repo_type: Option<RepoType>) -> Result<Vec<Repo>> {
        require("org", org)?;
        #[derive(Serialize)]
        struct Query {
            #[serde(rename = "type")]
            repo_type: Option<RepoType>,
        }
        let path = format!("/orgs/{}/repos", segment(org));
        self.get(&with_query(&path, &Query { repo_type })?).await
    }

    pub async fn get_repo(&self, repo: &RepoRef) -> Result<Repo> {
        self.get(&self.repo_path(repo)?).await
    }

    /// Create a repository for the acting user.
    pub async fn create_repo(&self, new_repo: &NewRepo) -> Result<Repo> {
        require("name", &new_repo.name)?;
        self.post("/user/repos", new_repo, StatusCode::CREATED).await
    }

    pub async fn create_org_repo(&self, org: &str, new_repo: &NewRepo) -> Result<Repo> {
        require_all(&[("org", org), ("name", &new_repo.name)])?;
        let path = format!("/orgs/{}/repos", segment(org));
        self.post(&path, new_repo, StatusCode::CREATED).await
    }

    pub async fn edit_repo(&self, repo: &RepoRef, edit: &RepoEdit) -> Result<Repo> {
        require("name", &edit.name)?;
        self.patch(&self.repo_path(repo)?, edit).await
    }

    pub async fn delete_repo(&self, repo: &RepoRef) -> Result<()> {
        self.delete(&self.repo_path(repo)?).await.map(|_| ())
    }

    /// List contributors; `anon` includes commits without a GitHub account.
    pub async fn list_contributors(&self, repo: &RepoRef, anon: bool) -> Result<Vec<GitUser>> {
        let path = format!("{}/contributors", self.repo_path(repo)?);
        let path = if anon {
            join_query(&path, [("anon", "1")])
        } else {
            path
        };
        self.get(&path).await
    }

    /// Bytes of code per language.
    pub async fn list_languages(&self, repo: &RepoRef) -> Result<BTreeMap<String, u64>> {
        self.get(&format!("{}/languages", self.repo_path(repo)?)).await
    }

    pub async fn list_repo_teams(&self, repo: &RepoRef) -> Result<Vec<Team>> {
        self.get(&format!("{}/teams", self.repo_path(repo)?)).await
    }

    pub async fn list_tags(&self, repo: &RepoRef) -> Result<Vec<Tag>> {
        self.get(&format!("{}/tags", self.repo_path(repo)?)).await
    }

    pub async fn list_branches(&self, repo: &RepoRef) -> Result<Vec<Branch>> {
        self.get(&format!("{}/branches", self.repo_path(repo)?)).await
    }

    pub async fn get_branch(&self, repo: &RepoRef, branch: &str) -> Result<Branch> {
        require("branch", branch)?;
        let path = format!("{}/branches/{}", self.repo_path(repo)?, segment(branch));
        self.get(&path).await
    }

    /// Fetch a file or directory listing at `path`, optionally at `reference`.
    pub async fn get_contents(
        &self,
        repo: &RepoRef,
        path: &str,
        reference: Option<&str>,
    ) -> Result<Contents> {
        let mut url = format!("{}/contents/{}", self.repo_path(repo)?, segments(path));
        if let Some(reference) = reference.filter(|r| is_present(r)) {
            url = join_query(&url, [("ref", reference)]);
        }
        self.get(&url).await
    }

    pub async fn get_readme(&self, repo: &RepoRef) -> Result<Content> {
        self.get(&format!("{}/readme", self.repo_path(repo)?)).await
    }

    /// Download a zipball or tarball into the archive directory.
    ///
    /// The file is named `{owner}-{repo}-{ref}{ext}`, or `{owner}-{repo}{ext}`
    /// for the default branch. `/` in any part becomes `-`, so the file always
    /// lands directly in the archive directory. GitHub answers with a redirect
    /// to the archive host, which is followed once. Returns the path of the
    /// saved file.
    #[tracing::instrument(skip(self))]
    pub async fn download_archive(
        &self,
        repo: &RepoRef,
        request: &ArchiveRequest,
    ) -> Result<PathBuf> {
        let (owner, name) = self.resolve_repo(repo)?;
        let reference = request
            .reference
            .as_deref()
            .map(str::trim)
            .filter(|r| !r.is_empty());
        let mut path = format!("{}/{}", self.repo_path(repo)?, request.format.as_str());
        if let Some(reference) = reference {
            path.push('/');
            path.push_str(&segments(reference));
        }

        let mut response = self.send(Method::GET, &path, RequestBody::Empty).await?;
        if response.status().is_redirection() {
            self.record_headers(&response);
            let target = self.redirect_target(&response)?;
            response = self.send_to(target).await?;
        }
        if response.status() != StatusCode::OK {
            return Err(unexpected_status(response, &[StatusCode::OK]).await);
        }

        tokio::fs::create_dir_all(self.archive_dir()).await?;
        let mut parts = vec![file_part(&owner), file_part(&name)];
        parts.extend(reference.map(file_part));
        let file_name = format!("{}{}", parts.join("-"), request.format.extension());
        let target = self.archive_dir().join(file_name);

        let mut file = File::create(&target).await?;
        match copy_body(&mut response, &mut file).await {
            Ok(bytes) => {
                tracing::debug!(bytes, path = %target.display(), "archive saved");
                Ok(target)
            }
            Err(err) => {
                drop(file);
                if let Err(cleanup) = tokio::fs::remove_file(&target).await {
                    tracing::warn!(error = %cleanup, "failed to remove partial archive");
                }
                Err(err)
            }
        }
    }

    pub async fn list_collaborators(&self, repo: &RepoRef) -> Result<Vec<GitUser>> {
        self.get(&format!("{}/collaborators", self.repo_path(repo)?)).await
    }

    pub async fn is_collaborator(&self, repo: &RepoRef, user: &str) -> Result<bool> {
        require("user", user)?;
        let path = format!("{}/collaborators/{}", self.repo_path(repo)?, segment(user));
        self.exists(&path).await
    }

    /// Add a collaborator. `false` means GitHub does not know the user.
    pub async fn add_collaborator(&self, repo: &RepoRef, user: &str) -> Result<bool> {
        require("user", user)?;
        let path = format!("{}/collaborators/{}", self.repo_path(repo)?, segment(user));
        self.status_flag(Method::PUT, &path, StatusCode::NO_CONTENT, StatusCode::NOT_FOUND)
            .await
    }

    pub async fn remove_collaborator(&self, repo: &RepoRef, user: &str) -> Result<bool> {
        require("user", user)?;
        let path = format!("{}/collaborators/{}", self.repo_path(repo)?, segment(user));
        self.delete(&path).await
    }

    pub async fn list_forks(&self, repo: &RepoRef, options: &ForkListOptions) -> Result<Vec<Repo>> {
        let path = format!("{}/forks", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    /// Fork into the acting user's account, or into `org` when given.
    ///
    /// GitHub forks asynchronously and answers `202 Accepted`.
    pub async fn create_fork(&self, repo: &RepoRef, org: Option<&str>) -> Result<Repo> {
        let path = format!("{}/forks", self.repo_path(repo)?);
        let body = match org.filter(|o| is_present(o)) {
            Some(org) => RequestBody::json(&ForkTarget {
                organization: org.trim(),
            })?,
            None => RequestBody::Empty,
        };
        self.fetch(Method::POST, &path, body, &[StatusCode::ACCEPTED])
            .await
    }

    pub async fn list_deploy_keys(&self, repo: &RepoRef) -> Result<Vec<Key>> {
        self.get(&format!("{}/keys", self.repo_path(repo)?)).await
    }

    pub async fn get_deploy_key(&self, repo: &RepoRef, id: u64) -> Result<Key> {
        self.get(&format!("{}/keys/{id}", self.repo_path(repo)?)).await
    }

    pub async fn create_deploy_key(&self, repo: &RepoRef, key: &NewKey) -> Result<Key> {
        require("key", &key.key)?;
        let path = format!("{}/keys", self.repo_path(repo)?);
        self.post(&path, key, StatusCode::CREATED).await
    }

    pub async fn edit_deploy_key(&self, repo: &RepoRef, id: u64, key: &NewKey) -> Result<Key> {
        require("key", &key.key)?;
        self.patch(&format!("{}/keys/{id}", self.repo_path(repo)?), key)
            .await
    }

    pub async fn delete_deploy_key(&self, repo: &RepoRef, id: u64) -> Result<bool> {
        self.delete(&format!("{}/keys/{id}", self.repo_path(repo)?))
            .await
    }

    pub async fn list_commits(
        &self,
        repo: &RepoRef,
        options: &CommitListOptions,
    ) -> Result<Vec<Commit>> {
        let path = format!("{}/commits", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn get_commit(&self, repo: &RepoRef, sha: &str) -> Result<Commit> {
        require("sha", sha)?;
        self.get(&format!("{}/commits/{}", self.repo_path(repo)?, segment(sha)))
            .await
    }

    /// Merge `head` into `base` on the server.
    ///
    /// Returns the merge commit, or `None` when `base` already contains
    /// `head`. A conflict or a missing ref fails with
    /// [`GitHubError::MergeFailed`] carrying GitHub's message.
    #[tracing::instrument(skip(self))]
    pub async fn merge(&self, repo: &RepoRef, request: &MergeRequest) -> Result<Option<Commit>> {
        require_all(&[("base", &request.base), ("head", &request.head)])?;
        let path = format!("{}/merges", self.repo_path(repo)?);
        let response = self
            .send(Method::POST, &path, RequestBody::json(request)?)
            .await?;

        match response.status() {
            StatusCode::CREATED => self.read_response(response).await.map(Some),
            StatusCode::NO_CONTENT => {
                self.record_headers(&response);
                Ok(None)
            }
            status @ (StatusCode::CONFLICT | StatusCode::NOT_FOUND) => {
                self.record_headers(&response);
                let message = extract_error_message(response)
                    .await
                    .unwrap_or_else(|| status.to_string());
                Err(GitHubError::MergeFailed {
                    status: status.as_u16(),
                    message,
                })
            }
            _ => Err(unexpected_status(
                response,
                &[
                    StatusCode::CREATED,
                    StatusCode::NO_CONTENT,
                    StatusCode::CONFLICT,
                    StatusCode::NOT_FOUND,
                ],
            )
            .await),
        }
    }

    pub async fn list_statuses(&self, repo: &RepoRef, sha: &str) -> Result<Vec<Status>> {
        require("sha", sha)?;
        self.get(&format!("{}/statuses/{}", self.repo_path(repo)?, segment(sha)))
            .await
    }

    pub async fn create_status(&self, repo: &RepoRef, sha: &str, status: &NewStatus) -> Result<Status> {
        require("sha", sha)?;
        let path = format!("{}/statuses/{}", self.repo_path(repo)?, segment(sha));
        self.post(&path, status, StatusCode::CREATED).await
    }

    pub async fn list_hooks(&self, repo: &RepoRef) -> Result<Vec<Hook>> {
        self.get(&format!("{}/hooks", self.repo_path(repo)?)).await
    }

    pub async fn get_hook(&self, repo: &RepoRef, id: u64) -> Result<Hook> {
        self.get(&format!("{}/hooks/{id}", self.repo_path(repo)?)).await
    }

    pub async fn create_hook(&self, repo: &RepoRef, hook: &NewHook) -> Result<Hook> {
        check_hook(hook)?;
        let path = format!("{}/hooks", self.repo_path(repo)?);
        self.post(&path, hook, StatusCode::CREATED).await
    }

    pub async fn edit_hook(&self, repo: &RepoRef, id: u64, hook: &NewHook) -> Result<Hook> {
        check_hook(hook)?;
        self.patch(&format!("{}/hooks/{id}", self.repo_path(repo)?), hook)
            .await
    }

    /// Ask GitHub to deliver a test push event to the hook.
    pub async fn test_hook(&self, repo: &RepoRef, id: u64) -> Result<bool> {
        let path = format!("{}/hooks/{id}/tests", self.repo_path(repo)?);
        self.expect_status(Method::POST, &path, RequestBody::Empty, StatusCode::NO_CONTENT)
            .await
    }

    pub async fn delete_hook(&self, repo: &RepoRef, id: u64) -> Result<bool> {
        self.delete(&format!("{}/hooks/{id}", self.repo_path(repo)?))
            .await
    }
}

fn check_hook(hook: &NewHook) -> Result<()> {
    require("name", &hook.name)?;
    if hook.config.is_empty() {
        return Err(GitHubError::Validation(
            "missing required value for config".to_string(),
        ));
    }
    Ok(())
}

/// One `-`-joined piece of an archive file name.
fn file_part(part: &str) -> String {
    part.trim().replace(&['/', '\\'][..], "-")
}

async fn copy_body(response: &mut Response, file: &mut File) -> Result<u64> {
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await.map_err(hide_url)? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

#[async_trait]
impl Get for Repo {
    type Id = RepoRef;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, repo: RepoRef) -> Result<Self> {
        client.get_repo(&repo).await
    }
}

#[async_trait]
impl Update for Repo {
    type Id = RepoRef;
    type Params = RepoEdit;

    #[tracing::instrument(skip(client))]
    async fn update(client: &GitHubClient, repo: RepoRef, params: RepoEdit) -> Result<Self> {
        client.edit_repo(&repo, &params).await
    }
}
