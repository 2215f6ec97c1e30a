//! Legacy keyword search.
//!
//! These endpoints wrap their hits in a one-key object; the methods here
//! unwrap it.

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use crate::client::GitHubClient;
use crate::error::{GitHubError, Result};
use crate::models::common::{segment, RepoRef};
use crate::models::issue::IssueState;
use crate::query::{join_query, with_query};
use crate::validate::require;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchIssue {
    pub number: u64,
    pub title: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub position: Option<f64>,
    #[serde(default)]
    pub comments: u64,
    #[serde(default)]
    pub votes: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRepo {
    pub name: String,
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(rename = "type", default)]
    pub repo_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub watchers: u64,
    #[serde(default)]
    pub followers: u64,
    #[serde(default)]
    pub forks: u64,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub open_issues: u64,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub has_downloads: bool,
    #[serde(default)]
    pub has_wiki: bool,
    #[serde(default)]
    pub has_issues: bool,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pushed: Option<String>,
    #[serde(default)]
    pub pushed_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchUser {
    pub login: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fullname: Option<String>,
    /// Legacy ids look like `user-1`.
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub repos: Option<u64>,
    #[serde(default)]
    pub public_repo_count: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub followers_count: Option<u64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub pushed: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSearchSort {
    Stars,
    Forks,
    Updated,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepoSearchOptions {
    pub language: Option<String>,
    pub start_page: Option<u32>,
    pub sort: Option<RepoSearchSort>,
    pub order: Option<crate::models::common::Direction>,
}

#[derive(Deserialize)]
struct IssueHits {
    #[serde(default)]
    issues: Vec<SearchIssue>,
}

#[derive(Deserialize)]
struct RepoHits {
    #[serde(default)]
    repositories: Vec<SearchRepo>,
}

#[derive(Deserialize)]
struct UserHits {
    #[serde(default)]
    users: Vec<SearchUser>,
}

#[derive(Deserialize)]
struct EmailHit {
    #[serde(default)]
    user: Option<SearchUser>,
}

impl GitHubClient {
    /// Search one repository's issues. Only `Open` and `Closed` are accepted.
    pub async fn search_issues(
        &self,
        repo: &RepoRef,
        state: IssueState,
        keyword: &str,
    ) -> Result<Vec<SearchIssue>> {
        require("keyword", keyword)?;
        if state == IssueState::All {
            return Err(GitHubError::Validation(
                "state must be open or closed".to_string(),
            ));
        }
        let (owner, name) = self.resolve_repo(repo)?;
        let path = format!(
            "/legacy/issues/search/{}/{}/{}/{}",
            segment(&owner),
            segment(&name),
            state.as_str(),
            segment(keyword)
        );
        let hits: IssueHits = self.get(&path).await?;
        Ok(hits.issues)
    }

    pub async fn search_repos(
        &self,
        keyword: &str,
        options: &RepoSearchOptions,
    ) -> Result<Vec<SearchRepo>> {
        require("keyword", keyword)?;
        let path = format!("/legacy/repos/search/{}", segment(keyword));
        let hits: RepoHits = self.get(&with_query(&path, options)?).await?;
        Ok(hits.repositories)
    }

    pub async fn search_users(
        &self,
        keyword: &str,
        start_page: Option<u32>,
    ) -> Result<Vec<SearchUser>> {
        require("keyword", keyword)?;
        let mut path = format!("/legacy/user/search/{}", segment(keyword));
        if let Some(page) = start_page {
            path = join_query(&path, [("start_page", page.to_string())]);
        }
        let hits: UserHits = self.get(&path).await?;
        Ok(hits.users)
    }

    /// Look a user up by exact public email.
    pub async fn search_email(&self, email: &str) -> Result<Option<SearchUser>> {
        require("email", email)?;
        let hit: EmailHit = self
            .get(&format!("/legacy/user/email/{}", segment(email)))
            .await?;
        Ok(hit.user)
    }
}
