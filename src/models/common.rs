//! Types and path helpers shared by every resource area.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::client::GitHubClient;
use crate::error::{GitHubError, Result};
use crate::query::join_query;
use crate::validate::{is_present, require, require_all};

/// A repository named by owner and name.
///
/// When `owner` is `None` (or blank) the client's login is used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RepoRef {
    pub owner: Option<String>,
    pub name: String,
}

impl RepoRef {
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: Some(owner.into()),
            name: name.into(),
        }
    }

    /// A repository owned by the acting user.
    pub fn owned(name: impl Into<String>) -> Self {
        Self {
            owner: None,
            name: name.into(),
        }
    }
}

impl FromStr for RepoRef {
    type Err = GitHubError;

    /// Parse `owner/name`, or a bare `name` owned by the acting user.
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.split_once('/') {
            None if is_present(s) => Ok(Self::owned(s)),
            Some((owner, name)) if is_present(owner) && is_present(name) && !name.contains('/') => {
                Ok(Self::new(owner.trim(), name.trim()))
            }
            _ => Err(GitHubError::Validation(format!(
                "'{s}' is not a repository, expected owner/name"
            ))),
        }
    }
}

impl fmt::Display for RepoRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner {
            Some(owner) => write!(f, "{owner}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Compact user record embedded in most payloads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GitUser {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub contributions: Option<u64>,
}

/// Author or committer stamp on a commit, tag or merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    pub name: String,
    pub email: String,
    /// ISO-8601 timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}


/// An SSH key, either a repository deploy key or a user key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Key {
    pub id: u64,
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub verified: Option<bool>,
    #[serde(default)]
    pub read_only: Option<bool>,
}

/// Payload for creating or editing an SSH key.
#[serde_with::skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewKey {
    pub title: Option<String>,
    pub key: String,
    pub read_only: Option<bool>,
}

/// Sort direction shared by list options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

/// Percent-encode one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value.trim()).into_owned()
}

/// Percent-encode a multi-segment value (content paths, git refs), keeping
/// its `/` separators.
pub(crate) fn segments(value: &str) -> String {
    value
        .trim()
        .trim_matches('/')
        .split('/')
        .map(|part| urlencoding::encode(part).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Append `?page=N` when a page was requested.
pub(crate) fn paged(path: &str, page: Option<u32>) -> String {
    match page {
        Some(page) => join_query(path, [("page", page.to_string())]),
        None => path.to_string(),
    }
}

impl GitHubClient {
    /// Owner and name of `repo`, with the owner defaulted to the login.
    pub(crate) fn resolve_repo(&self, repo: &RepoRef) -> Result<(String, String)> {
        let owner = match repo.owner.as_deref() {
            Some(owner) if is_present(owner) => owner,
            _ => self.login(),
        };
        require_all(&[("owner", owner), ("repo", &repo.name)])?;
        Ok((owner.trim().to_string(), repo.name.trim().to_string()))
    }

    /// `/repos/{owner}/{repo}` with both segments encoded.
    pub(crate) fn repo_path(&self, repo: &RepoRef) -> Result<String> {
        let (owner, name) = self.resolve_repo(repo)?;
        Ok(format!("/repos/{}/{}", segment(&owner), segment(&name)))
    }

    /// `user`, or the login when `user` is omitted.
    pub(crate) fn user_or_login(&self, user: Option<&str>) -> Result<String> {
        let user = match user {
            Some(user) if is_present(user) => user,
            _ => self.login(),
        };
        require("user", user)?;
        Ok(user.trim().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repo_ref() {
        let repo: RepoRef = "octocat/hello-world".parse().unwrap();
        assert_eq!(repo, RepoRef::new("octocat", "hello-world"));

        let bare: RepoRef = "hello-world".parse().unwrap();
        assert_eq!(bare.owner, None);
        assert_eq!(bare.to_string(), "hello-world");

        assert!("".parse::<RepoRef>().is_err());
        assert!("octocat/".parse::<RepoRef>().is_err());
        assert!("a/b/c".parse::<RepoRef>().is_err());
    }

    #[test]
    fn test_owner_defaults_to_login() {
        let client = GitHubClient::with_config(
            crate::client::ClientConfig::new("t").with_login("octocat"),
        )
        .unwrap();
        assert_eq!(
            client.repo_path(&RepoRef::owned("linguist")).unwrap(),
            "/repos/octocat/linguist"
        );
        assert_eq!(
            client.repo_path(&RepoRef::new(" ", "linguist")).unwrap(),
            "/repos/octocat/linguist"
        );
        assert_eq!(
            client.repo_path(&RepoRef::new("github", "linguist")).unwrap(),
            "/repos/github/linguist"
        );
    }

    #[test]
    fn test_missing_owner_without_login() {
        let client = GitHubClient::new("t", crate::client::DEFAULT_API_URL).unwrap();
        let err = client.repo_path(&RepoRef::owned("linguist")).unwrap_err();
        assert!(err.to_string().contains("owner"));
    }

    #[test]
    fn test_segments_are_encoded() {
        assert_eq!(segment("my repo"), "my%20repo");
        assert_eq!(segment("a/b"), "a%2Fb");
        assert_eq!(segments("/docs/read me.md"), "docs/read%20me.md");
        assert_eq!(segments("heads/feature/x"), "heads/feature/x");
    }

    #[test]
    fn test_paged() {
        assert_eq!(paged("/events", Some(2)), "/events?page=2");
        assert_eq!(paged("/events", None), "/events");
    }
}
