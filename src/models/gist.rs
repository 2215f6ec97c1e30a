//! Gists and gist comments.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use crate::client::{GitHubClient, RequestBody};
use crate::error::Result;
use crate::models::common::{segment, GitUser};
use crate::models::issue::{Comment, CommentBody};
use crate::query::with_query;
use crate::traits::{Get, Update};
use crate::validate::require;

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Gist {
    pub id: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub public: bool,
    #[serde(default)]
    pub owner: Option<GitUser>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub git_pull_url: Option<String>,
    #[serde(default)]
    pub git_push_url: Option<String>,
    /// Files keyed by file name.
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub files: BTreeMap<String, GistFile>,
    #[serde(default)]
    pub comments: u64,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub forks: Vec<GistFork>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub history: Vec<GistHistory>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFile {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(rename = "type", default)]
    pub mime_type: Option<String>,
    #[serde(default)]
    pub raw_url: Option<String>,
    /// Present when fetching a single gist.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistFork {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GistHistory {
    pub version: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub user: Option<GitUser>,
    #[serde(default)]
    pub committed_at: Option<DateTime<Utc>>,
}

/// Payload for creating or editing a gist.
///
/// On edit, a file mapped to `None` is deleted.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewGist {
    pub description: Option<String>,
    pub public: Option<bool>,
    pub files: BTreeMap<String, Option<NewGistFile>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewGistFile {
    pub content: String,
    /// Rename the file on edit.
    pub filename: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct GistListOptions {
    pub since: Option<DateTime<Utc>>,
    pub page: Option<u32>,
}

#[skip_serializing_none]
#[derive(Serialize)]
struct Since {
    since: Option<DateTime<Utc>>,
}

impl GitHubClient {
    /// Gists of the acting user.
    pub async fn list_gists(&self, options: &GistListOptions) -> Result<Vec<Gist>> {
        self.get(&with_query("/gists", options)?).await
    }

    pub async fn list_starred_gists(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Gist>> {
        self.get(&with_query("/gists/starred", &Since { since })?)
            .await
    }

    pub async fn list_public_gists(&self, since: Option<DateTime<Utc>>) -> Result<Vec<Gist>> {
        self.get(&with_query("/gists/public", &Since { since })?)
            .await
    }

    pub async fn get_gist(&self, id: &str) -> Result<Gist> {
        require("id", id)?;
        self.get(&format!("/gists/{}", segment(id))).await
    }

    pub async fn create_gist(&self, gist: &NewGist) -> Result<Gist> {
        check_gist(gist)?;
        self.post("/gists", gist, StatusCode::CREATED).await
    }

    pub async fn edit_gist(&self, id: &str, gist: &NewGist) -> Result<Gist> {
        require("id", id)?;
        self.patch(&format!("/gists/{}", segment(id)), gist).await
    }

    pub async fn star_gist(&self, id: &str) -> Result<bool> {
        require("id", id)?;
        let path = format!("/gists/{}/star", segment(id));
        self.expect_status(Method::PUT, &path, RequestBody::Empty, StatusCode::NO_CONTENT)
            .await
    }

    /// Unstar a gist; `false` when it was not starred.
    pub async fn unstar_gist(&self, id: &str) -> Result<bool> {
        require("id", id)?;
        let path = format!("/gists/{}/star", segment(id));
        self.status_flag(
            Method::DELETE,
            &path,
            StatusCode::NO_CONTENT,
            StatusCode::NOT_FOUND,
        )
        .await
    }

    pub async fn is_gist_starred(&self, id: &str) -> Result<bool> {
        require("id", id)?;
        self.exists(&format!("/gists/{}/star", segment(id))).await
    }

    pub async fn fork_gist(&self, id: &str) -> Result<Gist> {
        require("id", id)?;
        let path = format!("/gists/{}/forks", segment(id));
        self.fetch(Method::POST, &path, RequestBody::Empty, &[StatusCode::CREATED])
            .await
    }

    pub async fn delete_gist(&self, id: &str) -> Result<bool> {
        require("id", id)?;
        self.delete(&format!("/gists/{}", segment(id))).await
    }

    pub async fn list_gist_comments(&self, gist_id: &str) -> Result<Vec<Comment>> {
        require("gist_id", gist_id)?;
        self.get(&format!("/gists/{}/comments", segment(gist_id)))
            .await
    }

    pub async fn get_gist_comment(&self, gist_id: &str, id: u64) -> Result<Comment> {
        require("gist_id", gist_id)?;
        self.get(&format!("/gists/{}/comments/{id}", segment(gist_id)))
            .await
    }

    pub async fn create_gist_comment(&self, gist_id: &str, body: &str) -> Result<Comment> {
        require("gist_id", gist_id)?;
        require("body", body)?;
        let path = format!("/gists/{}/comments", segment(gist_id));
        self.post(&path, &CommentBody { body }, StatusCode::CREATED)
            .await
    }

    pub async fn edit_gist_comment(&self, gist_id: &str, id: u64, body: &str) -> Result<Comment> {
        require("gist_id", gist_id)?;
        require("body", body)?;
        let path = format!("/gists/{}/comments/{id}", segment(gist_id));
        self.patch(&path, &CommentBody { body }).await
    }

    pub async fn delete_gist_comment(&self, gist_id: &str, id: u64) -> Result<bool> {
        require("gist_id", gist_id)?;
        self.delete(&format!("/gists/{}/comments/{id}", segment(gist_id)))
            .await
    }
}

fn check_gist(gist: &NewGist) -> Result<()> {
    let mut has_file = false;
    for (name, file) in &gist.files {
        require("file name", name)?;
        match file {
            Some(file) => require("file content", &file.content)?,
            None => continue,
        }
        has_file = true;
    }
    if has_file {
        Ok(())
    } else {
        Err(crate::error::GitHubError::Validation(
            "a gist needs at least one file".to_string(),
        ))
    }
}

#[async_trait]
impl Get for Gist {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, id: String) -> Result<Self> {
        client.get_gist(&id).await
    }
}

#[async_trait]
impl Update for Gist {
    type Id = String;
    type Params = NewGist;

    #[tracing::instrument(skip(client))]
    async fn update(client: &GitHubClient, id: String, params: NewGist) -> Result<Self> {
        client.edit_gist(&id, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_file(content: &str) -> NewGist {
        let mut files = BTreeMap::new();
        files.insert(
            "hello.rs".to_string(),
            Some(NewGistFile {
                content: content.to_string(),
                filename: None,
            }),
        );
        NewGist {
            description: Some("demo".to_string()),
            public: Some(true),
            files,
        }
    }

    #[test]
    fn test_check_gist() {
        assert!(check_gist(&NewGist::default()).is_err());
        assert!(check_gist(&one_file("")).is_err());
        assert!(check_gist(&one_file("fn main() {}")).is_ok());
    }

    #[test]
    fn test_new_gist_body_marks_deleted_files() {
        let mut gist = one_file("fn main() {}");
        gist.files.insert("old.txt".to_string(), None);
        let body = serde_json::to_value(&gist).unwrap();
        assert_eq!(body["files"]["old.txt"], serde_json::Value::Null);
        assert_eq!(body["files"]["hello.rs"]["content"], "fn main() {}");
        assert!(body["files"]["hello.rs"].get("filename").is_none());
    }

    #[test]
    fn test_gist_deserialization() {
        let gist: Gist = serde_json::from_value(serde_json::json!({
            "id": "aa5a315d61ae9438b18d",
            "public": true,
            "files": {"ring.erl": {"size": 932, "raw_url": "https://gist.githubusercontent.com/raw/ring.erl", "type": "text/plain", "language": "Erlang"}},
            "comments": 0,
            "forks": null,
            "created_at": "2010-04-14T02:15:15Z"
        }))
        .unwrap();
        assert_eq!(gist.files["ring.erl"].size, 932);
        assert!(gist.forks.is_empty());
    }
}
