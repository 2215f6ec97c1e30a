//! Low-level git objects: blobs, commits, trees, tags and references.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull};

use crate::client::GitHubClient;
use crate::error::Result;
use crate::models::common::{segment, segments, RepoRef, Signature};
use crate::query::join_query;
use crate::validate::{require, require_all};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Blob {
    pub sha: String,
    #[serde(default)]
    pub content: Option<String>,
    /// `utf-8` or `base64`.
    #[serde(default)]
    pub encoding: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewBlob {
    pub content: String,
    pub encoding: Option<String>,
}

/// Pointer to another git object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectRef {
    pub sha: String,
    #[serde(rename = "type", default)]
    pub object_type: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitCommit {
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub author: Option<Signature>,
    #[serde(default)]
    pub committer: Option<Signature>,
    #[serde(default)]
    pub tree: Option<ObjectRef>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub parents: Vec<ObjectRef>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewGitCommit {
    pub message: String,
    /// SHA of the tree this commit points at.
    pub tree: String,
    pub parents: Vec<String>,
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEntry {
    pub path: String,
    pub sha: String,
    #[serde(default)]
    pub mode: Option<String>,
    /// `blob`, `tree` or `commit`.
    #[serde(rename = "type", default)]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub url: Option<String>,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tree {
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde_as(deserialize_as = "DefaultOnNull")]
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set when a recursive listing hit GitHub's size cap.
    #[serde(default)]
    pub truncated: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTreeEntry {
    pub path: String,
    pub mode: String,
    #[serde(rename = "type")]
    pub entry_type: String,
    pub sha: Option<String>,
    /// Inline content; GitHub creates the blob.
    pub content: Option<String>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTree {
    pub base_tree: Option<String>,
    pub tree: Vec<NewTreeEntry>,
}

/// An annotated tag object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitTag {
    pub tag: String,
    pub sha: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub tagger: Option<Signature>,
    #[serde(default)]
    pub object: Option<ObjectRef>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTag {
    pub tag: String,
    pub message: String,
    /// SHA of the tagged object.
    pub object: String,
    #[serde(rename = "type")]
    pub object_type: String,
    pub tagger: Option<Signature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reference {
    #[serde(rename = "ref")]
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    pub object: ObjectRef,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewRef {
    /// Fully qualified, e.g. `refs/heads/feature`.
    #[serde(rename = "ref")]
    pub name: String,
    pub sha: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RefUpdate {
    pub sha: String,
    pub force: bool,
}

/// `heads/main` and `refs/heads/main` both address the same reference.
fn ref_path(reference: &str) -> String {
    let reference = reference.trim();
    segments(reference.strip_prefix("refs/").unwrap_or(reference))
}

impl GitHubClient {
    pub async fn get_blob(&self, repo: &RepoRef, sha: &str) -> Result<Blob> {
        require("sha", sha)?;
        let path = format!("{}/git/blobs/{}", self.repo_path(repo)?, segment(sha));
        self.get(&path).await
    }

    pub async fn create_blob(&self, repo: &RepoRef, blob: &NewBlob) -> Result<Blob> {
        require("content", &blob.content)?;
        let path = format!("{}/git/blobs", self.repo_path(repo)?);
        self.post(&path, blob, StatusCode::CREATED).await
    }

    pub async fn get_git_commit(&self, repo: &RepoRef, sha: &str) -> Result<GitCommit> {
        require("sha", sha)?;
        let path = format!("{}/git/commits/{}", self.repo_path(repo)?, segment(sha));
        self.get(&path).await
    }

    pub async fn create_git_commit(
        &self,
        repo: &RepoRef,
        commit: &NewGitCommit,
    ) -> Result<GitCommit> {
        require_all(&[("message", &commit.message), ("tree", &commit.tree)])?;
        let path = format!("{}/git/commits", self.repo_path(repo)?);
        self.post(&path, commit, StatusCode::CREATED).await
    }

    pub async fn get_tree(&self, repo: &RepoRef, sha: &str) -> Result<Tree> {
        require("sha", sha)?;
        let path = format!("{}/git/trees/{}", self.repo_path(repo)?, segment(sha));
        self.get(&path).await
    }

    /// Fetch a tree with every nested entry flattened into it.
    pub async fn get_tree_recursive(&self, repo: &RepoRef, sha: &str) -> Result<Tree> {
        require("sha", sha)?;
        let path = format!("{}/git/trees/{}", self.repo_path(repo)?, segment(sha));
        self.get(&join_query(&path, [("recursive", "1")])).await
    }

    pub async fn create_tree(&self, repo: &RepoRef, tree: &NewTree) -> Result<Tree> {
        for entry in &tree.tree {
            require_all(&[
                ("path", &entry.path),
                ("mode", &entry.mode),
                ("type", &entry.entry_type),
            ])?;
        }
        let path = format!("{}/git/trees", self.repo_path(repo)?);
        self.post(&path, tree, StatusCode::CREATED).await
    }

    pub async fn get_tag(&self, repo: &RepoRef, sha: &str) -> Result<GitTag> {
        require("sha", sha)?;
        let path = format!("{}/git/tags/{}", self.repo_path(repo)?, segment(sha));
        self.get(&path).await
    }

    pub async fn create_tag(&self, repo: &RepoRef, tag: &NewTag) -> Result<GitTag> {
        require_all(&[
            ("tag", &tag.tag),
            ("message", &tag.message),
            ("object", &tag.object),
            ("type", &tag.object_type),
        ])?;
        let path = format!("{}/git/tags", self.repo_path(repo)?);
        self.post(&path, tag, StatusCode::CREATED).await
    }

    pub async fn get_ref(&self, repo: &RepoRef, reference: &str) -> Result<Reference> {
        require("ref", reference)?;
        let path = format!("{}/git/refs/{}", self.repo_path(repo)?, ref_path(reference));
        self.get(&path).await
    }

    /// All references, or only those under `namespace` (e.g. `tags`).
    pub async fn list_refs(
        &self,
        repo: &RepoRef,
        namespace: Option<&str>,
    ) -> Result<Vec<Reference>> {
        let mut path = format!("{}/git/refs", self.repo_path(repo)?);
        if let Some(namespace) = namespace.filter(|ns| !ns.trim().is_empty()) {
            path.push('/');
            path.push_str(&ref_path(namespace));
        }
        self.get(&path).await
    }

    pub async fn create_ref(&self, repo: &RepoRef, reference: &NewRef) -> Result<Reference> {
        require_all(&[("ref", &reference.name), ("sha", &reference.sha)])?;
        let path = format!("{}/git/refs", self.repo_path(repo)?);
        self.post(&path, reference, StatusCode::CREATED).await
    }

    pub async fn update_ref(
        &self,
        repo: &RepoRef,
        reference: &str,
        update: &RefUpdate,
    ) -> Result<Reference> {
        require_all(&[("ref", reference), ("sha", &update.sha)])?;
        let path = format!("{}/git/refs/{}", self.repo_path(repo)?, ref_path(reference));
        self.patch(&path, update).await
    }

    pub async fn delete_ref(&self, repo: &RepoRef, reference: &str) -> Result<bool> {
        require("ref", reference)?;
        let path = format!("{}/git/refs/{}", self.repo_path(repo)?, ref_path(reference));
        self.delete(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ref_path_drops_refs_prefix() {
        assert_eq!(ref_path("refs/heads/main"), "heads/main");
        assert_eq!(ref_path("heads/feature/x"), "heads/feature/x");
        assert_eq!(ref_path("tags/v1.0 beta"), "tags/v1.0%20beta");
    }

    #[test]
    fn test_new_tree_body() {
        let tree = NewTree {
            base_tree: None,
            tree: vec![NewTreeEntry {
                path: "src/lib.rs".to_string(),
                mode: "100644".to_string(),
                entry_type: "blob".to_string(),
                sha: None,
                content: Some("pub fn answer() -> u32 { 42 }".to_string()),
            }],
        };
        let body = serde_json::to_value(&tree).unwrap();
        assert!(body.get("base_tree").is_none());
        assert_eq!(body["tree"][0]["type"], "blob");
        assert!(body["tree"][0].get("sha").is_none());
    }

    #[test]
    fn test_reference_deserialization() {
        let reference: Reference = serde_json::from_value(serde_json::json!({
            "ref": "refs/heads/featureA",
            "url": "https://api.github.com/repos/octocat/Hello-World/git/refs/heads/featureA",
            "object": {"type": "commit", "sha": "aa218f56b14c9653891f9e74264a383fa43fefbd"}
        }))
        .unwrap();
        assert_eq!(reference.name, "refs/heads/featureA");
        assert_eq!(reference.object.object_type.as_deref(), Some("commit"));
    }

    #[test]
    fn test_commit_with_null_parents() {
        let commit: GitCommit = serde_json::from_value(serde_json::json!({
            "sha": "7638417db6d59f3c431d3e1f261cc637155684cd",
            "message": "added readme",
            "parents": null
        }))
        .unwrap();
        assert!(commit.parents.is_empty());
    }
}
