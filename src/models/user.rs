//! Users: profile, emails, SSH keys and followers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};

use crate::client::{GitHubClient, RequestBody};
use crate::error::Result;
use crate::models::common::{segment, GitUser, Key, NewKey};
use crate::traits::Get;
use crate::validate::{require, require_non_empty};

/// Full user profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub hireable: Option<bool>,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub gravatar_id: Option<String>,
    #[serde(rename = "type", default)]
    pub user_type: Option<String>,
    #[serde(default)]
    pub public_repos: Option<u64>,
    #[serde(default)]
    pub public_gists: Option<u64>,
    #[serde(default)]
    pub followers: Option<u64>,
    #[serde(default)]
    pub following: Option<u64>,
    #[serde(default)]
    pub total_private_repos: Option<u64>,
    #[serde(default)]
    pub owned_private_repos: Option<u64>,
    #[serde(default)]
    pub private_gists: Option<u64>,
    #[serde(default)]
    pub disk_usage: Option<u64>,
    #[serde(default)]
    pub collaborators: Option<u64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// An email address of the acting user.
///
/// Older API versions answer with bare strings; current ones with objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EmailEntry {
    Address(String),
    Detailed {
        email: String,
        #[serde(default)]
        primary: bool,
        #[serde(default)]
        verified: bool,
    },
}

/// A public SSH key as listed for any user: no title, no URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GitKey {
    pub id: u64,
    pub key: String,
}

impl EmailEntry {
    pub fn address(&self) -> &str {
        match self {
            Self::Address(email) | Self::Detailed { email, .. } => email,
        }
    }
}

impl GitHubClient {
    /// Profile of the acting user.
    pub async fn get_authenticated_user(&self) -> Result<User> {
        self.get("/user").await
    }

    pub async fn get_user(&self, login: &str) -> Result<User> {
        require("login", login)?;
        self.get(&format!("/users/{}", segment(login))).await
    }

    pub async fn list_emails(&self) -> Result<Vec<EmailEntry>> {
        self.get("/user/emails").await
    }

    pub async fn add_emails(&self, emails: &[String]) -> Result<Vec<EmailEntry>> {
        check_emails(emails)?;
        self.post("/user/emails", emails, StatusCode::CREATED).await
    }

    pub async fn delete_emails(&self, emails: &[String]) -> Result<()> {
        check_emails(emails)?;
        self.expect_status(
            Method::DELETE,
            "/user/emails",
            RequestBody::json(emails)?,
            StatusCode::NO_CONTENT,
        )
        .await
        .map(|_| ())
    }

    /// Public SSH keys of any user.
    pub async fn list_user_public_keys(&self, user: &str) -> Result<Vec<GitKey>> {
        require("user", user)?;
        self.get(&format!("/users/{}/keys", segment(user))).await
    }

    pub async fn list_keys(&self) -> Result<Vec<Key>> {
        self.get("/user/keys").await
    }

    pub async fn get_key(&self, id: u64) -> Result<Key> {
        self.get(&format!("/user/keys/{id}")).await
    }

    pub async fn create_key(&self, key: &NewKey) -> Result<Key> {
        require("key", &key.key)?;
        self.post("/user/keys", key, StatusCode::CREATED).await
    }

    pub async fn update_key(&self, id: u64, key: &NewKey) -> Result<Key> {
        require("key", &key.key)?;
        self.patch(&format!("/user/keys/{id}"), key).await
    }

    pub async fn delete_key(&self, id: u64) -> Result<()> {
        self.delete(&format!("/user/keys/{id}")).await.map(|_| ())
    }

    pub async fn list_followers(&self) -> Result<Vec<GitUser>> {
        self.get("/user/followers").await
    }

    pub async fn list_following(&self) -> Result<Vec<GitUser>> {
        self.get("/user/following").await
    }

    pub async fn is_following(&self, user: &str) -> Result<bool> {
        require("user", user)?;
        self.exists(&format!("/user/following/{}", segment(user)))
            .await
    }

    pub async fn follow(&self, user: &str) -> Result<bool> {
        require("user", user)?;
        let path = format!("/user/following/{}", segment(user));
        self.expect_status(Method::PUT, &path, RequestBody::Empty, StatusCode::NO_CONTENT)
            .await
    }

    pub async fn unfollow(&self, user: &str) -> Result<bool> {
        require("user", user)?;
        self.delete(&format!("/user/following/{}", segment(user)))
            .await
    }
}

fn check_emails(emails: &[String]) -> Result<()> {
    require_non_empty("emails", emails)?;
    for email in emails {
        require("email", email)?;
    }
    Ok(())
}

#[async_trait]
impl Get for User {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, login: String) -> Result<Self> {
        client.get_user(&login).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_entry_accepts_both_shapes() {
        let entries: Vec<EmailEntry> = serde_json::from_str(
            r#"["octocat@github.com", {"email": "support@github.com", "primary": true, "verified": true}]"#,
        )
        .unwrap();
        assert_eq!(entries[0].address(), "octocat@github.com");
        assert_eq!(entries[1].address(), "support@github.com");
        assert!(matches!(entries[1], EmailEntry::Detailed { primary: true, .. }));
    }

    #[test]
    fn test_check_emails() {
        assert!(check_emails(&[]).is_err());
        assert!(check_emails(&["".to_string()]).is_err());
        assert!(check_emails(&["octocat@github.com".to_string()]).is_ok());
    }

    #[test]
    fn test_user_deserialization() {
        let user: User = serde_json::from_value(serde_json::json!({
            "login": "octocat",
            "id": 1,
            "name": "monalisa octocat",
            "hireable": null,
            "public_repos": 2,
            "created_at": "2008-01-14T04:33:35Z",
            "type": "User"
        }))
        .unwrap();
        assert_eq!(user.login, "octocat");
        assert_eq!(user.public_repos, Some(2));
        assert_eq!(user.hireable, None);
    }
}
