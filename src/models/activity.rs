//! Activity: event streams, notifications, starring and watching.

use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::{GitHubClient, RequestBody};
use crate::error::{GitHubError, Result};
use crate::models::common::{paged, segment, Direction, GitUser, RepoRef};
use crate::models::repo::Repo;
use crate::query::{join_query, with_query};
use crate::validate::require;

/// GitHub serves at most ten pages of any event stream.
pub const MAX_EVENT_PAGE: u32 = 10;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub public: bool,
    /// Shape depends on `event_type`.
    #[serde(default)]
    pub payload: serde_json::Value,
    #[serde(default, alias = "repository")]
    pub repo: Option<EventRepo>,
    #[serde(default)]
    pub actor: Option<GitUser>,
    #[serde(default)]
    pub org: Option<GitUser>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRepo {
    pub id: u64,
    /// `owner/name`.
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    #[serde(default)]
    pub repository: Option<NotificationRepo>,
    pub subject: NotificationSubject,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub unread: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_read_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationRepo {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub owner: Option<GitUser>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationSubject {
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub latest_comment_url: Option<String>,
    #[serde(rename = "type", default)]
    pub subject_type: Option<String>,
}

/// Subscription state of a notification thread or a repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(default)]
    pub subscribed: bool,
    #[serde(default)]
    pub ignored: bool,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub thread_url: Option<String>,
    #[serde(default)]
    pub repository_url: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SubscriptionRequest {
    pub subscribed: bool,
    pub ignored: bool,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NotificationOptions {
    /// Include notifications already marked read.
    pub all: Option<bool>,
    /// Only threads the user participates in or is mentioned in.
    pub participating: Option<bool>,
    pub since: Option<DateTime<Utc>>,
}

/// Mark every notification up to `last_read_at` as read (or unread).
#[derive(Debug, Clone, Default)]
pub struct MarkNotifications {
    pub read: bool,
    pub last_read_at: Option<DateTime<Utc>>,
}

impl MarkNotifications {
    fn query(&self) -> Vec<(&'static str, String)> {
        let flag = if self.read { "read" } else { "unread" };
        let mut pairs = vec![(flag, "true".to_string())];
        if let Some(at) = self.last_read_at {
            pairs.push(("last_read_at", at.to_rfc3339()));
        }
        pairs
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StarredSort {
    Created,
    Updated,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct StarredOptions {
    pub sort: Option<StarredSort>,
    pub direction: Option<Direction>,
    pub page: Option<u32>,
}

/// Reject event pages outside `1..=10`.
pub fn check_event_page(page: u32) -> Result<()> {
    if (1..=MAX_EVENT_PAGE).contains(&page) {
        Ok(())
    } else {
        Err(GitHubError::Validation(
            "The page number is not between 1 and 10.".to_string(),
        ))
    }
}

impl GitHubClient {
    async fn events(&self, path: &str, page: u32) -> Result<Vec<Event>> {
        check_event_page(page)?;
        self.get(&paged(path, Some(page))).await
    }

    pub async fn list_public_events(&self, page: u32) -> Result<Vec<Event>> {
        self.events("/events", page).await
    }

    pub async fn list_repo_events(&self, repo: &RepoRef, page: u32) -> Result<Vec<Event>> {
        let path = format!("{}/events", self.repo_path(repo)?);
        self.events(&path, page).await
    }

    /// Public events for a repository's fork network.
    pub async fn list_network_events(&self, repo: &RepoRef, page: u32) -> Result<Vec<Event>> {
        let (owner, name) = self.resolve_repo(repo)?;
        let path = format!("/networks/{}/{}/events", segment(&owner), segment(&name));
        self.events(&path, page).await
    }

    pub async fn list_org_events(&self, org: &str, page: u32) -> Result<Vec<Event>> {
        require("org", org)?;
        self.events(&format!("/orgs/{}/events", segment(org)), page)
            .await
    }

    pub async fn list_received_events(&self, user: Option<&str>, page: u32) -> Result<Vec<Event>> {
        let user = self.user_or_login(user)?;
        let path = format!("/users/{}/received_events", segment(&user));
        self.events(&path, page).await
    }

    pub async fn list_public_received_events(
        &self,
        user: Option<&str>,
        page: u32,
    ) -> Result<Vec<Event>> {
        let user = self.user_or_login(user)?;
        let path = format!("/users/{}/received_events/public", segment(&user));
        self.events(&path, page).await
    }

    /// Events performed by `user`, private ones included for the acting user.
    pub async fn list_user_events(&self, user: Option<&str>, page: u32) -> Result<Vec<Event>> {
        let user = self.user_or_login(user)?;
        self.events(&format!("/users/{}/events", segment(&user)), page)
            .await
    }

    pub async fn list_public_user_events(
        &self,
        user: Option<&str>,
        page: u32,
    ) -> Result<Vec<Event>> {
        let user = self.user_or_login(user)?;
        let path = format!("/users/{}/events/public", segment(&user));
        self.events(&path, page).await
    }

    /// The acting user's dashboard for an organization.
    pub async fn list_user_org_events(
        &self,
        user: Option<&str>,
        org: &str,
        page: u32,
    ) -> Result<Vec<Event>> {
        require("org", org)?;
        let user = self.user_or_login(user)?;
        let path = format!("/users/{}/events/orgs/{}", segment(&user), segment(org));
        self.events(&path, page).await
    }

    pub async fn list_notifications(
        &self,
        options: &NotificationOptions,
    ) -> Result<Vec<Notification>> {
        self.get(&with_query("/notifications", options)?).await
    }

    pub async fn list_repo_notifications(
        &self,
        repo: &RepoRef,
        options: &NotificationOptions,
    ) -> Result<Vec<Notification>> {
        let path = format!("{}/notifications", self.repo_path(repo)?);
        self.get(&with_query(&path, options)?).await
    }

    pub async fn mark_notifications(&self, mark: &MarkNotifications) -> Result<bool> {
        let path = join_query("/notifications", mark.query());
        self.expect_status(
            Method::PUT,
            &path,
            RequestBody::Empty,
            StatusCode::RESET_CONTENT,
        )
        .await
    }

    pub async fn mark_repo_notifications(
        &self,
        repo: &RepoRef,
        mark: &MarkNotifications,
    ) -> Result<bool> {
        let path = format!("{}/notifications", self.repo_path(repo)?);
        self.expect_status(
            Method::PUT,
            &join_query(&path, mark.query()),
            RequestBody::Empty,
            StatusCode::RESET_CONTENT,
        )
        .await
    }

    pub async fn get_notification_thread(&self, id: &str) -> Result<Notification> {
        require("id", id)?;
        self.get(&format!("/notifications/threads/{}", segment(id)))
            .await
    }

    pub async fn mark_thread(&self, id: &str, read: bool) -> Result<bool> {
        require("id", id)?;
        let flag = if read { "read" } else { "unread" };
        let path = join_query(
            &format!("/notifications/threads/{}", segment(id)),
            [(flag, "true")],
        );
        self.expect_status(
            Method::PATCH,
            &path,
            RequestBody::Empty,
            StatusCode::RESET_CONTENT,
        )
        .await
    }

    pub async fn get_thread_subscription(&self, id: &str) -> Result<Subscription> {
        require("id", id)?;
        self.get(&format!("/notifications/threads/{}/subscription", segment(id)))
            .await
    }

    pub async fn set_thread_subscription(
        &self,
        id: &str,
        request: &SubscriptionRequest,
    ) -> Result<Subscription> {
        require("id", id)?;
        let path = format!("/notifications/threads/{}/subscription", segment(id));
        self.put(&path, request, StatusCode::OK).await
    }

    pub async fn delete_thread_subscription(&self, id: &str) -> Result<bool> {
        require("id", id)?;
        self.delete(&format!("/notifications/threads/{}/subscription", segment(id)))
            .await
    }

    pub async fn list_stargazers(&self, repo: &RepoRef, page: Option<u32>) -> Result<Vec<GitUser>> {
        let path = format!("{}/stargazers", self.repo_path(repo)?);
        self.get(&paged(&path, page)).await
    }

    /// Repositories starred by the acting user.
    pub async fn list_starred_repos(&self, options: &StarredOptions) -> Result<Vec<Repo>> {
        self.get(&with_query("/user/starred", options)?).await
    }

    pub async fn is_starring(&self, repo: &RepoRef) -> Result<bool> {
        self.exists(&self.starred_path(repo)?).await
    }

    pub async fn star_repo(&self, repo: &RepoRef) -> Result<bool> {
        self.expect_status(
            Method::PUT,
            &self.starred_path(repo)?,
            RequestBody::Empty,
            StatusCode::NO_CONTENT,
        )
        .await
    }

    pub async fn unstar_repo(&self, repo: &RepoRef) -> Result<bool> {
        self.delete(&self.starred_path(repo)?).await
    }

    fn starred_path(&self, repo: &RepoRef) -> Result<String> {
        let (owner, name) = self.resolve_repo(repo)?;
        Ok(format!("/user/starred/{}/{}", segment(&owner), segment(&name)))
    }

    pub async fn list_watchers(&self, repo: &RepoRef, page: Option<u32>) -> Result<Vec<GitUser>> {
        let path = format!("{}/subscribers", self.repo_path(repo)?);
        self.get(&paged(&path, page)).await
    }

    pub async fn list_watched_repos(&self, page: Option<u32>) -> Result<Vec<Repo>> {
        self.get(&paged("/user/subscriptions", page)).await
    }

    pub async fn get_repo_subscription(&self, repo: &RepoRef) -> Result<Subscription> {
        let path = format!("{}/subscription", self.repo_path(repo)?);
        self.get(&path).await
    }

    pub async fn set_repo_subscription(
        &self,
        repo: &RepoRef,
        request: &SubscriptionRequest,
    ) -> Result<Subscription> {
        let path = format!("{}/subscription", self.repo_path(repo)?);
        self.put(&path, request, StatusCode::OK).await
    }

    pub async fn delete_repo_subscription(&self, repo: &RepoRef) -> Result<bool> {
        let path = format!("{}/subscription", self.repo_path(repo)?);
        self.delete(&path).await
    }
}
