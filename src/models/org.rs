//! Organizations, members and teams.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::{unexpected_status, GitHubClient, RequestBody};
use crate::error::{GitHubError, Result};
use crate::models::common::{paged, segment, GitUser, RepoRef};
use crate::models::repo::Repo;
use crate::traits::{Get, Update};
use crate::validate::require;

/// A GitHub organization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Org {
    pub login: String,
    pub id: u64,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
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
    pub billing_email: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
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
    pub plan: Option<OrgPlan>,
    #[serde(rename = "type", default)]
    pub org_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Billing plan, visible to organization owners only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrgPlan {
    pub name: String,
    #[serde(default)]
    pub space: u64,
    #[serde(default)]
    pub private_repos: u64,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrgEdit {
    pub billing_email: Option<String>,
    pub company: Option<String>,
    pub email: Option<String>,
    pub location: Option<String>,
    pub name: Option<String>,
}

/// Outcome of an organization membership check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipStatus {
    /// Confirmed member.
    Member,
    /// Not a member.
    NonMember,
    /// The caller may not see private membership, and the user is not a
    /// public member.
    Unconfirmed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamPermission {
    Pull,
    Push,
    Admin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Team {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub permission: Option<TeamPermission>,
    #[serde(default)]
    pub members_count: Option<u64>,
    #[serde(default)]
    pub repos_count: Option<u64>,
}

/// Payload for creating a team.
#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct NewTeam {
    pub name: String,
    pub permission: Option<TeamPermission>,
    /// Repositories as `owner/name`.
    pub repo_names: Option<Vec<String>>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, Default, Serialize)]
pub struct TeamEdit {
    pub name: String,
    pub permission: Option<TeamPermission>,
}

impl GitHubClient {
    /// Organizations of the acting user.
    pub async fn list_user_orgs(&self, page: Option<u32>) -> Result<Vec<Org>> {
        self.get(&paged("/user/orgs", page)).await
    }

    /// Public organization memberships of `user`.
    pub async fn list_public_user_orgs(&self, user: &str, page: Option<u32>) -> Result<Vec<Org>> {
        require("user", user)?;
        self.get(&paged(&format!("/users/{}/orgs", segment(user)), page))
            .await
    }

    pub async fn get_org(&self, org: &str) -> Result<Org> {
        require("org", org)?;
        self.get(&format!("/orgs/{}", segment(org))).await
    }

    pub async fn edit_org(&self, org: &str, edit: &OrgEdit) -> Result<Org> {
        require("org", org)?;
        self.patch(&format!("/orgs/{}", segment(org)), edit).await
    }

    /// Members of `org`. Callers outside the organization are redirected by
    /// GitHub; they get the public member list instead.
    pub async fn list_org_members(&self, org: &str) -> Result<Vec<GitUser>> {
        require("org", org)?;
        let path = format!("/orgs/{}/members", segment(org));
        let response = self.send(Method::GET, &path, RequestBody::Empty).await?;
        match response.status() {
            StatusCode::OK => self.read_response(response).await,
            StatusCode::FOUND => {
                self.record_headers(&response);
                tracing::debug!(org, "not a member, listing public members");
                self.list_public_org_members(org).await
            }
            _ => Err(unexpected_status(response, &[StatusCode::OK, StatusCode::FOUND]).await),
        }
    }

    /// Check whether `user` (default: the login) belongs to `org`.
    ///
    /// When the caller may not see private membership GitHub redirects to
    /// the public membership check, which is requested explicitly.
    #[tracing::instrument(skip(self))]
    pub async fn check_org_membership(
        &self,
        org: &str,
        user: Option<&str>,
    ) -> Result<MembershipStatus> {
        require("org", org)?;
        let user = self.user_or_login(user)?;
        let path = format!("/orgs/{}/members/{}", segment(org), segment(&user));
        let response = self.send(Method::GET, &path, RequestBody::Empty).await?;

        match response.status() {
            StatusCode::NO_CONTENT => {
                self.record_headers(&response);
                Ok(MembershipStatus::Member)
            }
            StatusCode::NOT_FOUND => {
                self.record_headers(&response);
                Ok(MembershipStatus::NonMember)
            }
            StatusCode::FOUND => {
                self.record_headers(&response);
                let target = self.redirect_target(&response)?;
                let public = self.send_to(target).await?;
                match public.status() {
                    StatusCode::OK | StatusCode::NO_CONTENT => Ok(MembershipStatus::Member),
                    StatusCode::NOT_FOUND => Ok(MembershipStatus::Unconfirmed),
                    _ => Err(unexpected_status(
                        public,
                        &[StatusCode::OK, StatusCode::NO_CONTENT, StatusCode::NOT_FOUND],
                    )
                    .await),
                }
            }
            _ => Err(unexpected_status(
                response,
                &[StatusCode::NO_CONTENT, StatusCode::NOT_FOUND, StatusCode::FOUND],
            )
            .await),
        }
    }

    pub async fn remove_org_member(&self, org: &str, user: &str) -> Result<bool> {
        require("org", org)?;
        require("user", user)?;
        self.delete(&format!("/orgs/{}/members/{}", segment(org), segment(user)))
            .await
    }

    pub async fn list_public_org_members(&self, org: &str) -> Result<Vec<GitUser>> {
        require("org", org)?;
        self.get(&format!("/orgs/{}/public_members", segment(org)))
            .await
    }

    pub async fn is_public_org_member(&self, org: &str, user: &str) -> Result<bool> {
        self.exists(&public_member_path(org, user)?).await
    }

    /// Make the membership of `user` public.
    pub async fn publicize_membership(&self, org: &str, user: &str) -> Result<bool> {
        let path = public_member_path(org, user)?;
        self.expect_status(Method::PUT, &path, RequestBody::Empty, StatusCode::NO_CONTENT)
            .await
    }

    pub async fn conceal_membership(&self, org: &str, user: &str) -> Result<bool> {
        self.delete(&public_member_path(org, user)?).await
    }

    pub async fn list_teams(&self, org: &str) -> Result<Vec<Team>> {
        require("org", org)?;
        self.get(&format!("/orgs/{}/teams", segment(org))).await
    }

    pub async fn get_team(&self, id: u64) -> Result<Team> {
        self.get(&format!("/teams/{id}")).await
    }

    pub async fn create_team(&self, org: &str, team: &NewTeam) -> Result<Team> {
        require("org", org)?;
        require("name", &team.name)?;
        let path = format!("/orgs/{}/teams", segment(org));
        self.post(&path, team, StatusCode::CREATED).await
    }

    pub async fn edit_team(&self, id: u64, edit: &TeamEdit) -> Result<Team> {
        require("name", &edit.name)?;
        self.patch(&format!("/teams/{id}"), edit).await
    }

    pub async fn delete_team(&self, id: u64) -> Result<bool> {
        self.delete(&format!("/teams/{id}")).await
    }

    pub async fn list_team_members(&self, id: u64) -> Result<Vec<GitUser>> {
        self.get(&format!("/teams/{id}/members")).await
    }

    pub async fn is_team_member(&self, id: u64, user: &str) -> Result<bool> {
        require("user", user)?;
        self.exists(&format!("/teams/{id}/members/{}", segment(user)))
            .await
    }

    /// Add `user` to a team. GitHub refuses organizations with `422`.
    pub async fn add_team_member(&self, id: u64, user: &str) -> Result<bool> {
        require("user", user)?;
        let path = format!("/teams/{id}/members/{}", segment(user));
        self.put_team_entry(&path, "Cannot add an organization to a team")
            .await
    }

    pub async fn remove_team_member(&self, id: u64, user: &str) -> Result<bool> {
        require("user", user)?;
        self.delete(&format!("/teams/{id}/members/{}", segment(user)))
            .await
    }

    pub async fn list_team_repos(&self, id: u64) -> Result<Vec<Repo>> {
        self.get(&format!("/teams/{id}/repos")).await
    }

    pub async fn is_team_repo(&self, id: u64, repo: &RepoRef) -> Result<bool> {
        self.exists(&self.team_repo_path(id, repo)?).await
    }

    /// Grant a team access to `repo`. The repository must belong to the
    /// team's organization, otherwise GitHub answers `422`.
    pub async fn add_team_repo(&self, id: u64, repo: &RepoRef) -> Result<bool> {
        let path = self.team_repo_path(id, repo)?;
        self.put_team_entry(&path, "Repository is not owned by the team's organization")
            .await
    }

    pub async fn remove_team_repo(&self, id: u64, repo: &RepoRef) -> Result<bool> {
        self.delete(&self.team_repo_path(id, repo)?).await
    }

    fn team_repo_path(&self, id: u64, repo: &RepoRef) -> Result<String> {
        let (owner, name) = self.resolve_repo(repo)?;
        Ok(format!("/teams/{id}/repos/{}/{}", segment(&owner), segment(&name)))
    }

    async fn put_team_entry(&self, path: &str, refusal: &str) -> Result<bool> {
        let response = self.send(Method::PUT, path, RequestBody::Empty).await?;
        match response.status() {
            StatusCode::NO_CONTENT => {
                self.record_headers(&response);
                Ok(true)
            }
            StatusCode::UNPROCESSABLE_ENTITY => Err(GitHubError::Api {
                message: refusal.to_string(),
                status_code: Some(422),
            }),
            _ => Err(unexpected_status(
                response,
                &[StatusCode::NO_CONTENT, StatusCode::UNPROCESSABLE_ENTITY],
            )
            .await),
        }
    }
}

fn public_member_path(org: &str, user: &str) -> Result<String> {
    require("org", org)?;
    require("user", user)?;
    Ok(format!(
        "/orgs/{}/public_members/{}",
        segment(org),
        segment(user)
    ))
}

#[async_trait]
impl Get for Org {
    type Id = String;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, login: String) -> Result<Self> {
        client.get_org(&login).await
    }
}

#[async_trait]
impl Update for Org {
    type Id = String;
    type Params = OrgEdit;

    #[tracing::instrument(skip(client))]
    async fn update(client: &GitHubClient, login: String, params: OrgEdit) -> Result<Self> {
        client.edit_org(&login, &params).await
    }
}

#[async_trait]
impl Get for Team {
    type Id = u64;

    #[tracing::instrument(skip(client))]
    async fn get(client: &GitHubClient, id: u64) -> Result<Self> {
        client.get_team(id).await
    }
}

#[async_trait]
impl Update for Team {
    type Id = u64;
    type Params = TeamEdit;

    #[tracing::instrument(skip(client))]
    async fn update(client: &GitHubClient, id: u64, params: TeamEdit) -> Result<Self> {
        client.edit_team(id, &params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_deserialization() {
        let org: Org = serde_json::from_value(serde_json::json!({
            "login": "github",
            "id": 1,
            "name": "GitHub",
            "plan": {"name": "Medium", "space": 400, "private_repos": 20},
            "type": "Organization"
        }))
        .unwrap();
        assert_eq!(org.login, "github");
        assert_eq!(org.plan.unwrap().private_repos, 20);
        assert_eq!(org.org_type.as_deref(), Some("Organization"));
    }

    #[test]
    fn test_new_team_body() {
        let body = serde_json::to_value(NewTeam {
            name: "Justice League".to_string(),
            permission: Some(TeamPermission::Push),
            repo_names: Some(vec!["github/dotfiles".to_string()]),
        })
        .unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "name": "Justice League",
                "permission": "push",
                "repo_names": ["github/dotfiles"]
            })
        );
    }

    #[test]
    fn test_public_member_path_requires_both_parts() {
        assert!(public_member_path("github", "").is_err());
        assert_eq!(
            public_member_path("github", "octocat").unwrap(),
            "/orgs/github/public_members/octocat"
        );
    }
}
