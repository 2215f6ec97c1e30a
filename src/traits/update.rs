use async_trait::async_trait;

use crate::client::GitHubClient;
use crate::error::Result;

/// Edit an existing entity and return its new state.
///
/// # Example
///
/// ```ignore
/// use githubv3::{GitHubClient, Issue, IssueEdit, IssueState, RepoRef, Update};
///
/// let client = GitHubClient::from_env()?;
/// let closed = Issue::update(
///     &client,
///     (RepoRef::owned("scratch"), 7),
///     IssueEdit {
///         state: Some(IssueState::Closed),
///         ..Default::default()
///     },
/// )
/// .await?;
/// ```
#[async_trait]
pub trait Update: Sized {
    type Id;

    /// Partial edit; `None` fields are left untouched.
    type Params;

    async fn update(client: &GitHubClient, id: Self::Id, params: Self::Params) -> Result<Self>;
}
