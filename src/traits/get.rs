use async_trait::async_trait;

use crate::client::GitHubClient;
use crate::error::Result;

/// Fetch a single entity by its identifier.
///
/// # Example
///
/// ```ignore
/// use githubv3::{Get, GitHubClient, Repo, RepoRef};
///
/// let client = GitHubClient::from_env()?;
/// let repo = Repo::get(&client, "rust-lang/rust".parse::<RepoRef>()?).await?;
/// ```
#[async_trait]
pub trait Get: Sized {
    /// Login, repository reference, number or a tuple of these.
    type Id;

    /// # Errors
    ///
    /// Fails on a blank identifier, a non-200 status or a malformed body.
    async fn get(client: &GitHubClient, id: Self::Id) -> Result<Self>;
}
