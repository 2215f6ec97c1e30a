//! GitHub REST API v3 client library.
//!
//! One [`GitHubClient`] holds the token, the acting login and the last seen
//! rate-limit counters. Every endpoint is an async method on it, grouped by
//! resource area (repositories, issues, pull requests, organizations, users,
//! gists, git data, activity, search, markdown, gitignore).
//!
//! # Quick Start
//!
//! ```no_run
//! use githubv3::{GitHubClient, Get, IssueState, NewIssue, Repo, RepoIssueListOptions, RepoRef};
//!
//! #[tokio::main]
//! async fn main() -> githubv3::Result<()> {
//!     // GITHUB_TOKEN is required, GITHUB_LOGIN names the default owner
//!     let client = GitHubClient::from_env()?;
//!
//!     let repo = Repo::get(&client, "rust-lang/rust".parse::<RepoRef>()?).await?;
//!     println!("{} has {} stars", repo.full_name(), repo.stargazers_count);
//!
//!     // An owner-less reference resolves against the login
//!     let scratch = RepoRef::owned("scratch");
//!     let issue = client
//!         .create_issue(
//!             &scratch,
//!             &NewIssue {
//!                 title: "Flaky test".to_string(),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("opened #{}", issue.number);
//!
//!     let open = client
//!         .list_repo_issues(
//!             &scratch,
//!             &RepoIssueListOptions {
//!                 state: Some(IssueState::Open),
//!                 ..Default::default()
//!             },
//!         )
//!         .await?;
//!     println!("{} open issues", open.len());
//!
//!     let calls = client.rate_limit();
//!     println!("{}/{} calls left", calls.remaining, calls.limit);
//!     Ok(())
//! }
//! ```
//!
//! # Conventions
//!
//! - Required inputs are checked before any request is made; a blank one is
//!   a [`GitHubError::Validation`].
//! - Each method accepts a fixed set of status codes. Anything else is a
//!   [`GitHubError::UnexpectedStatus`] carrying the status line.
//! - Existence checks (`is_*`) map `204` to `true` and `404` to `false`.
//! - [`Get`] and [`Update`] give entity-level access to the entities that
//!   are addressed by a single identifier.
//!
//! # Configuration
//!
//! [`GitHubClient::from_env`] reads:
//!
//! - `GITHUB_TOKEN` (required) - OAuth or personal access token
//! - `GITHUB_LOGIN` (optional) - default owner for owner-less references
//! - `GITHUB_API_URL` (optional) - defaults to `https://api.github.com`
//! - `GITHUB_ARCHIVE_DIR` (optional) - where archives land, `github/zip`

mod client;
mod error;
mod models;
mod query;
mod rate_limit;
mod traits;
mod validate;

pub mod cli;
pub mod output;

pub use client::{
    encode_body, ClientConfig, GitHubClient, RequestBody, DEFAULT_API_URL, DEFAULT_ARCHIVE_DIR,
};
pub use error::{GitHubError, Result};
pub use query::{encode_query, join_query, to_query_map, with_query};
pub use rate_limit::{RateLimit, RateLimitSnapshot, DEFAULT_CALLS_LIMIT};
pub use traits::{Get, Update};

pub use models::*;
