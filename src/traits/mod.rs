//! Uniform access to the entities that support it.
//!
//! Most endpoints are plain methods on [`GitHubClient`](crate::GitHubClient).
//! Entities that are fetched or edited by a single identifier also implement
//! these traits, which the CLI uses to dispatch generically.

mod get;
mod update;

pub use get::Get;
pub use update::Update;
