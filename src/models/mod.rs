//! GitHub resource types and the endpoints that return them.

mod activity;
mod common;
mod gist;
mod git_data;
mod gitignore;
mod issue;
mod markdown;
mod org;
mod pull_request;
mod repo;
mod search;
mod user;

pub use activity::*;
pub use common::*;
pub use gist::*;
pub use git_data::*;
pub use gitignore::*;
pub use issue::*;
pub use markdown::*;
pub use org::*;
pub use pull_request::*;
pub use repo::*;
pub use search::*;
pub use user::*;
