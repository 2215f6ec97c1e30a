//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the githubv3 binary.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use serde::Deserialize;
use tracing::Level;

use crate::error::{GitHubError, Result};
use crate::models::RepoRef;

/// GitHub API v3 command-line interface.
#[derive(Parser, Debug)]
#[command(name = "githubv3", about = "GitHub API v3 CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Raise log verbosity (-v info, -vv debug).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single entity.
    Get {
        /// The type of entity to get.
        entity: Entity,

        /// Login, `owner/repo`, gist id, team id, or `owner/repo#N` for
        /// issues and pull requests.
        id: String,
    },

    /// List the items that belong to a repository.
    List {
        /// What to list.
        items: RepoItems,

        /// `owner/repo`, or a bare name owned by GITHUB_LOGIN.
        repo: String,
    },

    /// Fetch the deploy keys of every repository named in a deps config.
    Deps {
        /// JSON file with `token`, `login`, `deps` and `debug_level`.
        config: PathBuf,
    },

    /// Show the rate-limit counters after a cheap authenticated call.
    RateLimit,
}

/// Entity types that can be fetched with `get`.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    #[value(alias = "repos")]
    Repo,
    #[value(alias = "users")]
    User,
    #[value(alias = "orgs")]
    Org,
    #[value(alias = "gists")]
    Gist,
    #[value(alias = "teams")]
    Team,
    #[value(alias = "issues")]
    Issue,
    #[value(alias = "pr")]
    Pull,
}

/// Per-repository collections that can be listed.
#[derive(ValueEnum, Clone, Debug, PartialEq, Eq)]
pub enum RepoItems {
    Branches,
    Tags,
    /// Deploy keys.
    Keys,
    Issues,
    Pulls,
}

/// Split `owner/repo#N` into a repository and a number.
pub fn parse_numbered(id: &str) -> Result<(RepoRef, u64)> {
    let (repo, number) = id.rsplit_once('#').ok_or_else(|| {
        GitHubError::Validation(format!("expected owner/repo#number, got {id}"))
    })?;
    let number = number
        .trim()
        .parse()
        .map_err(|_| GitHubError::Validation(format!("not a number: {number}")))?;
    Ok((repo.parse()?, number))
}

/// Config file for the `deps` command.
#[derive(Debug, Clone, Deserialize)]
pub struct DepsConfig {
    pub token: String,
    #[serde(default)]
    pub login: Option<String>,
    /// `owner/repo` entries.
    #[serde(default)]
    pub deps: Vec<String>,
    /// 0 warn, 1 info, 2 or more debug.
    #[serde(default)]
    pub debug_level: u8,
}

impl DepsConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        if config.token.trim().is_empty() {
            return Err(GitHubError::ConfigMissing(format!(
                "token in {}",
                path.display()
            )));
        }
        Ok(config)
    }

    pub fn log_level(&self) -> Level {
        verbosity_level(self.debug_level)
    }
}

/// Map a verbosity count to a log level.
pub fn verbosity_level(count: u8) -> Level {
    match count {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_numbered() {
        let (repo, number) = parse_numbered("octocat/Hello-World#1347").unwrap();
        assert_eq!(repo, RepoRef::new("octocat", "Hello-World"));
        assert_eq!(number, 1347);

        let (repo, _) = parse_numbered("scratch#2").unwrap();
        assert_eq!(repo.owner, None);

        assert!(parse_numbered("octocat/Hello-World").is_err());
        assert!(parse_numbered("octocat/Hello-World#abc").is_err());
    }

    #[test]
    fn test_deps_config_load() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"token": "t0k", "deps": ["qiniu/errors", "qiniu/log"], "debug_level": 1}}"#
        )
        .unwrap();

        let config = DepsConfig::load(file.path()).unwrap();
        assert_eq!(config.deps, vec!["qiniu/errors", "qiniu/log"]);
        assert_eq!(config.login, None);
        assert_eq!(config.log_level(), Level::INFO);
    }

    #[test]
    fn test_deps_config_requires_token() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"token": " ", "deps": []}}"#).unwrap();

        let err = DepsConfig::load(file.path()).unwrap_err();
        assert!(matches!(err, GitHubError::ConfigMissing(_)));
    }
}
