//! CLI argument parsing.

use std::path::PathBuf;

use clap::Parser;
use githubv3::cli::{Cli, Command, Entity, RepoItems};

#[test]
fn test_cli_parses_get_subcommand() {
    let cli = Cli::parse_from(["githubv3", "get", "repo", "rust-lang/rust"]);

    assert!(!cli.json);
    assert_eq!(cli.verbose, 0);
    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Repo);
            assert_eq!(id, "rust-lang/rust");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_accepts_entity_aliases() {
    let cli = Cli::parse_from(["githubv3", "get", "pr", "octocat/Hello-World#1"]);

    match cli.command {
        Command::Get { entity, id } => {
            assert_eq!(entity, Entity::Pull);
            assert_eq!(id, "octocat/Hello-World#1");
        }
        _ => panic!("Expected Get command"),
    }
}

#[test]
fn test_cli_parses_list_subcommand() {
    let cli = Cli::parse_from(["githubv3", "list", "branches", "Hello-World"]);

    match cli.command {
        Command::List { items, repo } => {
            assert_eq!(items, RepoItems::Branches);
            assert_eq!(repo, "Hello-World");
        }
        _ => panic!("Expected List command"),
    }
}

#[test]
fn test_cli_parses_deps_subcommand() {
    let cli = Cli::parse_from(["githubv3", "deps", "config/deps.json"]);

    match cli.command {
        Command::Deps { config } => assert_eq!(config, PathBuf::from("config/deps.json")),
        _ => panic!("Expected Deps command"),
    }
}

#[test]
fn test_cli_parses_rate_limit() {
    let cli = Cli::parse_from(["githubv3", "rate-limit"]);

    assert!(matches!(cli.command, Command::RateLimit));
}

#[test]
fn test_cli_global_flags_after_subcommand() {
    let cli = Cli::parse_from(["githubv3", "get", "user", "octocat", "--json", "-vv"]);

    assert!(cli.json);
    assert_eq!(cli.verbose, 2);
}

#[test]
fn test_cli_rejects_unknown_entity() {
    let result = Cli::try_parse_from(["githubv3", "get", "project", "x"]);

    assert!(result.is_err());
}

#[test]
fn test_cli_requires_subcommand() {
    let result = Cli::try_parse_from(["githubv3"]);

    assert!(result.is_err());
}
