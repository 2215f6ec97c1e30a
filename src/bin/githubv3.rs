//! GitHub API v3 CLI binary.
//!
//! A command-line interface for a handful of read-only GitHub queries, plus
//! the `deps` batch command.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use githubv3::cli::{parse_numbered, verbosity_level, Cli, Command, DepsConfig, Entity, RepoItems};
use githubv3::output::PrettyPrint;
use githubv3::{
    ClientConfig, Get, Gist, GitHubClient, Issue, Key, Org, PullRequest, Repo, RepoIssueListOptions,
    RepoRef, Team, User,
};
use serde::Serialize;
use tabled::{Table, Tabled};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            if matches!(e, githubv3::GitHubError::ConfigMissing(_)) {
                eprintln!("Hint: Set GITHUB_TOKEN environment variable");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> githubv3::Result<()> {
    match cli.command {
        Command::Get { entity, id } => {
            let client = env_client(cli.verbose)?;
            handle_get(&client, entity, &id, cli.json).await
        }
        Command::List { items, repo } => {
            let client = env_client(cli.verbose)?;
            let repo: RepoRef = repo.parse()?;
            handle_list(&client, items, &repo, cli.json).await
        }
        Command::RateLimit => {
            let client = env_client(cli.verbose)?;
            client.get_authenticated_user().await?;
            output_single(&client.rate_limit(), cli.json)
        }
        Command::Deps { config } => run_deps(&config, cli.json).await,
    }
}

/// Set up logging from `-v` and build a client from the environment.
fn env_client(verbose: u8) -> githubv3::Result<GitHubClient> {
    tracing_subscriber::fmt()
        .with_max_level(verbosity_level(verbose))
        .with_writer(std::io::stderr)
        .init();
    GitHubClient::from_env()
}

async fn handle_get(
    client: &GitHubClient,
    entity: Entity,
    id: &str,
    json: bool,
) -> githubv3::Result<()> {
    match entity {
        Entity::Repo => output_single(&Repo::get(client, id.parse()?).await?, json),
        Entity::User => output_single(&User::get(client, id.to_string()).await?, json),
        Entity::Org => output_single(&Org::get(client, id.to_string()).await?, json),
        Entity::Gist => output_single(&Gist::get(client, id.to_string()).await?, json),
        Entity::Team => {
            let team_id: u64 = id
                .parse()
                .map_err(|_| githubv3::GitHubError::Validation(format!("not a team id: {id}")))?;
            output_single(&Team::get(client, team_id).await?, json)
        }
        Entity::Issue => output_single(&Issue::get(client, parse_numbered(id)?).await?, json),
        Entity::Pull => output_single(&PullRequest::get(client, parse_numbered(id)?).await?, json),
    }
}

async fn handle_list(
    client: &GitHubClient,
    items: RepoItems,
    repo: &RepoRef,
    json: bool,
) -> githubv3::Result<()> {
    match items {
        RepoItems::Branches => {
            let branches = client.list_branches(repo).await?;
            output_rows(&branches, json, |b| NamedShaRow {
                name: b.name.clone(),
                sha: b.commit.sha.clone(),
            })
        }
        RepoItems::Tags => {
            let tags = client.list_tags(repo).await?;
            output_rows(&tags, json, |t| NamedShaRow {
                name: t.name.clone(),
                sha: t.commit.sha.clone(),
            })
        }
        RepoItems::Keys => {
            let keys = client.list_deploy_keys(repo).await?;
            output_rows(&keys, json, |k| KeyRow::from(k))
        }
        RepoItems::Issues => {
            let issues = client
                .list_repo_issues(repo, &RepoIssueListOptions::default())
                .await?;
            output_rows(&issues, json, |i| NumberedRow {
                number: i.number,
                state: i.state.as_str().to_string(),
                title: i.title.clone(),
            })
        }
        RepoItems::Pulls => {
            let pulls = client.list_pull_requests(repo, None).await?;
            output_rows(&pulls, json, |p| NumberedRow {
                number: p.number,
                state: p.state.as_str().to_string(),
                title: p.title.clone(),
            })
        }
    }
}

/// Load a deps config and print the deploy keys of each listed repository.
async fn run_deps(path: &Path, json: bool) -> githubv3::Result<()> {
    let config = DepsConfig::load(path)?;
    tracing_subscriber::fmt()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .init();

    let mut client_config = ClientConfig::new(config.token.clone());
    if let Some(login) = config.login.clone() {
        client_config = client_config.with_login(login);
    }
    let client = GitHubClient::with_config(client_config)?;

    for dep in &config.deps {
        let repo: RepoRef = match dep.parse() {
            Ok(repo) if dep.contains('/') => repo,
            _ => {
                warn!(dep = %dep, "invalid repo, expected owner/name");
                continue;
            }
        };
        info!(repo = %repo, "fetching deploy keys");
        let keys = client.list_deploy_keys(&repo).await?;
        println!("{repo}");
        output_rows(&keys, json, |k| KeyRow::from(k))?;
    }
    info!(remaining = client.calls_remaining(), "done");
    Ok(())
}

fn output_single<T: Serialize + PrettyPrint>(item: &T, json: bool) -> githubv3::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(item)?);
    } else {
        println!("{}", item.pretty_print());
    }
    Ok(())
}

fn output_rows<T, R, F>(items: &[T], json: bool, to_row: F) -> githubv3::Result<()>
where
    T: Serialize,
    R: Tabled,
    F: Fn(&T) -> R,
{
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        let rows: Vec<R> = items.iter().map(to_row).collect();
        println!("{}", Table::new(rows));
        println!("\n{} total", items.len());
    }
    Ok(())
}

// Table row types for non-JSON output

#[derive(Tabled)]
struct NamedShaRow {
    name: String,
    sha: String,
}

#[derive(Tabled)]
struct NumberedRow {
    number: u64,
    state: String,
    title: String,
}

#[derive(Tabled)]
struct KeyRow {
    id: u64,
    title: String,
    read_only: String,
    key: String,
}

impl From<&Key> for KeyRow {
    fn from(k: &Key) -> Self {
        let mut key: String = k.key.chars().take(40).collect();
        if key.len() < k.key.len() {
            key.push('…');
        }
        Self {
            id: k.id,
            title: k.title.clone().unwrap_or_default(),
            read_only: k
                .read_only
                .map(|ro| if ro { "yes" } else { "no" }.to_string())
                .unwrap_or_default(),
            key,
        }
    }
}
