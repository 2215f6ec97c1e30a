//! Basic example demonstrating the GitHub API client.
//!
//! Run with:
//! ```
//! GITHUB_TOKEN=your-token GITHUB_LOGIN=you cargo run --example basic
//! ```

use githubv3::{Get, GitHubClient, Repo, RepoRef, StarredOptions, User};

#[tokio::main]
async fn main() -> githubv3::Result<()> {
    // Initialize tracing for debugging (optional)
    tracing_subscriber::fmt::init();

    println!("Creating GitHub client...");
    let client = GitHubClient::from_env()?;
    println!("Connected to: {}", client.base_url());

    println!("\n--- Authenticated User ---");
    let me = client.get_authenticated_user().await?;
    println!("{} ({})", me.login, me.name.as_deref().unwrap_or("no name"));

    println!("\n--- A Public Repository ---");
    let repo_ref: RepoRef = "rust-lang/rust".parse()?;
    let repo = Repo::get(&client, repo_ref.clone()).await?;
    println!("{}: {} stars", repo.full_name(), repo.stargazers_count);

    let branches = client.list_branches(&repo_ref).await?;
    println!("Found {} branches on the first page", branches.len());
    for branch in branches.iter().take(5) {
        println!("  - {} @ {}", branch.name, &branch.commit.sha[..7.min(branch.commit.sha.len())]);
    }

    println!("\n--- Starred Repositories ---");
    let starred = client.list_starred_repos(&StarredOptions::default()).await?;
    for repo in starred.iter().take(5) {
        println!("  - {}", repo.full_name());
    }

    println!("\n--- Another User ---");
    let octocat = User::get(&client, "octocat".to_string()).await?;
    println!(
        "{} has {} public repos",
        octocat.login,
        octocat.public_repos.unwrap_or_default()
    );

    let calls = client.rate_limit();
    println!("\n{}/{} calls remaining", calls.remaining, calls.limit);

    Ok(())
}
