//! Output formatting for CLI display.
//!
//! Provides the [`PrettyPrint`] trait for human-readable output
//! as an alternative to JSON serialization.

use chrono::{DateTime, Utc};

use crate::{Gist, Issue, Org, PullRequest, RateLimitSnapshot, Repo, Team, User};

/// Human-readable key-value output, used when `--json` is not given.
pub trait PrettyPrint {
    fn pretty_print(&self) -> String;
}

fn header(title: String) -> Vec<String> {
    let divider = "─".repeat(title.chars().count().max(30));
    vec![title, divider]
}

fn row(lines: &mut Vec<String>, label: &str, value: impl std::fmt::Display) {
    lines.push(format!("{:<16}{}", format!("{label}:"), value));
}

fn row_opt(lines: &mut Vec<String>, label: &str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        row(lines, label, value);
    }
}

fn timestamp(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

impl PrettyPrint for Repo {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Repository: {}", self.full_name()));
        row_opt(&mut lines, "Description", self.description.as_deref());
        row_opt(&mut lines, "Language", self.language.as_deref());
        row_opt(&mut lines, "Default Branch", self.default_branch.as_deref());
        row(
            &mut lines,
            "Stats",
            format!(
                "{} stars, {} forks, {} open issues",
                self.stargazers_count, self.forks_count, self.open_issues_count
            ),
        );
        row(
            &mut lines,
            "Visibility",
            if self.private { "private" } else { "public" },
        );
        if self.fork {
            let parent = self.parent.as_ref().map(|p| p.full_name());
            row(&mut lines, "Fork Of", parent.as_deref().unwrap_or("unknown"));
        }
        if let Some(ref pushed) = self.pushed_at {
            row(&mut lines, "Pushed", timestamp(pushed));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for User {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("User: {}", self.login));
        row_opt(&mut lines, "Name", self.name.as_deref());
        row_opt(&mut lines, "Company", self.company.as_deref());
        row_opt(&mut lines, "Location", self.location.as_deref());
        row_opt(&mut lines, "Email", self.email.as_deref());
        if let (Some(followers), Some(following)) = (self.followers, self.following) {
            row(
                &mut lines,
                "Followers",
                format!("{followers} followers, {following} following"),
            );
        }
        if let Some(repos) = self.public_repos {
            row(&mut lines, "Public Repos", repos);
        }
        if let Some(ref created) = self.created_at {
            row(&mut lines, "Joined", timestamp(created));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Org {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Organization: {}", self.login));
        row_opt(&mut lines, "Name", self.name.as_deref());
        row_opt(&mut lines, "Location", self.location.as_deref());
        row_opt(&mut lines, "Blog", self.blog.as_deref());
        if let Some(repos) = self.public_repos {
            row(&mut lines, "Public Repos", repos);
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Team {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Team #{}: {}", self.id, self.name));
        if let Some(permission) = self.permission {
            row(&mut lines, "Permission", format!("{permission:?}").to_lowercase());
        }
        if let (Some(members), Some(repos)) = (self.members_count, self.repos_count) {
            row(&mut lines, "Size", format!("{members} members, {repos} repos"));
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Issue {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Issue #{}: {}", self.number, self.title));
        row(&mut lines, "State", self.state.as_str());
        if let Some(ref user) = self.user {
            row(&mut lines, "Author", &user.login);
        }
        if let Some(ref assignee) = self.assignee {
            row(&mut lines, "Assignee", &assignee.login);
        }
        if !self.labels.is_empty() {
            let labels: Vec<&str> = self.labels.iter().map(|l| l.name.as_str()).collect();
            row(&mut lines, "Labels", labels.join(", "));
        }
        row(&mut lines, "Comments", self.comments);
        if self.is_pull_request() {
            row(&mut lines, "Kind", "pull request");
        }
        lines.join("\n")
    }
}

impl PrettyPrint for PullRequest {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Pull Request #{}: {}", self.number, self.title));
        row(&mut lines, "State", self.state.as_str());
        row(
            &mut lines,
            "Branches",
            format!("{} <- {}", self.base.label, self.head.label),
        );
        match self.merged {
            Some(true) => row(&mut lines, "Merged", "yes"),
            _ => {
                if let Some(mergeable) = self.mergeable {
                    row(&mut lines, "Mergeable", if mergeable { "yes" } else { "no" });
                }
            }
        }
        lines.join("\n")
    }
}

impl PrettyPrint for Gist {
    fn pretty_print(&self) -> String {
        let mut lines = header(format!("Gist: {}", self.id));
        row_opt(&mut lines, "Description", self.description.as_deref());
        if let Some(ref owner) = self.owner {
            row(&mut lines, "Owner", &owner.login);
        }
        row(
            &mut lines,
            "Files",
            self.files.keys().cloned().collect::<Vec<_>>().join(", "),
        );
        row(
            &mut lines,
            "Visibility",
            if self.public { "public" } else { "secret" },
        );
        lines.join("\n")
    }
}

impl PrettyPrint for RateLimitSnapshot {
    fn pretty_print(&self) -> String {
        format!("{}/{} calls remaining", self.remaining, self.limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_pretty_print_format() {
        let repo: Repo = serde_json::from_value(serde_json::json!({
            "id": 1296269,
            "name": "Hello-World",
            "full_name": "octocat/Hello-World",
            "stargazers_count": 80,
            "forks_count": 9,
            "open_issues_count": 0,
            "language": null
        }))
        .unwrap();

        let output = repo.pretty_print();
        assert!(output.starts_with("Repository: octocat/Hello-World"));
        assert!(output.contains("80 stars, 9 forks"));
        assert!(!output.contains("Language"));
    }

    #[test]
    fn test_issue_pretty_print_marks_pulls() {
        let issue: Issue = serde_json::from_value(serde_json::json!({
            "number": 1347,
            "title": "Found a bug",
            "state": "open",
            "comments": 3,
            "labels": [{"name": "bug", "color": "f29513"}],
            "pull_request": {"html_url": "https://github.com/octocat/Hello-World/pull/1347"}
        }))
        .unwrap();

        let output = issue.pretty_print();
        assert!(output.contains("Issue #1347: Found a bug"));
        assert!(output.contains("Labels:         bug"));
        assert!(output.contains("pull request"));
    }
}
