//! Issues, labels, comments and pull requests.

use githubv3::{
    ClientConfig, Get, GitHubClient, GitHubError, Issue, IssueState, NewPullRequest, PullRequest,
    PullSource, RepoIssueListOptions, RepoRef,
};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_config(
        ClientConfig::new("test-token")
            .with_base_url(server.uri())
            .with_login("octocat"),
    )
    .unwrap()
}

fn branch(label: &str, name: &str) -> serde_json::Value {
    serde_json::json!({
        "label": label,
        "ref": name,
        "sha": "6dcb09b5b57875f334f61aebed695e2e4193db5e"
    })
}

#[tokio::test]
async fn test_list_repo_issues_encodes_options() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/issues"))
        .and(query_param("state", "closed"))
        .and(query_param("labels", "bug,ui"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            {"number": 1, "title": "Crash on start", "state": "closed", "labels": null}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let options = RepoIssueListOptions {
        state: Some(IssueState::Closed),
        labels: Some(vec!["bug".to_string(), "ui".to_string()]),
        ..Default::default()
    };
    let issues = client
        .list_repo_issues(&RepoRef::owned("Hello-World"), &options)
        .await
        .unwrap();

    assert_eq!(issues.len(), 1);
    assert!(issues[0].labels.is_empty());
}

#[tokio::test]
async fn test_get_issue_through_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/issues/1347"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": 1347,
            "title": "Found a bug",
            "state": "open"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let issue = Issue::get(&client, (RepoRef::owned("Hello-World"), 1347))
        .await
        .unwrap();

    assert_eq!(issue.title, "Found a bug");
    assert_eq!(issue.state, IssueState::Open);
}

#[tokio::test]
async fn test_comment_body_escapes_quotes() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/issues/7/comments"))
        .and(body_json(serde_json::json!({"body": "He said \"ship it\"\nthen left"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "id": 1,
            "body": "He said \"ship it\"\nthen left"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let comment = client
        .create_issue_comment(&RepoRef::owned("Hello-World"), 7, "He said \"ship it\"\nthen left")
        .await
        .unwrap();

    assert_eq!(comment.id, 1);
}

#[tokio::test]
async fn test_remove_all_labels_uses_delete() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/repos/octocat/Hello-World/issues/7/labels"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client
        .remove_all_issue_labels(&RepoRef::owned("Hello-World"), 7)
        .await
        .unwrap());
}

#[tokio::test]
async fn test_add_labels_requires_one() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .add_issue_labels(&RepoRef::owned("Hello-World"), 7, &[])
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Validation(_)));
}

#[tokio::test]
async fn test_create_pull_request_from_issue() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/repos/octocat/Hello-World/pulls"))
        .and(body_json(serde_json::json!({
            "base": "master",
            "head": "octocat:new-feature",
            "issue": 5
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "number": 5,
            "state": "open",
            "title": "new-feature",
            "head": branch("octocat:new-feature", "new-feature"),
            "base": branch("octocat:master", "master")
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pull = client
        .create_pull_request(
            &RepoRef::owned("Hello-World"),
            &NewPullRequest {
                base: "master".to_string(),
                head: "octocat:new-feature".to_string(),
                source: PullSource::Issue { issue: 5 },
            },
        )
        .await
        .unwrap();

    assert_eq!(pull.head.ref_name, "new-feature");
    assert!(pull.base.repo.is_none());
}

#[tokio::test]
async fn test_merge_pull_request_not_mergeable() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/repos/octocat/Hello-World/pulls/5/merge"))
        .respond_with(ResponseTemplate::new(405).set_body_json(serde_json::json!({
            "sha": null,
            "merged": false,
            "message": "Pull Request is not mergeable"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let result = client
        .merge_pull_request(&RepoRef::owned("Hello-World"), 5, None)
        .await
        .unwrap();

    assert!(!result.merged);
    assert_eq!(result.message, "Pull Request is not mergeable");
}

#[tokio::test]
async fn test_get_pull_request_through_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/rust-lang/rust/pulls/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "number": 1,
            "state": "closed",
            "title": "Initial",
            "merged": true,
            "head": branch("a:b", "b"),
            "base": branch("rust-lang:master", "master")
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let pull = PullRequest::get(&client, ("rust-lang/rust".parse().unwrap(), 1))
        .await
        .unwrap();

    assert_eq!(pull.merged, Some(true));
}
