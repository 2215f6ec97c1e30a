//! Transport-level behavior: URL building, query encoding, rate limits,
//! status handling and the validation gate.
//!
//! Uses wiremock as the GitHub API; `.expect(n)` asserts how many requests
//! actually went out.

use std::collections::BTreeMap;

use githubv3::{encode_query, ClientConfig, GitHubClient, GitHubError, NewIssue, RepoRef};
use tokio_test::{assert_err, assert_ok};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_config(
        ClientConfig::new("test-token")
            .with_base_url(server.uri())
            .with_login("octocat"),
    )
    .unwrap()
}

#[test]
fn test_create_url_picks_separator() {
    let client = GitHubClient::new("test-token", "https://api.github.com/").unwrap();

    assert_eq!(
        client.create_url("/user"),
        "https://api.github.com/user?access_token=test-token"
    );
    assert_eq!(
        client.create_url("/user/repos?type=owner"),
        "https://api.github.com/user/repos?type=owner&access_token=test-token"
    );
}

#[test]
fn test_create_url_encodes_token_once() {
    let client = GitHubClient::new("a+b/c=d", "https://api.github.com").unwrap();
    let url = client.create_url("/user");

    assert_eq!(url.matches("access_token=").count(), 1);
    assert!(url.ends_with("access_token=a%2Bb%2Fc%3Dd"));
}

#[test]
fn test_query_encoding_round_trips() {
    let mut pairs = BTreeMap::new();
    pairs.insert("sort", "  updated ");
    pairs.insert("labels", "bug,help wanted");
    pairs.insert("since", "2012-10-09T23:39:01Z");

    let encoded = encode_query(&pairs);
    let decoded: BTreeMap<String, String> = serde_qs::from_str(&encoded).unwrap();

    assert_eq!(decoded["sort"], "updated");
    assert_eq!(decoded["labels"], "bug,help wanted");
    assert_eq!(decoded["since"], "2012-10-09T23:39:01Z");
    assert_eq!(decoded.len(), 3);
}

#[tokio::test]
async fn test_token_travels_as_query_parameter() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .and(query_param("access_token", "test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let emails = assert_ok!(client.list_emails().await);
    assert!(emails.is_empty());
}

#[tokio::test]
async fn test_rate_limit_updated_from_headers() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/following/defunkt"))
        .respond_with(
            ResponseTemplate::new(204)
                .insert_header("x-ratelimit-limit", "5000")
                .insert_header("x-ratelimit-remaining", "4321"),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.is_following("defunkt").await.unwrap());

    let calls = client.rate_limit();
    assert_eq!(calls.limit, 5000);
    assert_eq!(calls.remaining, 4321);
}

#[tokio::test]
async fn test_rate_limit_unchanged_when_header_missing() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/following/defunkt"))
        .respond_with(ResponseTemplate::new(204).insert_header("x-ratelimit-remaining", "12"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let before = client.rate_limit();
    assert!(client.is_following("defunkt").await.unwrap());

    assert_eq!(client.rate_limit(), before);
}

#[tokio::test]
async fn test_rate_limit_unchanged_on_rejected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user"))
        .respond_with(
            ResponseTemplate::new(401)
                .insert_header("x-ratelimit-limit", "60")
                .insert_header("x-ratelimit-remaining", "59")
                .set_body_json(serde_json::json!({"message": "Bad credentials"})),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = assert_err!(client.get_authenticated_user().await);

    assert!(matches!(err, GitHubError::UnexpectedStatus { status: 401, .. }));
    assert!(err.to_string().contains("Bad credentials"));
    assert_eq!(client.calls_limit(), 5000);
}

#[tokio::test]
async fn test_exists_maps_204_and_404() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/starred/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/user/starred/octocat/Spoon-Knife"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.is_starring(&RepoRef::owned("Hello-World")).await.unwrap());
    assert!(!client
        .is_starring(&RepoRef::new("octocat", "Spoon-Knife"))
        .await
        .unwrap());
}

#[tokio::test]
async fn test_exists_rejects_other_status_with_status_line() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists/abc123/star"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.is_gist_starred("abc123").await.unwrap_err();

    assert!(matches!(err, GitHubError::UnexpectedStatus { status: 500, .. }));
    assert!(err.to_string().contains("500 Internal Server Error"));
}

#[tokio::test]
async fn test_blank_required_field_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .create_issue(
            &RepoRef::owned("Hello-World"),
            &NewIssue {
                title: "   ".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Validation(_)));
}

#[tokio::test]
async fn test_owner_less_repo_needs_a_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = GitHubClient::new("test-token", &server.uri()).unwrap();
    let err = client
        .get_repo(&RepoRef::owned("Hello-World"))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("owner"));
}

#[tokio::test]
async fn test_path_segments_are_encoded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World/labels/help%20wanted"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"name": "help wanted", "color": "159818"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let label = client
        .get_label(&RepoRef::owned("Hello-World"), "help wanted")
        .await
        .unwrap();

    assert_eq!(label.name, "help wanted");
}
