//! Users, emails, keys, following and gists.

use std::collections::BTreeMap;

use githubv3::{
    ClientConfig, EmailEntry, Get, Gist, GitHubClient, GitHubError, NewGist, NewGistFile, User,
};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_config(
        ClientConfig::new("test-token")
            .with_base_url(server.uri())
            .with_login("octocat"),
    )
    .unwrap()
}

fn gist_json(id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "description": "hello world",
        "public": true,
        "files": {
            "hello.rs": {"filename": "hello.rs", "size": 45, "language": "Rust"}
        },
        "history": null
    })
}

#[tokio::test]
async fn test_get_user_through_trait() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/hubot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "login": "hubot",
            "id": 2,
            "name": "Hubot",
            "public_repos": 7
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let user = User::get(&client, "hubot".to_string()).await.unwrap();

    assert_eq!(user.login, "hubot");
    assert_eq!(user.public_repos, Some(7));
}

#[tokio::test]
async fn test_list_emails_accepts_both_shapes() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/user/emails"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            "octocat@github.com",
            {"email": "support@github.com", "primary": true, "verified": true}
        ])))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let emails = client.list_emails().await.unwrap();

    assert_eq!(
        emails[0],
        EmailEntry::Address("octocat@github.com".to_string())
    );
    assert_eq!(emails[1].address(), "support@github.com");
}

#[tokio::test]
async fn test_add_emails_posts_array() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/user/emails"))
        .and(body_json(serde_json::json!(["octocat@github.com", "mona@github.com"])))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!([
            "octocat@github.com",
            "mona@github.com"
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let added = client
        .add_emails(&["octocat@github.com".to_string(), "mona@github.com".to_string()])
        .await
        .unwrap();

    assert_eq!(added.len(), 2);
}

#[tokio::test]
async fn test_delete_emails_sends_body() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/user/emails"))
        .and(body_json(serde_json::json!(["old@github.com"])))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client
        .delete_emails(&["old@github.com".to_string()])
        .await
        .unwrap();
}

#[tokio::test]
async fn test_follow_puts() {
    let server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/user/following/hubot"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(client.follow("hubot").await.unwrap());
}

#[tokio::test]
async fn test_user_public_keys() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/users/octocat/keys"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!([{"id": 1, "key": "ssh-rsa AAAA"}])),
        )
        .mount(&server)
        .await;

    let client = client_for(&server);
    let keys = client.list_user_public_keys("octocat").await.unwrap();

    assert_eq!(keys[0].key, "ssh-rsa AAAA");
}

#[tokio::test]
async fn test_get_gist_tolerates_null_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/gists/aa5a315d61ae9438b18d"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gist_json("aa5a315d61ae9438b18d")))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let gist = Gist::get(&client, "aa5a315d61ae9438b18d".to_string())
        .await
        .unwrap();

    assert!(gist.history.is_empty());
    assert_eq!(gist.files["hello.rs"].language.as_deref(), Some("Rust"));
}

#[tokio::test]
async fn test_create_gist_needs_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut files = BTreeMap::new();
    files.insert("empty.txt".to_string(), Some(NewGistFile::default()));
    let err = client
        .create_gist(&NewGist {
            files,
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, GitHubError::Validation(_)));
}

#[tokio::test]
async fn test_create_gist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gists"))
        .and(body_json(serde_json::json!({
            "description": "hello world",
            "public": true,
            "files": {"hello.rs": {"content": "fn main() {}"}}
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(gist_json("1")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut files = BTreeMap::new();
    files.insert(
        "hello.rs".to_string(),
        Some(NewGistFile {
            content: "fn main() {}".to_string(),
            filename: None,
        }),
    );
    let gist = client
        .create_gist(&NewGist {
            description: Some("hello world".to_string()),
            public: Some(true),
            files,
        })
        .await
        .unwrap();

    assert_eq!(gist.id, "1");
}

#[tokio::test]
async fn test_unstar_gist_not_starred() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/gists/1/star"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = client_for(&server);
    assert!(!client.unstar_gist("1").await.unwrap());
}

#[tokio::test]
async fn test_fork_gist() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/gists/1/forks"))
        .respond_with(ResponseTemplate::new(201).set_body_json(gist_json("2")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let fork = client.fork_gist("1").await.unwrap();

    assert_eq!(fork.id, "2");
}
