use coursebot::core::forum::Forum;
use coursebot::core::reddit::RedditClient;
use coursebot::error::coursebot::ErrorKind;
use coursebot::model::config::RedditCredentials;
use coursebot::model::item::{ItemKind, MonitoredItem};
use serde_json::json;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> RedditClient {
    let credentials = RedditCredentials {
        username: "CourseBot".to_string(),
        password: "hunter2".to_string(),
        client_id: "client".to_string(),
        client_secret: "secret".to_string(),
        auth_url: format!("{}/api/v1/access_token", server.uri()),
        api_base: server.uri(),
    };
    RedditClient::new(credentials, "uoft+utm", 100, "CourseBot test").unwrap()
}

async fn grant_token(server: &MockServer, expected_hits: u64) {
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .and(body_string_contains("grant_type=password"))
        .and(body_string_contains("username=CourseBot"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "tok",
            "token_type": "bearer",
            "expires_in": 3600,
            "scope": "*"
        })))
        .expect(expected_hits)
        .mount(server)
        .await;
}

#[tokio::test]
async fn lists_comments_and_submissions_with_one_token() {
    let server = MockServer::start().await;
    grant_token(&server, 1).await;
    Mock::given(method("GET"))
        .and(path("/r/uoft+utm/comments"))
        .and(header("authorization", "bearer tok"))
        .and(query_param("limit", "100"))
        .and(query_param("raw_json", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": {"after": null, "children": [
                {"kind": "t1", "data": {"id": "c1", "name": "t1_c1", "author": "alice", "body": "!csc108h1?"}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/r/uoft+utm/new"))
        .and(header("authorization", "bearer tok"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "kind": "Listing",
            "data": {"after": "t3_s2", "children": [
                {"kind": "t3", "data": {"id": "s1", "name": "t3_s1", "author": "bob", "title": "!mat137y1 tips", "selftext": ""}}
            ]}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reddit = client(&server);
    let comments = reddit.newest_comments().await.unwrap();
    let submissions = reddit.newest_submissions(25).await.unwrap();

    assert_eq!(comments, vec![MonitoredItem::comment("c1", "!csc108h1?", "alice")]);
    assert_eq!(submissions.len(), 1);
    assert_eq!(submissions[0].kind, ItemKind::Submission);
    assert_eq!(submissions[0].title.as_deref(), Some("!mat137y1 tips"));
}

#[tokio::test]
async fn rejected_login_is_an_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/v1/access_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"error": "invalid_grant"})))
        .mount(&server)
        .await;

    let err = client(&server).newest_comments().await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Auth);
    assert!(err.message.contains("invalid_grant"));
}

#[tokio::test]
async fn reply_posts_to_the_fullname() {
    let server = MockServer::start().await;
    grant_token(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/comment"))
        .and(header("authorization", "bearer tok"))
        .and(body_string_contains("thing_id=t3_s1"))
        .and(body_string_contains("api_type=json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [], "data": {"things": []}}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let item = MonitoredItem::submission("s1", "!csc108h1", "bob");
    client(&server).reply(&item, "###CSC108H1 - Intro:").await.unwrap();
}

#[tokio::test]
async fn reply_errors_from_reddit_are_reply_failures() {
    let server = MockServer::start().await;
    grant_token(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/comment"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "json": {"errors": [["RATELIMIT", "you are doing that too much", "ratelimit"]]}
        })))
        .mount(&server)
        .await;

    let item = MonitoredItem::comment("c1", "!csc108h1", "alice");
    let err = client(&server).reply(&item, "hello").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reply);
    assert!(err.message.contains("RATELIMIT"));
}

#[tokio::test]
async fn server_errors_on_reply_are_reply_failures() {
    let server = MockServer::start().await;
    grant_token(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/api/comment"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let item = MonitoredItem::comment("c1", "!csc108h1", "alice");
    let err = client(&server).reply(&item, "hello").await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Reply);
}
