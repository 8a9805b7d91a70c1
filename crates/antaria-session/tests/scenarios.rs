//! End-to-end session scenarios over real HTTP.
//!
//! A local `wiremock` server stands in for the game server; the session
//! uses the real `HttpTransport`. These mirror the behaviors a caller
//! relies on: login, token prepending, recovery from an expired session,
//! and status accumulation.

use antaria_session::{Credentials, Session, SessionConfig, SessionError};
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

// -- Helpers ----------------------------------------------------------------

async fn session_for(server: &MockServer) -> Session<antaria_transport::HttpTransport> {
    let config = SessionConfig {
        server_url: server.uri(),
        ..SessionConfig::default()
    };
    Session::connect(&config, Credentials::new("empire_name", "empire_password", "key"))
        .expect("session should build")
}

async fn mount_login(server: &MockServer, token: &str) {
    Mock::given(method("POST"))
        .and(path("/empire"))
        .and(body_string_contains("\"method\":\"login\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "result": {
                "session_id": token,
                "status": {"empire": {"id": "42542", "name": "Antaria"}}
            }
        })))
        .mount(server)
        .await;
}

fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).expect("request body should be json")
}

async fn requests_to(server: &MockServer, module: &str) -> Vec<Value> {
    server
        .received_requests()
        .await
        .expect("request recording is on by default")
        .iter()
        .filter(|r| r.url.path() == format!("/{module}"))
        .map(body_json)
        .collect()
}

// -- Scenarios --------------------------------------------------------------

#[tokio::test]
async fn test_login_then_call_prepends_token() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("POST"))
        .and(path("/body"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"result": {"ok": 1}})))
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;

    assert!(session.login().await.unwrap());
    assert!(session.is_logged_in());

    session
        .call("body", "get_buildings", None, vec![json!("extra")])
        .await
        .unwrap();

    let calls = requests_to(&server, "body").await;
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0]["params"], json!(["abc", "extra"]));
    assert_eq!(calls[0]["method"], "get_buildings");
    assert_eq!(calls[0]["jsonrpc"], "2.0");
}

#[tokio::test]
async fn test_expired_session_is_recovered_with_one_retry() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    // First call to /foo fails with 1006; every later one succeeds.
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": {"code": 1006, "message": "expired"}})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{ }"))
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;
    assert!(!session.is_logged_in());

    let result = session
        .call("foo", "bar", None, vec![json!("baz"), json!("quux")])
        .await
        .unwrap();

    assert_eq!(result, Value::Null);
    assert!(session.is_logged_in());
    assert_eq!(requests_to(&server, "foo").await.len(), 2);
    // One lazy login plus one re-login after the expiry.
    assert_eq!(requests_to(&server, "empire").await.len(), 2);
}

#[tokio::test]
async fn test_repeated_expiry_surfaces_error() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("POST"))
        .and(path("/foo"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": {"code": 1006, "message": "expired"}, "id": "foo-bar-3"})),
        )
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;

    let err = session.call("foo", "bar", None, vec![]).await.unwrap_err();

    assert!(err.is_session_expired(), "got {err:?}");
    assert_eq!(requests_to(&server, "foo").await.len(), 2);
}

#[tokio::test]
async fn test_status_fragments_accumulate() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("POST"))
        .and(path("/empire"))
        .and(body_string_contains("get_status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"result": {"status": {"empire": {"status_message": "Testing the current API."}}}}),
        ))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/body"))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"result": {"status": {"body": {"id": "1", "name": "Earth"}}}}),
        ))
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;

    session.call("empire", "get_status", None, vec![]).await.unwrap();
    session.call("body", "get_status", None, vec![]).await.unwrap();

    let cache = session.status();
    assert_eq!(cache.field("empire", "name"), Some(&json!("Antaria")));
    assert_eq!(
        cache.field("empire", "status_message"),
        Some(&json!("Testing the current API."))
    );
    assert_eq!(cache.field("body", "name"), Some(&json!("Earth")));
}

#[tokio::test]
async fn test_logout_posts_token_and_clears_state() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("POST"))
        .and(path("/empire"))
        .and(body_string_contains("\"method\":\"logout\""))
        .respond_with(ResponseTemplate::new(200).set_body_string(""))
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;
    session.login().await.unwrap();

    session.logout().await.unwrap();

    assert!(!session.is_logged_in());
    let logout = requests_to(&server, "empire")
        .await
        .into_iter()
        .find(|b| b["method"] == "logout")
        .expect("logout should have been posted");
    assert_eq!(logout["params"], json!(["abc"]));
}

#[tokio::test]
async fn test_unstructured_server_error_is_http_error() {
    let server = MockServer::start().await;
    mount_login(&server, "abc").await;
    Mock::given(method("POST"))
        .and(path("/body"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;
    let mut session = session_for(&server).await;

    let err = session.call("body", "get_status", None, vec![]).await.unwrap_err();

    assert!(
        matches!(err, SessionError::Http { status: 503, ref body } if body == "maintenance"),
        "got {err:?}"
    );
}
