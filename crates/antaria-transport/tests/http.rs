//! Integration tests for the HTTP transport.
//!
//! These tests run a real local HTTP server (`wiremock`) and verify that
//! the transport posts where it should and hands back status and body
//! untouched, error statuses included.

#[cfg(feature = "http")]
mod http {
    use std::time::Duration;

    use antaria_transport::{HttpTransport, Transport, TransportError};
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_post_sends_json_body_to_module_path() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/empire"))
            .and(header("content-type", "application/json"))
            .and(body_string_contains("\"method\":\"login\""))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"result":1}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let resp = transport
            .post("empire", br#"{"method":"login"}"#.to_vec())
            .await
            .expect("post should succeed");

        assert_eq!(resp.status, 200);
        assert_eq!(resp.body, br#"{"result":1}"#);
    }

    #[tokio::test]
    async fn test_post_returns_error_status_without_interpreting_it() {
        let server = MockServer::start().await;
        let body = r#"{"error":{"code":1006,"message":"expired"}}"#;
        Mock::given(method("POST"))
            .and(path("/body"))
            .respond_with(ResponseTemplate::new(404).set_body_string(body))
            .mount(&server)
            .await;

        let transport = HttpTransport::new(&server.uri()).unwrap();
        let resp = transport.post("/body", b"{}".to_vec()).await.unwrap();

        assert_eq!(resp.status, 404);
        assert!(resp.is_error());
        assert_eq!(resp.body_text(), body);
    }

    #[tokio::test]
    async fn test_post_to_closed_port_is_connect_failure() {
        // Reserve a free port, then release it so nothing listens there.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };

        let transport = HttpTransport::new(&format!("http://127.0.0.1:{port}")).unwrap();
        let result = transport.post("empire", b"{}".to_vec()).await;

        let err = result.expect_err("nothing listens on the port");
        assert!(matches!(err, TransportError::Http(_)), "got {err:?}");
        assert!(err.is_connect(), "got {err:?}");
        assert!(!err.is_timeout());
    }

    #[tokio::test]
    async fn test_slow_server_is_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&server)
            .await;

        let transport =
            HttpTransport::with_timeout(&server.uri(), Some(Duration::from_millis(50))).unwrap();
        let err = transport
            .post("empire", b"{}".to_vec())
            .await
            .expect_err("the server answers after the timeout");

        assert!(err.is_timeout(), "got {err:?}");
    }
}
