//! Container operations against a mock platform API.
//!
//! Each test starts its own mock server, so they run in parallel without
//! sharing state.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use deckhand_api::client::ApiClient;
use deckhand_api::models::{
    Container, ContainerQuery, DeleteContainerOptions, ExecRequest, LogQuery,
};
use deckhand_common::error::{DeckhandError, ErrorKind};
use deckhand_common::types::ContainerStatus;
use mockito::{Matcher, Server};
use serde_json::json;

const WEB_SERVER_ID: &str = "c7d8e9f0a1b2c3d4e5f6a7b8c9d0e1f2";

fn client(server: &Server) -> ApiClient {
    ApiClient::new(format!("{}/api/v1", server.url()), "test-token").unwrap()
}

#[test]
fn list_sends_bearer_token_and_filters() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v1/containers")
        .match_header("authorization", "Bearer test-token")
        .match_header("accept", "application/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("status".into(), "running".into()),
            Matcher::UrlEncoded("limit".into(), "10".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "total": 2,
                "limit": 10,
                "offset": 0,
                "containers": [
                    {
                        "id": WEB_SERVER_ID,
                        "name": "web-server-1",
                        "image": "nginx:latest",
                        "status": "running",
                        "created_at": "2023-05-15T08:30:00Z",
                        "labels": {"app": "web", "environment": "production"}
                    },
                    {
                        "id": "a1b2c3d4e5f6g7h8i9j0k1l2m3n4o5p6",
                        "name": "api-service",
                        "image": "api-service:v1.2.3",
                        "status": "running"
                    }
                ]
            })
            .to_string(),
        )
        .create();

    let page = client(&server)
        .containers()
        .list(&ContainerQuery {
            status: Some(ContainerStatus::Running),
            limit: Some(10),
            offset: None,
        })
        .unwrap();

    mock.assert();
    assert_eq!(page.total, 2);
    assert_eq!(page.containers.len(), 2);
    assert_eq!(page.containers[0].id.as_str(), WEB_SERVER_ID);
    assert_eq!(page.containers[0].labels["app"], "web");
    assert!(page.containers[0].created_at.is_some());
}

#[test]
fn create_returns_assigned_id_and_creating_status() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", "/api/v1/containers")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "name": "test-container",
            "image": "ubuntu:latest",
            "labels": {"app": "test"}
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "new1c2o3n4t5a6i7n8e9r0id",
                "name": "test-container",
                "image": "ubuntu:latest",
                "status": "creating",
                "labels": {"app": "test"}
            })
            .to_string(),
        )
        .create();

    let created = client(&server)
        .containers()
        .create(&Container::new("test-container", "ubuntu:latest").label("app", "test"))
        .unwrap();

    mock.assert();
    assert!(!created.id.is_empty());
    assert_eq!(created.status, Some(ContainerStatus::Creating));
}

#[test]
fn lifecycle_calls_hit_action_paths() {
    let mut server = Server::new();
    let start = server
        .mock("POST", format!("/api/v1/containers/{WEB_SERVER_ID}/start").as_str())
        .with_status(200)
        .with_body(
            json!({"id": WEB_SERVER_ID, "status": "starting", "message": "Container is starting"})
                .to_string(),
        )
        .create();
    let stop = server
        .mock("POST", format!("/api/v1/containers/{WEB_SERVER_ID}/stop").as_str())
        .match_query(Matcher::UrlEncoded("timeout".into(), "15".into()))
        .with_status(200)
        .with_body(json!({"id": WEB_SERVER_ID, "status": "stopping"}).to_string())
        .create();
    let delete = server
        .mock("DELETE", format!("/api/v1/containers/{WEB_SERVER_ID}").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("force".into(), "true".into()),
            Matcher::UrlEncoded("remove_volumes".into(), "true".into()),
        ]))
        .with_status(200)
        .with_body(json!({"id": WEB_SERVER_ID, "status": "deleted"}).to_string())
        .create();

    let client = client(&server);
    let containers = client.containers();

    let started = containers.start(WEB_SERVER_ID).unwrap();
    assert_eq!(started.status, Some(ContainerStatus::Starting));
    assert_eq!(started.message, "Container is starting");

    let stopped = containers.stop(WEB_SERVER_ID, Some(15)).unwrap();
    assert_eq!(stopped.status, Some(ContainerStatus::Stopping));

    let deleted = containers
        .delete(
            WEB_SERVER_ID,
            DeleteContainerOptions {
                force: true,
                remove_volumes: true,
            },
        )
        .unwrap();
    assert_eq!(deleted.status, Some(ContainerStatus::Deleted));

    start.assert();
    stop.assert();
    delete.assert();
}

#[test]
fn logs_pass_tail_and_decode_entries() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", format!("/api/v1/containers/{WEB_SERVER_ID}/logs").as_str())
        .match_query(Matcher::UrlEncoded("tail".into(), "2".into()))
        .with_status(200)
        .with_body(
            json!({"logs": [
                {"timestamp": "2023-05-15T08:30:00Z", "stream": "stdout", "message": "listening on :80"},
                {"timestamp": "2023-05-15T08:30:01Z", "stream": "stderr", "message": "warn: slow"}
            ]})
            .to_string(),
        )
        .create();

    let logs = client(&server)
        .containers()
        .logs(
            WEB_SERVER_ID,
            &LogQuery {
                tail: Some(2),
                ..LogQuery::default()
            },
        )
        .unwrap();

    mock.assert();
    assert_eq!(logs.logs.len(), 2);
    assert_eq!(logs.logs[1].stream, "stderr");
}

#[test]
fn exec_posts_split_command() {
    let mut server = Server::new();
    let mock = server
        .mock("POST", format!("/api/v1/containers/{WEB_SERVER_ID}/exec").as_str())
        .match_body(Matcher::Json(json!({
            "command": ["ls", "-la"],
            "attach_stdout": true,
            "attach_stderr": true
        })))
        .with_status(200)
        .with_body(json!({"exit_code": 0, "stdout": "total 0\n", "stderr": ""}).to_string())
        .create();

    let result = client(&server)
        .containers()
        .exec(WEB_SERVER_ID, &ExecRequest::from_command_line("ls -la"))
        .unwrap();

    mock.assert();
    assert_eq!(result.exit_code, 0);
    assert_eq!(result.stdout, "total 0\n");
}

#[test]
fn not_found_envelope_surfaces_code_and_message() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/v1/containers/missing")
        .with_status(404)
        .with_body(
            json!({"error": {"code": "NOT_FOUND", "message": "Container with ID missing not found"}})
                .to_string(),
        )
        .create();

    let err = client(&server).containers().get("missing").unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert_eq!(
        err.to_string(),
        "API error: NOT_FOUND - Container with ID missing not found"
    );
    match err {
        DeckhandError::Api { status, code, .. } => {
            assert_eq!(status, 404);
            assert_eq!(code.as_deref(), Some("NOT_FOUND"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_envelope_failure_reports_status_line() {
    let mut server = Server::new();
    let _mock = server
        .mock("GET", "/api/v1/containers")
        .with_status(502)
        .with_body("bad gateway")
        .create();

    let err = client(&server)
        .containers()
        .list(&ContainerQuery::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.to_string(), "API error: 502 Bad Gateway");
}

#[test]
fn non_200_success_codes_are_failures() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v1/containers")
        .with_status(201)
        .with_body(json!({"id": "x", "status": "creating"}).to_string())
        .create();

    let err = client(&server)
        .containers()
        .create(&Container::new("n", "i"))
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
}

#[test]
fn unreachable_server_is_connection_error() {
    let client = ApiClient::new("http://127.0.0.1:1/api/v1", "t").unwrap();
    let err = client.containers().get(WEB_SERVER_ID).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
}
