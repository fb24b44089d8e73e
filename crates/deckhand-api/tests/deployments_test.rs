//! Deployment operations against a mock platform API.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use deckhand_api::client::ApiClient;
use deckhand_api::models::{Deployment, DeploymentQuery};
use deckhand_common::error::ErrorKind;
use deckhand_common::types::DeploymentStatus;
use mockito::{Matcher, Server};
use serde_json::{Value, json};

const WEB_FRONTEND_ID: &str = "d1e2f3a4b5c6d7e8f9a0b1c2d3e4f5a6";

fn client(server: &Server) -> ApiClient {
    ApiClient::new(format!("{}/api/v1", server.url()), "test-token").unwrap()
}

fn web_frontend(replicas: u32) -> Value {
    json!({
        "id": WEB_FRONTEND_ID,
        "name": "web-frontend",
        "description": "Web frontend application",
        "status": "active",
        "environment": "production",
        "created_at": "2023-05-15T08:30:00Z",
        "version": "v2.3.1",
        "replicas": replicas,
        "strategy": {"type": "rolling-update", "max_surge": 1, "max_unavailable": 0},
        "containers": [{
            "name": "web",
            "image": "registry.example.com/web-frontend:v2.3.1",
            "ports": [{"name": "http", "container_port": 80, "service_port": 80}],
            "resources": {
                "limits": {"cpu": "1.0", "memory": "1Gi"},
                "requests": {"cpu": "0.5", "memory": "512Mi"}
            },
            "environment_variables": [{"name": "NODE_ENV", "value": "production"}],
            "health_check": {
                "http_path": "/health",
                "port": 80,
                "initial_delay_seconds": 30,
                "period_seconds": 10,
                "timeout_seconds": 5,
                "success_threshold": 1,
                "failure_threshold": 3
            }
        }],
        "services": [{
            "name": "web-frontend-svc",
            "type": "LoadBalancer",
            "ports": [{"name": "http", "port": 80, "target_port": 80}],
            "external_endpoints": ["web-frontend.example.com"]
        }]
    })
}

#[test]
fn list_requires_environment_parameter() {
    let mut server = Server::new();
    let mock = server
        .mock("GET", "/api/v1/deployments")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("environment".into(), "production".into()),
            Matcher::UrlEncoded("limit".into(), "20".into()),
            Matcher::UrlEncoded("offset".into(), "0".into()),
        ]))
        .with_status(200)
        .with_body(
            json!({
                "total": 1,
                "limit": 20,
                "offset": 0,
                "deployments": [web_frontend(3)]
            })
            .to_string(),
        )
        .create();

    let page = client(&server)
        .deployments()
        .list(&DeploymentQuery::in_environment("production"))
        .unwrap();

    mock.assert();
    assert_eq!(page.deployments.len(), 1);
    let deployment = &page.deployments[0];
    assert_eq!(deployment.status, Some(DeploymentStatus::Active));
    assert_eq!(deployment.replicas, 3);
    assert_eq!(
        deployment.services[0].external_endpoints,
        vec!["web-frontend.example.com"]
    );
}

#[test]
fn scale_then_get_reflects_new_replica_count() {
    let mut server = Server::new();
    let scale = server
        .mock("POST", format!("/api/v1/deployments/{WEB_FRONTEND_ID}/scale").as_str())
        .match_body(Matcher::Json(json!({"replicas": 5})))
        .with_status(200)
        .with_body(
            json!({"id": WEB_FRONTEND_ID, "status": "scaling", "replicas": 5}).to_string(),
        )
        .create();
    let get = server
        .mock("GET", format!("/api/v1/deployments/{WEB_FRONTEND_ID}").as_str())
        .with_status(200)
        .with_body(web_frontend(5).to_string())
        .create();

    let client = client(&server);
    let scaled = client.deployments().scale(WEB_FRONTEND_ID, 5).unwrap();
    assert_eq!(scaled.status, Some(DeploymentStatus::Scaling));

    let fetched = client.deployments().get(WEB_FRONTEND_ID).unwrap();
    assert_eq!(fetched.replicas, 5);

    scale.assert();
    get.assert();
}

#[test]
fn create_and_update_send_definition() {
    let mut server = Server::new();
    let create = server
        .mock("POST", "/api/v1/deployments")
        .match_body(Matcher::PartialJson(json!({
            "name": "api-backend",
            "environment": "staging",
            "version": "v1.5.1",
            "replicas": 2
        })))
        .with_status(200)
        .with_body(
            json!({
                "id": "f1e2d3c4b5a6f7e8d9c0b1a2d3e4f5c6",
                "name": "api-backend",
                "status": "created",
                "environment": "staging",
                "version": "v1.5.1",
                "replicas": 2
            })
            .to_string(),
        )
        .create();
    let update = server
        .mock("PUT", "/api/v1/deployments/f1e2d3c4b5a6f7e8d9c0b1a2d3e4f5c6")
        .match_body(Matcher::PartialJson(json!({"version": "v1.6.0"})))
        .with_status(200)
        .with_body(
            json!({
                "id": "f1e2d3c4b5a6f7e8d9c0b1a2d3e4f5c6",
                "status": "updating",
                "version": "v1.6.0"
            })
            .to_string(),
        )
        .create();

    let client = client(&server);
    let mut definition = Deployment {
        name: "api-backend".into(),
        environment: "staging".into(),
        version: "v1.5.1".into(),
        replicas: 2,
        ..Deployment::default()
    };
    let created = client.deployments().create(&definition).unwrap();
    assert_eq!(created.status, Some(DeploymentStatus::Created));

    definition.version = "v1.6.0".into();
    let updated = client
        .deployments()
        .update(created.id.as_str(), &definition)
        .unwrap();
    assert_eq!(updated.status, Some(DeploymentStatus::Updating));
    assert_eq!(updated.version, "v1.6.0");

    create.assert();
    update.assert();
}

#[test]
fn delete_ignores_response_body() {
    let mut server = Server::new();
    let mock = server
        .mock("DELETE", format!("/api/v1/deployments/{WEB_FRONTEND_ID}").as_str())
        .match_query(Matcher::UrlEncoded("force".into(), "true".into()))
        .with_status(200)
        .with_body("ok")
        .create();

    client(&server)
        .deployments()
        .delete(WEB_FRONTEND_ID, true)
        .unwrap();

    mock.assert();
}

#[test]
fn missing_deployment_surfaces_remote_error() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v1/deployments/nope/scale")
        .with_status(404)
        .with_body(
            json!({"error": {"code": "NOT_FOUND", "message": "deployment nope does not exist"}})
                .to_string(),
        )
        .create();

    let err = client(&server).deployments().scale("nope", 1).unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        err.to_string(),
        "API error: NOT_FOUND - deployment nope does not exist"
    );
}

#[test]
fn validation_error_keeps_non_not_found_kind() {
    let mut server = Server::new();
    let _mock = server
        .mock("POST", "/api/v1/deployments")
        .with_status(400)
        .with_body(
            json!({"error": {
                "code": "INVALID_ARGUMENT",
                "message": "replicas must be positive",
                "details": {"field": "replicas"}
            }})
            .to_string(),
        )
        .create();

    let err = client(&server)
        .deployments()
        .create(&Deployment::default())
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(
        err.to_string(),
        "API error: INVALID_ARGUMENT - replicas must be positive"
    );
}
